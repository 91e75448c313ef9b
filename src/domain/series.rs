//! Daily price bar representation and series normalization.
//!
//! Every engine in this crate assumes a price series in strictly ascending
//! date order with no duplicate dates. [`normalize`] establishes that
//! invariant; adapters call it before handing a series to the domain.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Sort ascending by date and drop duplicate dates, keeping the first
/// occurrence of each.
pub fn normalize(mut points: Vec<PricePoint>) -> Vec<PricePoint> {
    points.sort_by_key(|p| p.date);
    points.dedup_by_key(|p| p.date);
    points
}

/// Extract the close column.
pub fn closes(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.close).collect()
}
