//! Raw fundamentals records and tolerant numeric parsing.
//!
//! Upstream ratio providers are noisy: fields may be absent, hold the
//! literal placeholders "None" or "-", or fail to parse. All of those map to
//! an absent value. An absent value means "not computable", never zero, and
//! no NaN or infinity ever enters a record.

use chrono::NaiveDate;
use serde::Deserialize;

/// Overview ratios as delivered upstream: optional strings under the
/// provider's own key names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFundamentals {
    /// Stamped by the data layer with the symbol the record was fetched
    /// for; upstream payloads do not carry it reliably.
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "MarketCapitalization")]
    pub market_capitalization: Option<String>,
    #[serde(rename = "PERatio")]
    pub pe_ratio: Option<String>,
    #[serde(rename = "PEGRatio")]
    pub peg_ratio: Option<String>,
    #[serde(rename = "PriceToBookRatio")]
    pub price_to_book_ratio: Option<String>,
    #[serde(rename = "ReturnOnEquityTTM")]
    pub return_on_equity_ttm: Option<String>,
    #[serde(rename = "ProfitMargin")]
    pub profit_margin: Option<String>,
    #[serde(rename = "EBITDA")]
    pub ebitda: Option<String>,
    #[serde(rename = "EPS")]
    pub eps: Option<String>,
}

/// One fiscal year of statement figures, each optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatementYear {
    #[serde(rename = "fiscalDateEnding")]
    pub fiscal_date_ending: NaiveDate,
    #[serde(rename = "totalRevenue")]
    pub total_revenue: Option<f64>,
    #[serde(rename = "netIncome")]
    pub net_income: Option<f64>,
    #[serde(rename = "totalAssets")]
    pub total_assets: Option<f64>,
    #[serde(rename = "totalLiabilities")]
    pub total_liabilities: Option<f64>,
    #[serde(rename = "totalShareholderEquity")]
    pub total_shareholder_equity: Option<f64>,
    #[serde(rename = "operatingCashflow")]
    pub operating_cashflow: Option<f64>,
}

/// Parse an optional upstream field. Absent, "None", "-", unparsable, or
/// non-finite values are all `None`.
pub fn parse_field(value: Option<&str>) -> Option<f64> {
    let value = value?.trim();
    if value.is_empty() || value == "None" || value == "-" {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Sort a statement history ascending by fiscal date. Source order is not
/// guaranteed; trend math requires chronological order.
pub fn sort_ascending(mut years: Vec<StatementYear>) -> Vec<StatementYear> {
    years.sort_by_key(|y| y.fiscal_date_ending);
    years
}

/// Sort a statement history descending by fiscal date, newest first. The
/// ROCE derivation reads the first element as the latest year.
pub fn sort_newest_first(mut years: Vec<StatementYear>) -> Vec<StatementYear> {
    years.sort_by_key(|y| std::cmp::Reverse(y.fiscal_date_ending));
    years
}
