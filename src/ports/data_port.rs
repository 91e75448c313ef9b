//! Market data access port trait.
//!
//! Implementations deliver already-parsed series in domain form: the price
//! series ascending by date with no duplicates, and the balance-sheet
//! history newest-first (the ROCE derivation reads its first element as the
//! latest fiscal year).

use crate::domain::error::StocklensError;
use crate::domain::fundamentals::{RawFundamentals, StatementYear};
use crate::domain::series::PricePoint;

pub trait MarketDataPort {
    /// Daily OHLCV bars, ascending chronological order.
    fn price_series(&self, symbol: &str) -> Result<Vec<PricePoint>, StocklensError>;

    fn fundamentals_overview(&self, symbol: &str) -> Result<RawFundamentals, StocklensError>;

    fn income_statement(&self, symbol: &str) -> Result<Vec<StatementYear>, StocklensError>;

    /// Balance-sheet years, sorted newest-first.
    fn balance_sheet(&self, symbol: &str) -> Result<Vec<StatementYear>, StocklensError>;

    fn cash_flow(&self, symbol: &str) -> Result<Vec<StatementYear>, StocklensError>;
}
