//! Directory-backed market data adapter.
//!
//! Expects, per symbol, under the base directory:
//! - `{SYMBOL}.csv` — daily candles, header `date,open,high,low,close,volume`
//! - `{SYMBOL}_overview.json` — overview ratios (upstream key names)
//! - `{SYMBOL}_income.json`, `{SYMBOL}_balance.json`, `{SYMBOL}_cashflow.json`
//!   — arrays of statement years
//!
//! Candles are normalized (ascending, duplicate dates dropped) and the
//! balance history is sorted newest-first before leaving the adapter, so the
//! domain invariants hold regardless of file order.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::domain::error::StocklensError;
use crate::domain::fundamentals::{self, RawFundamentals, StatementYear};
use crate::domain::series::{self, PricePoint};
use crate::ports::data_port::MarketDataPort;

pub struct FileDataAdapter {
    base_path: PathBuf,
}

impl FileDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn read_file(&self, name: &str) -> Result<String, StocklensError> {
        let path = self.base_path.join(name);
        fs::read_to_string(&path).map_err(|e| StocklensError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })
    }

    fn read_statements(&self, name: &str) -> Result<Vec<StatementYear>, StocklensError> {
        let content = self.read_file(name)?;
        serde_json::from_str(&content).map_err(|e| StocklensError::DataSource {
            reason: format!("JSON parse error in {}: {}", name, e),
        })
    }
}

fn parse_column(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, StocklensError> {
    record
        .get(index)
        .ok_or_else(|| StocklensError::DataSource {
            reason: format!("missing {} column", name),
        })?
        .parse()
        .map_err(|e| StocklensError::DataSource {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl MarketDataPort for FileDataAdapter {
    fn price_series(&self, symbol: &str) -> Result<Vec<PricePoint>, StocklensError> {
        let content = self.read_file(&format!("{symbol}.csv"))?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut points = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| StocklensError::DataSource {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| StocklensError::DataSource {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                StocklensError::DataSource {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            points.push(PricePoint {
                date,
                open: parse_column(&record, 1, "open")?,
                high: parse_column(&record, 2, "high")?,
                low: parse_column(&record, 3, "low")?,
                close: parse_column(&record, 4, "close")?,
                volume: parse_column(&record, 5, "volume")?,
            });
        }

        if points.is_empty() {
            return Err(StocklensError::NoData {
                symbol: symbol.to_string(),
            });
        }
        Ok(series::normalize(points))
    }

    fn fundamentals_overview(&self, symbol: &str) -> Result<RawFundamentals, StocklensError> {
        let name = format!("{symbol}_overview.json");
        let content = self.read_file(&name)?;
        let mut raw: RawFundamentals =
            serde_json::from_str(&content).map_err(|e| StocklensError::DataSource {
                reason: format!("JSON parse error in {}: {}", name, e),
            })?;
        raw.symbol = symbol.to_string();
        Ok(raw)
    }

    fn income_statement(&self, symbol: &str) -> Result<Vec<StatementYear>, StocklensError> {
        self.read_statements(&format!("{symbol}_income.json"))
    }

    fn balance_sheet(&self, symbol: &str) -> Result<Vec<StatementYear>, StocklensError> {
        let years = self.read_statements(&format!("{symbol}_balance.json"))?;
        Ok(fundamentals::sort_newest_first(years))
    }

    fn cash_flow(&self, symbol: &str) -> Result<Vec<StatementYear>, StocklensError> {
        self.read_statements(&format!("{symbol}_cashflow.json"))
    }
}
