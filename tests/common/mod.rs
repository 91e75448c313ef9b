#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;

use stocklens::domain::error::StocklensError;
use stocklens::domain::fundamentals::{RawFundamentals, StatementYear};
pub use stocklens::domain::series::PricePoint;
use stocklens::ports::data_port::MarketDataPort;

pub struct MockMarketData {
    pub series: HashMap<String, Vec<PricePoint>>,
    pub overviews: HashMap<String, RawFundamentals>,
    pub income: HashMap<String, Vec<StatementYear>>,
    pub balance: HashMap<String, Vec<StatementYear>>,
    pub cash: HashMap<String, Vec<StatementYear>>,
    pub errors: HashMap<String, String>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
            overviews: HashMap::new(),
            income: HashMap::new(),
            balance: HashMap::new(),
            cash: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, symbol: &str, series: Vec<PricePoint>) -> Self {
        self.series.insert(symbol.to_string(), series);
        self
    }

    pub fn with_overview(mut self, overview: RawFundamentals) -> Self {
        self.overviews.insert(overview.symbol.clone(), overview);
        self
    }

    pub fn with_income(mut self, symbol: &str, years: Vec<StatementYear>) -> Self {
        self.income.insert(symbol.to_string(), years);
        self
    }

    pub fn with_balance(mut self, symbol: &str, years: Vec<StatementYear>) -> Self {
        self.balance.insert(symbol.to_string(), years);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    fn check_error(&self, symbol: &str) -> Result<(), StocklensError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(StocklensError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(())
    }
}

impl MarketDataPort for MockMarketData {
    fn price_series(&self, symbol: &str) -> Result<Vec<PricePoint>, StocklensError> {
        self.check_error(symbol)?;
        Ok(self.series.get(symbol).cloned().unwrap_or_default())
    }

    fn fundamentals_overview(&self, symbol: &str) -> Result<RawFundamentals, StocklensError> {
        self.check_error(symbol)?;
        self.overviews
            .get(symbol)
            .cloned()
            .ok_or_else(|| StocklensError::NoData {
                symbol: symbol.to_string(),
            })
    }

    fn income_statement(&self, symbol: &str) -> Result<Vec<StatementYear>, StocklensError> {
        self.check_error(symbol)?;
        Ok(self.income.get(symbol).cloned().unwrap_or_default())
    }

    fn balance_sheet(&self, symbol: &str) -> Result<Vec<StatementYear>, StocklensError> {
        self.check_error(symbol)?;
        Ok(self.balance.get(symbol).cloned().unwrap_or_default())
    }

    fn cash_flow(&self, symbol: &str) -> Result<Vec<StatementYear>, StocklensError> {
        self.check_error(symbol)?;
        Ok(self.cash.get(symbol).cloned().unwrap_or_default())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_series(closes: &[f64]) -> Vec<PricePoint> {
    let start = date(2019, 1, 1);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 10_000.0,
        })
        .collect()
}

/// 250 falling bars then 300 strongly rising: one upward 50/200 cross.
pub fn v_shape_closes() -> Vec<f64> {
    let mut closes: Vec<f64> = (0..250).map(|i| 500.0 - i as f64).collect();
    let bottom = *closes.last().unwrap();
    closes.extend((1..=300).map(|i| bottom + i as f64 * 2.0));
    closes
}

pub fn make_year(
    date_str: &str,
    revenue: Option<f64>,
    net_income: Option<f64>,
    assets: Option<f64>,
    liabilities: Option<f64>,
) -> StatementYear {
    StatementYear {
        fiscal_date_ending: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        total_revenue: revenue,
        net_income,
        total_assets: assets,
        total_liabilities: liabilities,
        total_shareholder_equity: None,
        operating_cashflow: None,
    }
}

pub fn make_overview(symbol: &str) -> RawFundamentals {
    RawFundamentals {
        symbol: symbol.to_string(),
        ..RawFundamentals::default()
    }
}
