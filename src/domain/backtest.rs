//! Crossover backtest engine.
//!
//! Simulates a long-or-flat position driven by a fast/slow SMA crossover
//! (50/200 by default) in a single pass over the series: equity compounding,
//! drawdown peak tracking, and trade accounting all happen per bar. No
//! commissions, slippage, dividends, or shorting are modeled.

use chrono::NaiveDate;
use serde::Serialize;

use super::indicator::sma;
use super::series::{self, PricePoint};

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverParams {
    pub fast_period: usize,
    pub slow_period: usize,
}

impl Default for CrossoverParams {
    fn default() -> Self {
        Self {
            fast_period: 50,
            slow_period: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestReport {
    pub symbol: String,
    pub total_return_pct: f64,
    pub cagr_pct: f64,
    pub max_drawdown_pct: f64,
    pub win_rate_pct: f64,
    pub num_trades: usize,
    /// Mean/stddev of per-bar returns annualized by sqrt(252); `None` when
    /// the return series is empty or has zero variance.
    pub sharpe_approx: Option<f64>,
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Flat,
    Long,
}

/// Run the crossover simulation over `series` (ascending by date).
///
/// Fewer than `slow_period + 1` bars means no bar ever has both SMA windows
/// plus a predecessor, so the report holds neutral defaults rather than an
/// error.
pub fn run(symbol: &str, series: &[PricePoint], params: CrossoverParams) -> BacktestReport {
    let slow = params.slow_period;
    if slow == 0 || params.fast_period == 0 || series.len() < slow + 1 {
        return neutral_report(symbol);
    }

    let closes = series::closes(series);
    let fast_sma = sma::rolling(&closes, params.fast_period);
    let slow_sma = sma::rolling(&closes, slow);

    let mut equity = 1.0_f64;
    let mut position = Position::Flat;
    let mut entry_price = 0.0_f64;
    let mut num_trades = 0usize;
    let mut wins = 0usize;
    let mut peak_equity = 1.0_f64;
    let mut max_drawdown = 0.0_f64;
    let mut returns: Vec<f64> = Vec::with_capacity(series.len() - slow);

    for i in slow..series.len() {
        let (Some(f), Some(s), Some(prev_f), Some(prev_s)) =
            (fast_sma[i], slow_sma[i], fast_sma[i - 1], slow_sma[i - 1])
        else {
            continue;
        };

        // Flat bars contribute 0 to the return series (held as cash).
        let mut bar_return = 0.0;
        if position == Position::Long && closes[i - 1] > 0.0 {
            bar_return = (closes[i] - closes[i - 1]) / closes[i - 1];
            equity *= 1.0 + bar_return;
        }
        returns.push(bar_return);

        if equity > peak_equity {
            peak_equity = equity;
        }
        let drawdown = (peak_equity - equity) / peak_equity;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
        }

        // A cross requires the inequality to strictly flip; equal SMAs on
        // either bar of the pair are not a cross.
        let cross_up = prev_f <= prev_s && f > s;
        let cross_down = prev_f >= prev_s && f < s;

        if cross_up && position == Position::Flat {
            position = Position::Long;
            entry_price = closes[i];
            num_trades += 1;
        } else if cross_down && position == Position::Long {
            position = Position::Flat;
            if closes[i] > entry_price {
                wins += 1;
            }
        }
    }

    let total_return_pct = (equity - 1.0) * 100.0;
    let cagr_pct = cagr_percent(equity, series[slow].date, series[series.len() - 1].date);
    let win_rate_pct = if num_trades > 0 {
        wins as f64 / num_trades as f64 * 100.0
    } else {
        0.0
    };

    BacktestReport {
        symbol: symbol.to_string(),
        total_return_pct,
        cagr_pct,
        max_drawdown_pct: max_drawdown * 100.0,
        win_rate_pct,
        num_trades,
        sharpe_approx: sharpe_approx(&returns),
        comment: comment_for(cagr_pct),
    }
}

fn neutral_report(symbol: &str) -> BacktestReport {
    BacktestReport {
        symbol: symbol.to_string(),
        total_return_pct: 0.0,
        cagr_pct: 0.0,
        max_drawdown_pct: 0.0,
        win_rate_pct: 0.0,
        num_trades: 0,
        sharpe_approx: None,
        comment: comment_for(0.0),
    }
}

fn cagr_percent(final_equity: f64, start: NaiveDate, end: NaiveDate) -> f64 {
    let years = (end - start).num_days() as f64 / 365.0;
    if years > 0.0 {
        (final_equity.powf(1.0 / years) - 1.0) * 100.0
    } else {
        0.0
    }
}

fn sharpe_approx(returns: &[f64]) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();
    if stddev > 0.0 {
        Some(mean / stddev * TRADING_DAYS_PER_YEAR.sqrt())
    } else {
        None
    }
}

fn comment_for(cagr_pct: f64) -> String {
    if cagr_pct > 0.0 {
        "Strategy historically profitable (before costs).".to_string()
    } else {
        "Strategy historically weak or losing (before costs).".to_string()
    }
}
