//! Indicator engine: moving averages, RSI, trend and signal classification.

use serde::Serialize;

use super::indicator::{rsi, sma};
use super::series::{self, PricePoint};

pub const SMA_SHORT: usize = 20;
pub const SMA_MID: usize = 50;
pub const SMA_LONG: usize = 200;
pub const RSI_PERIOD: usize = 14;

/// Band around SMA200 inside which SMA50 counts as neither above nor below.
/// Prevents trend flip-flopping on near-equal crosses.
const TREND_BAND: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
    Sideways,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Signal {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorReport {
    pub symbol: String,
    /// `None` only for an empty series.
    pub last_close: Option<f64>,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub rsi14: Option<f64>,
    pub trend: Trend,
    pub signal: Signal,
    pub reasons: Vec<String>,
}

/// Classify trend and signal for `series` (ascending by date).
///
/// Missing indicators degrade the classification (trend `Unknown`, signal
/// `Neutral`); they never abort it.
pub fn analyze(symbol: &str, series: &[PricePoint]) -> IndicatorReport {
    let closes = series::closes(series);

    let sma20 = sma::latest(&closes, SMA_SHORT);
    let sma50 = sma::latest(&closes, SMA_MID);
    let sma200 = sma::latest(&closes, SMA_LONG);
    let rsi14 = rsi::wilder(&closes, RSI_PERIOD);

    let trend = match (sma50, sma200) {
        (Some(mid), Some(long)) => {
            if mid > long * (1.0 + TREND_BAND) {
                Trend::Uptrend
            } else if mid < long * (1.0 - TREND_BAND) {
                Trend::Downtrend
            } else {
                Trend::Sideways
            }
        }
        _ => Trend::Unknown,
    };

    let mut signal = Signal::Neutral;
    let mut reasons = Vec::new();

    match trend {
        Trend::Uptrend => {
            reasons.push("SMA50 is significantly above SMA200 (Golden Cross area).".to_string());
            if let Some(r) = rsi14 {
                if (40.0..=70.0).contains(&r) {
                    signal = Signal::Bullish;
                    reasons.push("RSI is in healthy bullish zone (40-70).".to_string());
                }
            }
        }
        Trend::Downtrend => {
            reasons.push("SMA50 is significantly below SMA200 (Death Cross area).".to_string());
            if let Some(r) = rsi14 {
                if r > 50.0 {
                    signal = Signal::Bearish;
                    reasons.push(
                        "RSI > 50 in a downtrend often indicates a selling opportunity (pullback)."
                            .to_string(),
                    );
                }
            }
        }
        Trend::Sideways | Trend::Unknown => {
            reasons.push("Trend is sideways or undefined.".to_string());
        }
    }

    if let Some(r) = rsi14 {
        if r > 70.0 {
            reasons.push("RSI is Overbought (>70).".to_string());
        }
        if r < 30.0 {
            reasons.push("RSI is Oversold (<30).".to_string());
        }
    }

    IndicatorReport {
        symbol: symbol.to_string(),
        last_close: closes.last().copied(),
        sma20,
        sma50,
        sma200,
        rsi14,
        trend,
        signal,
        reasons,
    }
}
