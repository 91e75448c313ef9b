//! Typed analysis settings, read through [`ConfigPort`] and validated.
//!
//! INI layout:
//!
//! ```ini
//! [backtest]
//! fast_period = 50
//! slow_period = 200
//!
//! [fundamentals]
//! ratio_scale = fraction   ; or "percent"
//! ```
//!
//! Everything is optional; defaults reproduce the upstream behavior exactly
//! (50/200 crossover, ratios passed through unscaled).

use super::backtest::CrossoverParams;
use super::error::StocklensError;
use crate::ports::config_port::ConfigPort;

/// How upstream percentage-like ratios (ROE, profit margin) are scaled.
/// `Fraction` means 0.18-style values and is a strict pass-through;
/// `Percent` means 18-style values, divided by 100 on parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatioScale {
    #[default]
    Fraction,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalysisSettings {
    pub crossover: CrossoverParams,
    pub ratio_scale: RatioScale,
}

impl AnalysisSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, StocklensError> {
        let fast_period = read_period(config, "fast_period", 50)?;
        let slow_period = read_period(config, "slow_period", 200)?;
        if fast_period >= slow_period {
            return Err(StocklensError::ConfigInvalid {
                section: "backtest".into(),
                key: "fast_period".into(),
                reason: format!(
                    "fast_period ({fast_period}) must be less than slow_period ({slow_period})"
                ),
            });
        }

        let ratio_scale = match config.get_string("fundamentals", "ratio_scale") {
            None => RatioScale::default(),
            Some(v) => match v.to_lowercase().as_str() {
                "fraction" => RatioScale::Fraction,
                "percent" => RatioScale::Percent,
                other => {
                    return Err(StocklensError::ConfigInvalid {
                        section: "fundamentals".into(),
                        key: "ratio_scale".into(),
                        reason: format!("expected \"fraction\" or \"percent\", got \"{other}\""),
                    });
                }
            },
        };

        Ok(Self {
            crossover: CrossoverParams {
                fast_period,
                slow_period,
            },
            ratio_scale,
        })
    }
}

fn read_period(
    config: &dyn ConfigPort,
    key: &str,
    default: i64,
) -> Result<usize, StocklensError> {
    let value = config.get_int("backtest", key, default);
    if value < 1 {
        return Err(StocklensError::ConfigInvalid {
            section: "backtest".into(),
            key: key.into(),
            reason: format!("period must be at least 1, got {value}"),
        });
    }
    Ok(value as usize)
}
