//! Technical indicator calculations.
//!
//! Indicator values are `Option<f64>`: `None` until the warmup window is
//! filled, never a sentinel or NaN.

pub mod sma;
pub mod rsi;
