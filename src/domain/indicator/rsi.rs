//! RSI (Relative Strength Index) with Wilder smoothing.
//!
//! - Seed: simple mean of gains/losses over the first `period` deltas.
//! - Subsequent: avg = (prev_avg * (period - 1) + current) / period.
//! - RSI = 100 - 100 / (1 + avg_gain / avg_loss); avg_loss == 0 → 100.
//!
//! The smoothing is recursive, so the calculation must run from the first
//! delta over the entire available history. Restarting the recursion near
//! the end of the series produces a different (wrong) value.

/// Final RSI over the whole of `values`. `None` when fewer than
/// `period + 1` values are available or `period` is 0.
pub fn wilder(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period + 1 {
        return None;
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for i in 1..=period {
        let delta = values[i] - values[i - 1];
        if delta > 0.0 {
            avg_gain += delta;
        } else {
            avg_loss += -delta;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    for i in period + 1..values.len() {
        let delta = values[i] - values[i - 1];
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { -delta } else { 0.0 };
        avg_gain = (avg_gain * (period - 1) as f64 + gain) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + loss) / period as f64;
    }

    if avg_loss == 0.0 {
        return Some(100.0);
    }
    Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
}
