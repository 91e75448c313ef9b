//! Simple moving average.
//!
//! [`rolling`] maintains a running sum (add the newest value, subtract the
//! one falling out of the window) so the whole series costs O(N), not
//! O(N·period).

/// Rolling SMA over `values`. Index `i` holds `Some(mean)` for
/// `i >= period - 1` and `None` during warmup. A zero period yields all
/// `None`.
pub fn rolling(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let mut result = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= period {
            sum -= values[i - period];
        }
        if i >= period - 1 {
            result.push(Some(sum / period as f64));
        } else {
            result.push(None);
        }
    }
    result
}

/// SMA of the most recent `period` values, or `None` when the series is
/// shorter than the window.
pub fn latest(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let sum: f64 = values[values.len() - period..].iter().sum();
    Some(sum / period as f64)
}
