//! Small numeric helpers shared by the statistics and forecast engines.

use serde::Serialize;

// ---

/// Relative change (against the older mean) a bucket must exceed before its
/// trend is classified as anything other than stable. Tunable.
pub const TREND_THRESHOLD_RATIO: f64 = 0.05;

/// Direction of a channel inside one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    // ---
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Smallest and largest value, or `None` for an empty slice.
pub fn extrema(values: &[f64]) -> Option<(f64, f64)> {
    // ---
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Population standard deviation (no Bessel correction); `0.0` when empty.
pub fn population_std_dev(values: &[f64]) -> f64 {
    // ---
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Classify a newest-first series by comparing its first third against its
/// last third.
///
/// The recent slice is `values[..n/3]` and the older slice is the last
/// `n/3` values. Fewer than three values always classify as stable because
/// the recent slice would be empty.
pub fn classify_trend(values: &[f64]) -> Trend {
    // ---
    let n = values.len();
    let third = n / 3;
    if n < 2 || third == 0 {
        return Trend::Stable;
    }

    let recent = mean(&values[..third]);
    let older = mean(&values[n - third..]);

    let change = recent - older;
    let threshold = older.abs() * TREND_THRESHOLD_RATIO;

    if change > threshold {
        Trend::Increasing
    } else if change < -threshold {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}
