//! Zero-safe numeric helpers shared by the aggregation passes.
//!
//! Every ratio and average in the report goes through these so that an
//! empty corpus produces zeros instead of NaN or a panic.

/// Mean of `sum` over `count`, 0.0 when the denominator is empty.
pub fn safe_average(sum: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// `part / total` as a percentage rounded to two decimals, 0.0 for an
/// empty total.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64 * 100.0)
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
