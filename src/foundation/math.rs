/// `count / total * 100`, short-circuiting to `0.0` when `total` is zero.
pub(crate) fn percent(count: f64, total: f64) -> f64 {
    if total <= 0.0 || !total.is_finite() || !count.is_finite() {
        return 0.0;
    }
    clamp_percent(count / total * 100.0)
}

/// Rounded [`percent`] for labels (`67`, not `66.67`).
pub(crate) fn round_percent(count: u32, total: u32) -> u32 {
    percent(f64::from(count), f64::from(total)).round() as u32
}

/// Clamp into `0..=100`, mapping NaN to `0`.
pub(crate) fn clamp_percent(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
