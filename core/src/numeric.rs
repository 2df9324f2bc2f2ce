//! Rounding shared by every integer metric in the report.

/// Round half away from zero into a non-negative integer. Negative and NaN
/// inputs collapse to 0; event distances are checked for sign on extraction.
pub fn round_metric(value: f64) -> u64 {
    value.round() as u64
}
