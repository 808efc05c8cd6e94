#![forbid(unsafe_code)]

/// Integer percentage rounded to the nearest whole number; 0 when the
/// denominator is 0.
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}
