/// Rounds half away from zero to `decimals` places.
///
/// `f64::EPSILON` is added to the magnitude before scaling so values such as
/// `1.005` that sit just under a boundary in binary still round up.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return 0.0;
    }
    let factor = 10f64.powi(decimals);
    let magnitude = ((value.abs() + f64::EPSILON) * factor).round() / factor;
    if magnitude == 0.0 {
        0.0
    } else if value < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// `numerator / denominator` as a whole percentage; a zero denominator yields 0.
pub fn percentage(numerator: f64, denominator: f64) -> u32 {
    if denominator <= 0.0 {
        return 0;
    }
    let value = (numerator / denominator * 100.0).round();
    if value.is_finite() && value > 0.0 {
        value as u32
    } else {
        0
    }
}
