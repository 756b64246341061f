//! Display conversions
//!
//! Readings arrive in metric units (°C, m/s, hPa). Everything shown to the
//! user is rounded half-up so that `-2.5` becomes `-2` and `2.5` becomes `3`.

/// Round to the nearest integer, halves towards positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Convert Celsius to Fahrenheit (`F = C * 9/5 + 32`), unrounded.
pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Convert wind speed from m/s to whole km/h.
pub fn wind_kmh(meters_per_second: f64) -> i64 {
    round_half_up(meters_per_second * 3.6)
}
