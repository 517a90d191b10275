//! Integer bell-price rounding and chance formatting.
//!
//! The game materializes a price as `purchase * multiplier` rounded to the
//! nearest bell with halves rounding up. Reproducing that rounding exactly is
//! what keeps predicted bounds from drifting off the in-game values by one
//! bell.

/// Round a non-negative price product to whole bells, halves up.
///
/// Implemented as `floor(x + 0.5)` in `f64` after widening, never banker's
/// rounding. Halfway behaviour for negative inputs is unspecified; the
/// engine only produces non-negative products.
pub fn round_bells(value: f32) -> i32 {
    (f64::from(value) + 0.5).floor() as i32
}

/// Round a probability to display precision (four decimal places, XX.XX%).
///
/// A `-0.0` result is flipped to `+0.0` so serialized chances never carry a
/// negative sign.
pub fn round_chance(value: f64) -> f64 {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        return 0.0;
    }
    rounded
}
