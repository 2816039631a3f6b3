//! Numeric conversion helpers used across the project.
//!
//! These utilities guard conversions between floating-point and integer
//! domains so the call-sites stay free of raw `as` casts.

/// Floor the value and clamp it into the `i32` domain.
///
/// Non-finite inputs map to `0`.
///
/// # Examples
/// ```
/// use ceviwalk::numeric::floor_to_i32;
/// assert_eq!(floor_to_i32(12.9), 12);
/// assert_eq!(floor_to_i32(-0.5), -1);
/// assert_eq!(floor_to_i32(f64::NAN), 0);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to the i32 bounds before casting."
)]
#[must_use]
pub fn floor_to_i32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let floored = value.floor();
    let clamped = floored.clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    clamped as i32
}

/// Reduce a non-negative whole number of steps modulo `modulus`.
///
/// Returns `0` when `modulus` is zero or `steps` is not a finite,
/// non-negative number.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The remainder lies in 0..modulus, which fits in u32."
)]
#[must_use]
pub fn wrap_steps(steps: f64, modulus: u32) -> u32 {
    if modulus == 0 || !steps.is_finite() || steps < 0.0 {
        return 0;
    }
    let remainder = steps.floor() % f64::from(modulus);
    remainder as u32
}

/// Map a uniform draw in `[0, 1)` onto an index in `0..len`.
///
/// Out-of-range draws are clamped onto the nearest valid index, so the
/// result is always a usable index whenever `len > 0`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "The scaled draw is clamped into 0..len before casting."
)]
#[must_use]
pub fn draw_to_index(draw: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let last = len - 1;
    let scaled = (draw * len as f64).floor();
    if !scaled.is_finite() || scaled <= 0.0 {
        return 0;
    }
    (scaled as usize).min(last)
}
