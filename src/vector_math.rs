//! Basic vector math helper functions.
//! Small helpers for per-frame rotation and heading calculations.
use glam::DVec2;

/// Returns the cached `(cos, sin)` pair for a rotation of `degrees`.
///
/// # Examples
/// ```
/// use ceviwalk::vector_math::rotation_for;
/// let rot = rotation_for(90.0);
/// assert!(rot.x.abs() < 1e-12);
/// assert!((rot.y - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn rotation_for(degrees: f64) -> DVec2 {
    DVec2::from_angle(degrees.to_radians())
}

/// Rotates `vector` by a cached `(cos, sin)` pair.
///
/// Computes `(x·cos − y·sin, x·sin + y·cos)`.
///
/// # Examples
/// ```
/// use ceviwalk::vector_math::{rotate, rotation_for};
/// use glam::DVec2;
/// let turned = rotate(DVec2::X, rotation_for(90.0));
/// assert!(turned.x.abs() < 1e-12);
/// assert!((turned.y - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn rotate(vector: DVec2, rotation: DVec2) -> DVec2 {
    rotation.rotate(vector)
}

/// Heading of `vector` in degrees, normalised to `[0, 360)`.
///
/// The zero vector yields `0.0`, matching `atan2(0, 0)`.
///
/// # Examples
/// ```
/// use ceviwalk::vector_math::heading_degrees;
/// use glam::DVec2;
/// assert!((heading_degrees(DVec2::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn heading_degrees(vector: DVec2) -> f64 {
    (vector.y.atan2(vector.x).to_degrees() + 360.0) % 360.0
}
