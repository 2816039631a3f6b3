//! Invariant checks shared by the integration suites.

use ceviwalk::{Viewport, Walker};

/// Asserts the walker lies within the viewport bounds for its cell size.
///
/// # Panics
/// Panics with the offending position when the walker is outside.
pub fn assert_contained(walker: &Walker, viewport: Viewport) {
    let bound = viewport.bounds_for(walker.sprite().cell_size()).max(glam::DVec2::ZERO);
    let position = walker.position();
    assert!(
        (0.0..=bound.x).contains(&position.x) && (0.0..=bound.y).contains(&position.y),
        "{} walker at {position:?} escaped bounds {bound:?}",
        walker.role()
    );
}

/// Asserts the cached speed matches the velocity length.
///
/// # Panics
/// Panics when the two differ by more than a relative `1e-9`.
pub fn assert_speed_consistent(walker: &Walker) {
    let length = walker.velocity().length();
    let tolerance = 1e-9 * length.max(1.0);
    assert!(
        (walker.speed() - length).abs() <= tolerance,
        "{} walker speed {} differs from |v| = {length}",
        walker.role(),
        walker.speed()
    );
}
