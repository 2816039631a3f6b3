//! Convenience constructors for walkers and casts used in tests.

use ceviwalk::{Cast, RandomSource, Role, SpriteMeta, Viewport, Walker};
use glam::DVec2;

/// Cell edge length used by the fixtures.
pub const TEST_CELL: f64 = 16.0;

/// Viewport used by the fixtures and the `tick!` macro.
pub const TEST_VIEWPORT: Viewport = Viewport::new(320.0, 240.0);

/// Builds a walker of `role` at `position` moving with `velocity`.
///
/// # Panics
/// Panics if the fixture cell size is rejected, which would be a bug in the
/// fixture itself.
///
/// # Examples
/// ```
/// use ceviwalk::Role;
/// use glam::DVec2;
/// use test_utils::walker_at;
/// let walker = walker_at(Role::Tak, DVec2::new(5.0, 5.0), DVec2::X);
/// assert!((walker.speed() - 1.0).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn walker_at(role: Role, position: DVec2, velocity: DVec2) -> Walker {
    let sprite = SpriteMeta::for_character(TEST_CELL, TEST_CELL, role.char_id())
        .unwrap_or_else(|e| panic!("fixture sprite rejected: {e}"));
    let mut walker = Walker::new(role, sprite);
    walker.set_position(position);
    walker.update_vector(velocity);
    walker
}

/// Spawns a full cast scattered across [`TEST_VIEWPORT`].
///
/// # Panics
/// Panics if the fixture inputs are rejected.
pub fn cast_with(rng: &mut dyn RandomSource) -> Cast {
    Cast::spawn(TEST_CELL, TEST_CELL, TEST_VIEWPORT, rng)
        .unwrap_or_else(|e| panic!("fixture cast rejected: {e}"))
}

/// Moves the walker playing `role` and sets its velocity.
///
/// # Panics
/// Panics if the cast has no walker for `role`.
pub fn place(cast: &mut Cast, role: Role, position: DVec2, velocity: DVec2) {
    let id = cast
        .id_of(role)
        .unwrap_or_else(|| panic!("cast has no {role} walker"));
    let walker = cast
        .walker_mut(id)
        .unwrap_or_else(|| panic!("cast lost walker {id}"));
    walker.set_position(position);
    walker.update_vector(velocity);
}
