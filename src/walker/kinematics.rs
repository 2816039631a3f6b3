//! Per-frame position and velocity integration with boundary containment.
//!
//! The step runs after the motion policy: clamp, rotate, accelerate,
//! reflect off the viewport edges, then commit the move.

use glam::DVec2;
use serde::Serialize;

use crate::error::CastError;
use crate::vector_math::rotate;

use super::Walker;

/// Viewport bounds in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport of the given size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Rejects non-finite dimensions.
    ///
    /// Zero or negative sizes are accepted; walkers are then pinned to the
    /// origin.
    ///
    /// # Errors
    /// Returns [`CastError::InvalidViewport`] if either dimension is NaN or
    /// infinite.
    pub fn validated(self) -> Result<Self, CastError> {
        if self.width.is_finite() && self.height.is_finite() {
            Ok(self)
        } else {
            Err(CastError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Largest top-left coordinate that keeps a cell of `cell` size inside.
    #[must_use]
    pub fn bounds_for(self, cell: DVec2) -> DVec2 {
        DVec2::new(self.width, self.height) - cell
    }
}

/// Forces `value` into `[0, bound]`, pinning to `0` when `bound < 0`.
fn contain_axis(value: f64, bound: f64) -> f64 {
    value.min(bound).max(0.0)
}

fn contain(position: DVec2, bound: DVec2) -> DVec2 {
    DVec2::new(contain_axis(position.x, bound.x), contain_axis(position.y, bound.y))
}

const fn leaves_axis(predicted: f64, bound: f64) -> bool {
    predicted < 0.0 || predicted > bound
}

impl Walker {
    /// Applies one kinematics step within `viewport`.
    ///
    /// Each axis whose predicted position leaves the bounds has its velocity
    /// component reflected and the spin halved and reversed.
    pub fn integrate(&mut self, viewport: Viewport) {
        let bound = viewport.bounds_for(self.sprite.cell_size());
        self.position = contain(self.position, bound);

        self.velocity = rotate(self.velocity, self.rotation) * self.accel;
        self.speed *= self.accel;

        let predicted = self.position + self.velocity;
        if leaves_axis(predicted.x, bound.x) {
            self.velocity.x = -self.velocity.x;
            self.set_angle(-self.angle * 0.5);
        }
        if leaves_axis(predicted.y, bound.y) {
            self.velocity.y = -self.velocity.y;
            self.set_angle(-self.angle * 0.5);
        }

        // A reflected step longer than the viewport could still overshoot.
        self.position = contain(self.position + self.velocity, bound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Role;
    use crate::walker::SpriteMeta;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn walker_at(position: DVec2, velocity: DVec2) -> Walker {
        let sprite = SpriteMeta::for_character(10.0, 10.0, 2).unwrap();
        let mut walker = Walker::new(Role::Tak, sprite);
        walker.set_position(position);
        walker.update_vector(velocity);
        walker
    }

    #[test]
    fn reflects_off_left_edge() {
        let mut walker = walker_at(DVec2::new(0.0, 50.0), DVec2::new(-1.0, 0.0));
        walker.integrate(Viewport::new(100.0, 100.0));
        assert_relative_eq!(walker.velocity().x, 1.0);
        assert_relative_eq!(walker.position().x, 1.0);
    }

    #[test]
    fn reflection_halves_and_reverses_spin() {
        let mut walker = walker_at(DVec2::new(89.5, 50.0), DVec2::new(1.0, 0.0));
        walker.set_angle(0.0);
        walker.integrate(Viewport::new(100.0, 100.0));
        assert_relative_eq!(walker.angle(), 0.0);

        let mut spinning = walker_at(DVec2::new(89.5, 50.0), DVec2::new(1.0, 0.0));
        spinning.set_angle(2.0);
        spinning.integrate(Viewport::new(100.0, 100.0));
        assert_relative_eq!(spinning.angle(), -1.0);
    }

    #[test]
    fn corner_reflects_both_axes() {
        let mut walker = walker_at(DVec2::new(0.2, 0.2), DVec2::new(-0.5, -0.5));
        walker.set_angle(4.0);
        walker.integrate(Viewport::new(100.0, 100.0));
        assert!(walker.velocity().x > 0.0);
        assert!(walker.velocity().y > 0.0);
        assert_relative_eq!(walker.angle(), 1.0);
    }

    #[test]
    fn clamps_drift_before_moving() {
        let mut walker = walker_at(DVec2::new(250.0, -30.0), DVec2::ZERO);
        walker.integrate(Viewport::new(100.0, 100.0));
        assert_relative_eq!(walker.position().x, 90.0);
        assert_relative_eq!(walker.position().y, 0.0);
    }

    #[test]
    fn accel_scales_velocity_and_speed() {
        let mut walker = walker_at(DVec2::new(50.0, 50.0), DVec2::new(0.6, 0.8));
        walker.set_accel(1.5);
        walker.integrate(Viewport::new(100.0, 100.0));
        assert_relative_eq!(walker.speed(), 1.5);
        assert_relative_eq!(walker.velocity().length(), 1.5, epsilon = 1e-12);
    }

    #[rstest]
    #[case::zero(0.0, 0.0)]
    #[case::smaller_than_cell(4.0, 6.0)]
    #[case::negative(-20.0, -5.0)]
    fn degenerate_viewport_pins_to_origin(#[case] width: f64, #[case] height: f64) {
        let mut walker = walker_at(DVec2::new(3.0, 3.0), DVec2::new(1.0, 1.0));
        walker.integrate(Viewport::new(width, height));
        assert_relative_eq!(walker.position().x, 0.0);
        assert_relative_eq!(walker.position().y, 0.0);
    }

    #[test]
    fn non_finite_viewport_is_rejected() {
        assert!(Viewport::new(f64::NAN, 10.0).validated().is_err());
        assert!(Viewport::new(-5.0, 10.0).validated().is_ok());
    }
}
