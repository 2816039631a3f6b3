//! The physics and animation record shared by every walker.
//!
//! A [`Walker`] owns its kinematic state, its motion label and its animation
//! pacer. Behaviour lives in the role's [`MotionPolicy`](crate::policy::MotionPolicy);
//! the walker only exposes explicit mutators so every side effect (trig
//! caching, frame counter reset, speed recomputation) happens in one place.

pub mod animation;
pub mod kinematics;

use std::fmt;

use glam::DVec2;
use log::debug;
use serde::Serialize;

use crate::constants::{ACCEL_NONE, FRAME_COUNT};
use crate::error::CastError;
use crate::motion::Motion;
use crate::policy::Role;
use crate::random::RandomSource;
use crate::render::RenderRequest;
use crate::vector_math::rotation_for;

use self::animation::AnimationPacer;
use self::kinematics::Viewport;

/// Stable identifier of a walker within a [`Cast`](crate::cast::Cast).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WalkerId(pub u32);

impl fmt::Display for WalkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable sprite metadata fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteMeta {
    cell_width: f64,
    cell_height: f64,
    frame_count: u32,
    frame_speed: f64,
    char_id: u32,
}

impl SpriteMeta {
    /// Validates and builds sprite metadata.
    ///
    /// # Errors
    /// Returns [`CastError::InvalidSpriteMeta`] when a cell dimension or the
    /// frame speed is not a positive finite number, or `frame_count` is zero.
    pub fn new(
        cell_width: f64,
        cell_height: f64,
        frame_count: u32,
        frame_speed: f64,
        char_id: u32,
    ) -> Result<Self, CastError> {
        let positive = |value: f64| value.is_finite() && value > 0.0;
        if !positive(cell_width) || !positive(cell_height) {
            return Err(CastError::InvalidSpriteMeta {
                detail: format!("cell size {cell_width}x{cell_height} must be positive"),
            });
        }
        if frame_count == 0 {
            return Err(CastError::InvalidSpriteMeta {
                detail: "frame count must be non-zero".to_owned(),
            });
        }
        if !positive(frame_speed) {
            return Err(CastError::InvalidSpriteMeta {
                detail: format!("frame speed {frame_speed} must be positive"),
            });
        }
        Ok(Self {
            cell_width,
            cell_height,
            frame_count,
            frame_speed,
            char_id,
        })
    }

    /// Metadata for one character of the standard sheet layout: four
    /// animation frames, advancing once per quarter cell travelled.
    ///
    /// # Errors
    /// Propagates [`SpriteMeta::new`] validation failures.
    ///
    /// # Examples
    /// ```
    /// use ceviwalk::walker::SpriteMeta;
    /// let meta = SpriteMeta::for_character(16.0, 16.0, 1).unwrap();
    /// assert_eq!(meta.frame_count(), 4);
    /// assert!((meta.frame_speed() - 4.0).abs() < f64::EPSILON);
    /// ```
    pub fn for_character(cell_width: f64, cell_height: f64, char_id: u32) -> Result<Self, CastError> {
        Self::new(
            cell_width,
            cell_height,
            FRAME_COUNT,
            cell_width / f64::from(FRAME_COUNT),
            char_id,
        )
    }

    /// Cell width in pixels.
    #[must_use]
    pub const fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Cell height in pixels.
    #[must_use]
    pub const fn cell_height(&self) -> f64 {
        self.cell_height
    }

    /// Cell size as a vector.
    #[must_use]
    pub const fn cell_size(&self) -> DVec2 {
        DVec2::new(self.cell_width, self.cell_height)
    }

    /// Animation frames per cycle.
    #[must_use]
    pub const fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Distance travelled per animation frame advance.
    #[must_use]
    pub const fn frame_speed(&self) -> f64 {
        self.frame_speed
    }

    /// Row group selector on the sprite sheet.
    #[must_use]
    pub const fn char_id(&self) -> u32 {
        self.char_id
    }
}

/// One autonomous sprite agent.
#[derive(Debug, Clone)]
pub struct Walker {
    role: Role,
    partner: Option<WalkerId>,
    sprite: SpriteMeta,
    position: DVec2,
    velocity: DVec2,
    speed: f64,
    accel: f64,
    angle: f64,
    rotation: DVec2,
    motion: Motion,
    motion_frames: Option<u32>,
    pacer: AnimationPacer,
}

impl Walker {
    /// Creates a stationary walker at the origin in the `default` motion.
    #[must_use]
    pub fn new(role: Role, sprite: SpriteMeta) -> Self {
        Self {
            role,
            partner: None,
            sprite,
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            speed: 0.0,
            accel: ACCEL_NONE,
            angle: 0.0,
            rotation: rotation_for(0.0),
            motion: Motion::Default,
            motion_frames: None,
            pacer: AnimationPacer::default(),
        }
    }

    /// Behaviour role selecting the motion policy.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Collaboration target, if any.
    #[must_use]
    pub const fn partner(&self) -> Option<WalkerId> {
        self.partner
    }

    /// Assigns the collaboration target.
    pub fn set_partner(&mut self, partner: Option<WalkerId>) {
        self.partner = partner;
    }

    /// Sprite metadata.
    #[must_use]
    pub const fn sprite(&self) -> &SpriteMeta {
        &self.sprite
    }

    /// Current position in viewport pixels.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Moves the walker without touching its velocity.
    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }

    /// Current per-frame velocity.
    #[must_use]
    pub const fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Length of the velocity vector.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Sets the velocity and recomputes the speed.
    pub fn update_vector(&mut self, velocity: DVec2) {
        self.velocity = velocity;
        self.speed = velocity.length();
    }

    /// Per-frame multiplicative speed factor.
    #[must_use]
    pub const fn accel(&self) -> f64 {
        self.accel
    }

    /// Replaces the per-frame speed factor.
    pub fn set_accel(&mut self, accel: f64) {
        self.accel = accel;
    }

    /// Per-frame rotation rate in degrees.
    #[must_use]
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// Sets the rotation rate and refreshes the cached trig pair.
    pub fn set_angle(&mut self, degrees: f64) {
        self.angle = degrees;
        self.rotation = rotation_for(degrees);
    }

    /// Cached `(cos, sin)` of the rotation rate.
    #[must_use]
    pub const fn rotation(&self) -> DVec2 {
        self.rotation
    }

    /// Current motion label.
    #[must_use]
    pub const fn motion(&self) -> Motion {
        self.motion
    }

    /// Enters `motion`; the next tick observes frame count `0`.
    pub fn enter_motion(&mut self, motion: Motion) {
        if motion != self.motion {
            debug!("{} walker: {} -> {}", self.role, self.motion, motion);
        }
        self.motion = motion;
        self.motion_frames = None;
    }

    /// Frames elapsed in the current motion, or `None` when it was entered
    /// after the last tick.
    #[must_use]
    pub const fn frames_in_motion(&self) -> Option<u32> {
        self.motion_frames
    }

    /// Current animation column.
    #[must_use]
    pub const fn anime_frame(&self) -> u32 {
        self.pacer.frame()
    }

    /// Distance accumulated toward the next animation advance.
    #[must_use]
    pub const fn moved(&self) -> f64 {
        self.pacer.moved()
    }

    /// Advances the animation column by one regardless of distance.
    pub fn increment_anime_frame(&mut self) {
        self.pacer.step(&self.sprite);
    }

    /// Advances the motion frame counter and returns the value the policy
    /// observes this tick.
    fn begin_frame(&mut self) -> u32 {
        let frames = self.motion_frames.map_or(0, |frames| frames.saturating_add(1));
        self.motion_frames = Some(frames);
        frames
    }

    /// Runs one full tick: motion policy, kinematics, animation.
    ///
    /// `partner` is the walker this one collaborates with, already looked
    /// up by the caller. The returned request always carries the
    /// destination; the sprite cell is present only when it changed.
    pub fn process(
        &mut self,
        partner: Option<&mut Self>,
        viewport: Viewport,
        rng: &mut dyn RandomSource,
    ) -> RenderRequest {
        let frames = self.begin_frame();
        self.role.policy().process_motion(frames, self, partner, rng);
        self.integrate(viewport);
        self.pacer.advance(self.speed, &self.sprite);
        self.render_request()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;
    use approx::assert_relative_eq;

    fn tak() -> Walker {
        let sprite = SpriteMeta::for_character(16.0, 16.0, 2).unwrap();
        Walker::new(Role::Tak, sprite)
    }

    #[test]
    fn update_vector_recomputes_speed() {
        let mut walker = tak();
        walker.update_vector(DVec2::new(3.0, -4.0));
        assert_relative_eq!(walker.speed(), 5.0);
    }

    #[test]
    fn set_angle_caches_trig() {
        let mut walker = tak();
        walker.set_angle(60.0);
        assert_relative_eq!(walker.rotation().x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(walker.rotation().y, 3.0_f64.sqrt() / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn enter_motion_restarts_frame_count() {
        let mut walker = tak();
        let mut rng = ScriptedRandom::default().with_fallback(0.0);
        let viewport = Viewport::new(200.0, 200.0);
        walker.set_position(DVec2::new(100.0, 100.0));
        walker.update_vector(DVec2::new(0.5, 0.0));
        for _ in 0..5 {
            let _request = walker.process(None, viewport, &mut rng);
        }
        assert_eq!(walker.frames_in_motion(), Some(4));

        walker.enter_motion(Motion::Turn);
        assert_eq!(walker.frames_in_motion(), None);
        let _request = walker.process(None, viewport, &mut rng);
        assert_eq!(walker.frames_in_motion(), Some(0));
    }

    #[test]
    fn sprite_meta_rejects_zero_frames() {
        let err = SpriteMeta::new(16.0, 16.0, 0, 4.0, 0).unwrap_err();
        assert!(matches!(err, CastError::InvalidSpriteMeta { .. }));
    }

    #[test]
    fn sprite_meta_rejects_non_positive_cells() {
        assert!(SpriteMeta::new(0.0, 16.0, 4, 4.0, 0).is_err());
        assert!(SpriteMeta::new(16.0, f64::NAN, 4, 4.0, 0).is_err());
        assert!(SpriteMeta::new(16.0, 16.0, 4, -1.0, 0).is_err());
    }
}
