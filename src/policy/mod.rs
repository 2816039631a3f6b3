//! Per-role behaviour state machines.
//!
//! Each [`Role`] dispatches to a stateless [`MotionPolicy`] that mutates the
//! walker (and, for Sasara, its partner) once per tick before kinematics run.

mod sasara;
mod tak;
mod tsudumi;

use std::fmt;

use serde::Serialize;

use crate::constants::{
    ACCEL_NONE, DECISION_MASK, PARTING_CRUISE_SPEED, PARTING_FRAMES, TURN_ANGLE,
};
use crate::motion::Motion;
use crate::random::RandomSource;
use crate::walker::Walker;

pub use sasara::SasaraPolicy;
pub use tak::TakPolicy;
pub use tsudumi::TsudumiPolicy;

/// The character a walker plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    /// Drives the communicate routine with Tsudumi.
    Sasara,
    /// Sasara's partner; passive while communicating.
    Tsudumi,
    /// Wanders alone.
    Tak,
}

impl Role {
    /// Every role, in processing order.
    pub const ALL: [Self; 3] = [Self::Sasara, Self::Tsudumi, Self::Tak];

    /// Row group on the sprite sheet.
    #[must_use]
    pub const fn char_id(self) -> u32 {
        match self {
            Self::Tsudumi => 0,
            Self::Sasara => 1,
            Self::Tak => 2,
        }
    }

    /// The policy evaluated for walkers of this role.
    #[must_use]
    pub fn policy(self) -> &'static dyn MotionPolicy {
        match self {
            Self::Sasara => &SasaraPolicy,
            Self::Tsudumi => &TsudumiPolicy,
            Self::Tak => &TakPolicy,
        }
    }

    /// Lowercase name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sasara => "sasara",
            Self::Tsudumi => "tsudumi",
            Self::Tak => "tak",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-tick behaviour hook run before the kinematics step.
pub trait MotionPolicy: Sync {
    /// Mutates `walker` for a tick observed at `frames` into its motion.
    ///
    /// `partner` is the collaboration target when the role has one and it
    /// could be borrowed for this tick.
    fn process_motion(
        &self,
        frames: u32,
        walker: &mut Walker,
        partner: Option<&mut Walker>,
        rng: &mut dyn RandomSource,
    );
}

/// Whether `frames` is one of the periodic decision frames.
pub(crate) const fn is_decision_frame(frames: u32) -> bool {
    frames & DECISION_MASK == 0
}

/// Enters `turn` with a randomly signed rotation rate.
pub(crate) fn start_turn(walker: &mut Walker, rng: &mut dyn RandomSource) {
    walker.enter_motion(Motion::Turn);
    let angle = rng.signed(TURN_ANGLE);
    walker.set_angle(angle);
}

/// Returns to `default` with no spin.
pub(crate) fn stop_turning(walker: &mut Walker) {
    walker.set_angle(0.0);
    walker.enter_motion(Motion::Default);
}

/// Winds down the burst of speed given when the dyad parts.
pub(crate) fn settle_after_parting(frames: u32, walker: &mut Walker) {
    if walker.speed() > PARTING_CRUISE_SPEED {
        walker.set_accel(ACCEL_NONE);
    }
    if frames > PARTING_FRAMES && has_neutral_accel(walker) {
        walker.enter_motion(Motion::Default);
    }
}

fn has_neutral_accel(walker: &Walker) -> bool {
    (walker.accel() - ACCEL_NONE).abs() < f64::EPSILON
}
