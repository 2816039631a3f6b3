//! Tsudumi strolls at a steady pace and follows Sasara's lead when they meet.

use crate::constants::{
    ACCEL_DOWN, ACCEL_NONE, ACCEL_UP, IDLE_CHANCE, TSUDUMI_FAST_SPEED, TSUDUMI_SLOW_SPEED,
    TURN_FRAMES,
};
use crate::motion::Motion;
use crate::random::RandomSource;
use crate::walker::Walker;

use super::{is_decision_frame, settle_after_parting, start_turn, stop_turning, MotionPolicy};

/// Behaviour of Sasara's partner.
#[derive(Debug, Clone, Copy, Default)]
pub struct TsudumiPolicy;

impl MotionPolicy for TsudumiPolicy {
    fn process_motion(
        &self,
        frames: u32,
        tsudumi: &mut Walker,
        _partner: Option<&mut Walker>,
        rng: &mut dyn RandomSource,
    ) {
        match tsudumi.motion() {
            Motion::Default => {
                tsudumi.set_accel(cruise_accel(tsudumi.speed()));
                if is_decision_frame(frames) && rng.exceeds(IDLE_CHANCE) {
                    start_turn(tsudumi, rng);
                }
            }
            Motion::Turn => {
                if frames == TURN_FRAMES {
                    stop_turning(tsudumi);
                }
            }
            Motion::CommunicateSasaraEnd => settle_after_parting(frames, tsudumi),
            // Sasara drives the communication.
            _ => {}
        }
    }
}

/// Dead-band speed keeper.
const fn cruise_accel(speed: f64) -> f64 {
    if speed > TSUDUMI_FAST_SPEED {
        ACCEL_DOWN
    } else if speed < TSUDUMI_SLOW_SPEED {
        ACCEL_UP
    } else {
        ACCEL_NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Role;
    use crate::random::ScriptedRandom;
    use crate::walker::SpriteMeta;
    use approx::assert_relative_eq;
    use glam::DVec2;
    use rstest::rstest;

    fn tsudumi(velocity: DVec2) -> Walker {
        let sprite = SpriteMeta::for_character(16.0, 16.0, Role::Tsudumi.char_id()).unwrap();
        let mut walker = Walker::new(Role::Tsudumi, sprite);
        walker.update_vector(velocity);
        walker
    }

    #[rstest]
    #[case::fast(0.8, ACCEL_DOWN)]
    #[case::slow(0.3, ACCEL_UP)]
    #[case::cruising(0.55, ACCEL_NONE)]
    fn keeps_speed_in_band(#[case] speed: f64, #[case] expected: f64) {
        let mut walker = tsudumi(DVec2::new(speed, 0.0));
        let mut rng = ScriptedRandom::default();
        TsudumiPolicy.process_motion(1, &mut walker, None, &mut rng);
        assert_relative_eq!(walker.accel(), expected);
        assert_eq!(walker.motion(), Motion::Default);
    }

    #[test]
    fn turns_rarely_and_for_a_fixed_time() {
        let mut walker = tsudumi(DVec2::new(0.55, 0.0));
        let mut rng = ScriptedRandom::new([0.99, 0.6]);
        TsudumiPolicy.process_motion(16, &mut walker, None, &mut rng);
        assert_eq!(walker.motion(), Motion::Turn);
        assert_relative_eq!(walker.angle(), 0.75);

        TsudumiPolicy.process_motion(119, &mut walker, None, &mut rng);
        assert_eq!(walker.motion(), Motion::Turn);
        TsudumiPolicy.process_motion(120, &mut walker, None, &mut rng);
        assert_eq!(walker.motion(), Motion::Default);
        assert_relative_eq!(walker.angle(), 0.0);
    }

    #[test]
    fn stays_passive_while_communicating() {
        let mut walker = tsudumi(DVec2::new(1e-4, 0.0));
        walker.enter_motion(Motion::CommunicateSasara);
        walker.set_accel(ACCEL_UP);
        let mut rng = ScriptedRandom::new([0.999]);
        TsudumiPolicy.process_motion(16, &mut walker, None, &mut rng);
        assert_eq!(walker.motion(), Motion::CommunicateSasara);
        assert_relative_eq!(walker.accel(), ACCEL_UP);
        assert_eq!(rng.remaining(), 1);
    }
}
