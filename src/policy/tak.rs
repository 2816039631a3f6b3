//! Tak wanders alone, alternating turns and changes of pace.

use crate::constants::{
    ACCEL_DOWN, ACCEL_NONE, ACCEL_UP, IDLE_CHANCE, TAK_ACCEL_END_CHANCE, TAK_ACCEL_MIN_FRAMES,
    TAK_MAX_SPEED, TAK_MIN_SPEED, TAK_TURN_END_CHANCE, TAK_TURN_MIN_FRAMES,
};
use crate::motion::Motion;
use crate::random::RandomSource;
use crate::walker::Walker;

use super::{is_decision_frame, start_turn, stop_turning, MotionPolicy};

/// Behaviour of the solitary walker.
#[derive(Debug, Clone, Copy, Default)]
pub struct TakPolicy;

impl MotionPolicy for TakPolicy {
    fn process_motion(
        &self,
        frames: u32,
        tak: &mut Walker,
        _partner: Option<&mut Walker>,
        rng: &mut dyn RandomSource,
    ) {
        match tak.motion() {
            Motion::Default => {
                if is_decision_frame(frames) && rng.exceeds(IDLE_CHANCE) {
                    if rng.pick(2) == 0 {
                        start_turn(tak, rng);
                    } else {
                        tak.enter_motion(Motion::Accel);
                        let accel = if rng.exceeds(0.5) { ACCEL_UP } else { ACCEL_DOWN };
                        tak.set_accel(accel);
                    }
                }
            }
            Motion::Turn => {
                if frames > TAK_TURN_MIN_FRAMES && rng.exceeds(TAK_TURN_END_CHANCE) {
                    stop_turning(tak);
                }
            }
            Motion::Accel => {
                if frames > TAK_ACCEL_MIN_FRAMES && rng.exceeds(TAK_ACCEL_END_CHANCE) {
                    end_accel(tak);
                }
                let speed = tak.speed();
                if !(TAK_MIN_SPEED..=TAK_MAX_SPEED).contains(&speed) {
                    end_accel(tak);
                }
            }
            _ => {}
        }
    }
}

fn end_accel(tak: &mut Walker) {
    tak.enter_motion(Motion::Default);
    tak.set_accel(ACCEL_NONE);
}
