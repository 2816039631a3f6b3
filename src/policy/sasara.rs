//! Sasara wanders, homes in on Tsudumi and drives their communication.

use glam::DVec2;
use log::debug;

use crate::constants::{
    ACCEL_DOWN, ACCEL_NONE, ACCEL_UP, COMMUNICATE_ALIGN_CELLS, COMMUNICATE_FACING_SPEED,
    COMMUNICATE_MAX_CELLS, COMMUNICATE_RELEASE_BOOST, COMMUNICATE_RELEASE_CHANCE,
    COMMUNICATE_ROTATE_CHANCE, HOMING_END_SPEED, HOMING_END_SPIN_DECAY, HOMING_MAX_SPEED,
    HOMING_SATISFIED_DISTANCE, HOMING_STEER_GAIN, REACTION_FRAMES, REACTION_SPIN,
    SASARA_RESTLESS_FRAMES, SASARA_WANDER_CHANCE, STEP_MASK, TURN_FRAMES,
};
use crate::motion::{Motion, Participants, Reaction};
use crate::random::RandomSource;
use crate::walker::Walker;

use super::{is_decision_frame, settle_after_parting, start_turn, stop_turning, MotionPolicy};

/// Behaviour of the walker that seeks out Tsudumi.
#[derive(Debug, Clone, Copy, Default)]
pub struct SasaraPolicy;

impl MotionPolicy for SasaraPolicy {
    fn process_motion(
        &self,
        frames: u32,
        sasara: &mut Walker,
        partner: Option<&mut Walker>,
        rng: &mut dyn RandomSource,
    ) {
        match sasara.motion() {
            Motion::TsudumiHomingEnd => {
                if sasara.speed() < HOMING_END_SPEED {
                    sasara.enter_motion(Motion::Default);
                    sasara.set_accel(ACCEL_NONE);
                }
            }
            Motion::Turn => {
                if frames == TURN_FRAMES {
                    stop_turning(sasara);
                }
            }
            Motion::CommunicateTsudumiEnd => settle_after_parting(frames, sasara),
            Motion::Accel | Motion::CommunicateSasara | Motion::CommunicateSasaraEnd => {}
            partnered => {
                // The remaining states read or write Tsudumi.
                let Some(tsudumi) = partner else {
                    return;
                };
                match partnered {
                    Motion::Default => wander(frames, sasara, tsudumi, rng),
                    Motion::TsudumiHoming => home(frames, sasara, tsudumi),
                    Motion::CommunicateTsudumi => choose_reaction(sasara, tsudumi, rng),
                    Motion::Communicate(reaction, participants) => {
                        react(frames, reaction, participants, sasara, tsudumi);
                    }
                    _ => {}
                }
            }
        }
    }
}

fn wander(frames: u32, sasara: &mut Walker, tsudumi: &mut Walker, rng: &mut dyn RandomSource) {
    if !is_decision_frame(frames) {
        return;
    }
    if try_begin_communication(sasara, tsudumi) {
        return;
    }
    if frames > SASARA_RESTLESS_FRAMES && rng.exceeds(SASARA_WANDER_CHANCE) {
        if rng.pick(2) == 0 {
            sasara.enter_motion(Motion::TsudumiHoming);
            sasara.set_accel(ACCEL_UP);
        } else {
            start_turn(sasara, rng);
        }
    }
}

fn home(frames: u32, sasara: &mut Walker, tsudumi: &mut Walker) {
    if sasara.speed() > HOMING_MAX_SPEED {
        sasara.set_accel(ACCEL_NONE);
    }
    if !is_decision_frame(frames) {
        return;
    }
    if try_begin_communication(sasara, tsudumi) {
        return;
    }

    let offset = tsudumi.position() - sasara.position();
    let distance = offset.length();
    if distance < HOMING_SATISFIED_DISTANCE {
        sasara.enter_motion(Motion::TsudumiHomingEnd);
        sasara.set_accel(ACCEL_DOWN);
        sasara.set_angle(sasara.angle() * HOMING_END_SPIN_DECAY);
        return;
    }
    sasara.set_angle(steering_angle(sasara.velocity(), offset, distance));
}

/// Spin that turns `velocity` toward a target `offset` away.
///
/// A target behind the walker gets a fixed hard turn. Only the sign of the
/// dot product matters, so a stationary walker needs no division and simply
/// gets no spin.
fn steering_angle(velocity: DVec2, offset: DVec2, distance: f64) -> f64 {
    if offset.dot(velocity) < 0.0 {
        HOMING_STEER_GAIN
    } else {
        HOMING_STEER_GAIN * velocity.perp_dot(offset) / distance
    }
}

/// Starts the communicate routine when Tsudumi is close and roughly lined
/// up on either axis.
fn try_begin_communication(sasara: &mut Walker, tsudumi: &mut Walker) -> bool {
    let offset = tsudumi.position() - sasara.position();
    let distance = offset.length();
    let width = sasara.sprite().cell_width();
    let height = sasara.sprite().cell_height();

    let near = width < distance && distance < width * COMMUNICATE_MAX_CELLS;
    let aligned = offset.x.abs() < width * COMMUNICATE_ALIGN_CELLS
        || offset.y.abs() < height * COMMUNICATE_ALIGN_CELLS;
    if !(near && aligned) {
        return false;
    }

    debug!("sasara meets tsudumi at distance {distance:.1}");
    sasara.enter_motion(Motion::CommunicateTsudumi);
    sasara.set_angle(0.0);
    // A zero vector would lose the facing, so keep a vanishing one.
    sasara.update_vector(offset / distance * COMMUNICATE_FACING_SPEED);

    tsudumi.enter_motion(Motion::CommunicateSasara);
    tsudumi.set_angle(0.0);
    tsudumi.update_vector(-sasara.velocity());
    true
}

fn choose_reaction(sasara: &mut Walker, tsudumi: &mut Walker, rng: &mut dyn RandomSource) {
    if rng.exceeds(COMMUNICATE_RELEASE_CHANCE) {
        part(sasara, tsudumi);
        return;
    }
    let reaction = if rng.exceeds(COMMUNICATE_ROTATE_CHANCE) {
        Reaction::Rotate
    } else {
        Reaction::Step
    };
    let participants = match rng.pick(Participants::ALL.len()) {
        0 => Participants::Sasara,
        1 => Participants::Tsudumi,
        _ => Participants::Both,
    };
    sasara.enter_motion(Motion::Communicate(reaction, participants));
}

/// Sends the dyad off in opposite directions.
fn part(sasara: &mut Walker, tsudumi: &mut Walker) {
    let boosted = sasara.velocity() * COMMUNICATE_RELEASE_BOOST;

    tsudumi.enter_motion(Motion::CommunicateSasaraEnd);
    tsudumi.update_vector(boosted);
    tsudumi.set_accel(ACCEL_UP);

    sasara.enter_motion(Motion::CommunicateTsudumiEnd);
    sasara.update_vector(-boosted);
    sasara.set_accel(ACCEL_UP);
}

fn react(
    frames: u32,
    reaction: Reaction,
    participants: Participants,
    sasara: &mut Walker,
    tsudumi: &mut Walker,
) {
    match reaction {
        Reaction::Rotate => {
            let spin = if frames & 1 == 1 { REACTION_SPIN } else { 0.0 };
            if participants.includes_driver() {
                sasara.set_angle(spin);
            }
            if participants.includes_partner() {
                tsudumi.set_angle(spin);
            }
        }
        Reaction::Step => {
            if frames & STEP_MASK == 0 {
                if participants.includes_driver() {
                    sasara.increment_anime_frame();
                }
                if participants.includes_partner() {
                    tsudumi.increment_anime_frame();
                }
            }
        }
    }
    if frames == REACTION_FRAMES {
        sasara.enter_motion(Motion::CommunicateTsudumi);
    }
}
