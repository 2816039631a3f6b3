//! Named motion states shared by every walker's state machine.
//!
//! Each variant renders to the label used in logs and snapshots, and the
//! labels parse back into the same variant.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownMotion;

/// Who takes part in a communicate reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Participants {
    /// Only Sasara reacts.
    Sasara,
    /// Only Tsudumi reacts.
    Tsudumi,
    /// Both walkers react.
    Both,
}

impl Participants {
    /// All participant sets in draw order.
    pub const ALL: [Self; 3] = [Self::Sasara, Self::Tsudumi, Self::Both];

    /// Whether Sasara, the walker driving the reaction, takes part.
    #[must_use]
    pub const fn includes_driver(self) -> bool {
        matches!(self, Self::Sasara | Self::Both)
    }

    /// Whether Tsudumi, the partner, takes part.
    #[must_use]
    pub const fn includes_partner(self) -> bool {
        matches!(self, Self::Tsudumi | Self::Both)
    }
}

/// The kind of gesture performed during a communicate reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reaction {
    /// Spin on the spot.
    Rotate,
    /// Mark time by stepping through animation frames.
    Step,
}

/// The current named state of a walker's behaviour state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Motion {
    /// Free wandering.
    #[default]
    Default,
    /// A timed spin at a constant rate.
    Turn,
    /// Tak's sustained speed change.
    Accel,
    /// Sasara steering toward Tsudumi.
    TsudumiHoming,
    /// Sasara slowing down after homing in.
    TsudumiHomingEnd,
    /// Sasara facing Tsudumi, choosing the next reaction.
    CommunicateTsudumi,
    /// A single reaction during the communication.
    Communicate(Reaction, Participants),
    /// Sasara walking away after the communication.
    CommunicateTsudumiEnd,
    /// Tsudumi held in place while Sasara drives the communication.
    CommunicateSasara,
    /// Tsudumi walking away after the communication.
    CommunicateSasaraEnd,
}

impl Motion {
    /// Every motion, in declaration order.
    pub const ALL: [Self; 15] = [
        Self::Default,
        Self::Turn,
        Self::Accel,
        Self::TsudumiHoming,
        Self::TsudumiHomingEnd,
        Self::CommunicateTsudumi,
        Self::Communicate(Reaction::Rotate, Participants::Sasara),
        Self::Communicate(Reaction::Rotate, Participants::Tsudumi),
        Self::Communicate(Reaction::Rotate, Participants::Both),
        Self::Communicate(Reaction::Step, Participants::Sasara),
        Self::Communicate(Reaction::Step, Participants::Tsudumi),
        Self::Communicate(Reaction::Step, Participants::Both),
        Self::CommunicateTsudumiEnd,
        Self::CommunicateSasara,
        Self::CommunicateSasaraEnd,
    ];

    /// The label naming this motion.
    ///
    /// # Examples
    /// ```
    /// use ceviwalk::motion::{Motion, Participants, Reaction};
    /// let motion = Motion::Communicate(Reaction::Step, Participants::Both);
    /// assert_eq!(motion.as_str(), "communicate-step-both");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Turn => "turn",
            Self::Accel => "accel",
            Self::TsudumiHoming => "tsudumi-homing",
            Self::TsudumiHomingEnd => "tsudumi-homing-end",
            Self::CommunicateTsudumi => "communicate-tsudumi",
            Self::Communicate(Reaction::Rotate, Participants::Sasara) => {
                "communicate-rotate-sasara"
            }
            Self::Communicate(Reaction::Rotate, Participants::Tsudumi) => {
                "communicate-rotate-tsudumi"
            }
            Self::Communicate(Reaction::Rotate, Participants::Both) => "communicate-rotate-both",
            Self::Communicate(Reaction::Step, Participants::Sasara) => "communicate-step-sasara",
            Self::Communicate(Reaction::Step, Participants::Tsudumi) => {
                "communicate-step-tsudumi"
            }
            Self::Communicate(Reaction::Step, Participants::Both) => "communicate-step-both",
            Self::CommunicateTsudumiEnd => "communicate-tsudumi-end",
            Self::CommunicateSasara => "communicate-sasara",
            Self::CommunicateSasaraEnd => "communicate-sasara-end",
        }
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Motion {
    type Err = UnknownMotion;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|motion| motion.as_str() == label)
            .ok_or_else(|| UnknownMotion {
                label: label.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn every_label_parses_back() {
        for motion in Motion::ALL {
            assert_eq!(motion.as_str().parse::<Motion>(), Ok(motion));
        }
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<&str> = Motion::ALL.iter().map(|m| m.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Motion::ALL.len());
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "communicate-dance-both".parse::<Motion>().unwrap_err();
        assert_eq!(err.label, "communicate-dance-both");
    }

    #[rstest]
    #[case::sasara(Participants::Sasara, true, false)]
    #[case::tsudumi(Participants::Tsudumi, false, true)]
    #[case::both(Participants::Both, true, true)]
    fn participants_membership(
        #[case] participants: Participants,
        #[case] driver: bool,
        #[case] partner: bool,
    ) {
        assert_eq!(participants.includes_driver(), driver);
        assert_eq!(participants.includes_partner(), partner);
    }
}
