//! Injected uniform random sources.
//!
//! Every probabilistic decision in the motion policies goes through
//! [`RandomSource`], so a run is reproducible from a seed and tests can
//! replay an exact sequence of draws with [`ScriptedRandom`].

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::numeric::draw_to_index;

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    /// Returns the next uniform draw in `[0, 1)`.
    fn next_draw(&mut self) -> f64;

    /// Draws once and reports whether the draw exceeds `threshold`.
    fn exceeds(&mut self, threshold: f64) -> bool {
        self.next_draw() > threshold
    }

    /// Draws once and maps the result onto `0..len`.
    fn pick(&mut self, len: usize) -> usize {
        draw_to_index(self.next_draw(), len)
    }

    /// Draws once and returns `magnitude` or `-magnitude` with equal odds.
    fn signed(&mut self, magnitude: f64) -> f64 {
        if self.exceeds(0.5) {
            magnitude
        } else {
            -magnitude
        }
    }

    /// Draws once and scales the result onto `[low, high)`.
    fn between(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_draw() * (high - low)
    }
}

/// Seedable source backed by [`SmallRng`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    /// Creates a reproducible source from `seed`.
    ///
    /// # Examples
    /// ```
    /// use ceviwalk::random::{RandomSource, SeededRandom};
    /// let mut a = SeededRandom::from_seed(7);
    /// let mut b = SeededRandom::from_seed(7);
    /// assert_eq!(a.next_draw().to_bits(), b.next_draw().to_bits());
    /// ```
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Uses `seed` when present, entropy otherwise.
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }
}

impl RandomSource for SeededRandom {
    fn next_draw(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, then repeats a fallback value.
///
/// # Examples
/// ```
/// use ceviwalk::random::{RandomSource, ScriptedRandom};
/// let mut rng = ScriptedRandom::new([0.99, 0.1]);
/// assert!(rng.exceeds(0.98));
/// assert!(!rng.exceeds(0.5));
/// assert_eq!(rng.remaining(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRandom {
    /// Creates a source replaying `draws` and then returning `0.0`.
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: 0.0,
        }
    }

    /// Replaces the value returned once the script runs out.
    #[must_use]
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Appends further draws to the script.
    pub fn push(&mut self, draw: f64) {
        self.draws.push_back(draw);
    }

    /// Number of scripted draws not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_draw(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn seeded_draws_stay_in_unit_interval() {
        let mut rng = SeededRandom::from_seed(42);
        for _ in 0..1000 {
            let draw = rng.next_draw();
            assert!((0.0..1.0).contains(&draw), "draw {draw} outside [0, 1)");
        }
    }

    #[test]
    fn scripted_falls_back_when_exhausted() {
        let mut rng = ScriptedRandom::new([0.25]).with_fallback(0.75);
        assert!((rng.next_draw() - 0.25).abs() < f64::EPSILON);
        assert!((rng.next_draw() - 0.75).abs() < f64::EPSILON);
        assert!((rng.next_draw() - 0.75).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case::above(0.6, 0.75)]
    #[case::at_threshold(0.5, -0.75)]
    #[case::below(0.2, -0.75)]
    fn signed_splits_at_half(#[case] draw: f64, #[case] expected: f64) {
        let mut rng = ScriptedRandom::new([draw]);
        assert!((rng.signed(0.75) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn between_scales_draw() {
        let mut rng = ScriptedRandom::new([0.25]);
        assert!((rng.between(-1.0, 1.0) + 0.5).abs() < f64::EPSILON);
    }
}
