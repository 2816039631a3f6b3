//! Utility helpers for tests.
//!
//! Walker fixtures, invariant assertions and a `tick!` macro shared by the
//! integration suites.

pub mod assertions;
pub mod fixtures;

pub use assertions::{assert_contained, assert_speed_consistent};
pub use fixtures::{cast_with, walker_at, TEST_CELL, TEST_VIEWPORT};

/// Advances a cast a number of ticks, collecting render requests.
///
/// `tick!(cast, rng)` runs one tick; `tick!(cast, rng, n)` runs `n`.
/// Both forms return the collected `(WalkerId, RenderRequest)` pairs.
///
/// # Examples
/// ```
/// use ceviwalk::SeededRandom;
/// use test_utils::{cast_with, tick};
/// let mut rng = SeededRandom::from_seed(1);
/// let mut cast = cast_with(&mut rng);
/// let requests = tick!(cast, rng, 2);
/// assert_eq!(requests.len(), 6);
/// ```
#[macro_export]
macro_rules! tick {
    ($cast:expr, $rng:expr) => {
        $crate::tick!($cast, $rng, 1)
    };
    ($cast:expr, $rng:expr, $n:expr) => {{
        let mut sink: Vec<(ceviwalk::WalkerId, ceviwalk::RenderRequest)> = Vec::new();
        for _ in 0..$n {
            $cast.process_all($crate::TEST_VIEWPORT, &mut $rng, &mut sink);
        }
        sink
    }};
}
