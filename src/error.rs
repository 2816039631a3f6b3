//! Error types surfaced while building a cast.
//!
//! Steady-state ticks never fail; these errors only arise from bad
//! construction-time inputs or from parsing motion labels.

use thiserror::Error;

/// Failures raised while assembling walkers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CastError {
    /// Sprite metadata that cannot drive the animation pacer.
    #[error("invalid sprite metadata: {detail}")]
    InvalidSpriteMeta {
        /// Which constraint was violated.
        detail: String,
    },
    /// A viewport with non-finite dimensions.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport {
        /// Requested width in pixels.
        width: f64,
        /// Requested height in pixels.
        height: f64,
    },
    /// A tick rate that is not a positive finite frequency.
    #[error("invalid tick rate {hz} Hz")]
    InvalidTickRate {
        /// Requested frequency.
        hz: f64,
    },
}

/// A string that names no known motion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown motion label `{label}`")]
pub struct UnknownMotion {
    /// The rejected label.
    pub label: String,
}
