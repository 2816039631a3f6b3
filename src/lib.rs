#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate for the ceviwalk sprite cast.
//!
//! Three walkers roam a rectangular viewport, bouncing off its edges and
//! following per-character behaviour policies. Sasara and Tsudumi
//! occasionally meet and perform a short choreographed exchange.
//!
//! The simulation core ([`cast`], [`walker`], [`policy`]) is plain Rust
//! driven by an injected [`random::RandomSource`] and a
//! [`render::Renderer`]. [`plugin::WalkerPlugin`] runs it on Bevy's fixed
//! timestep and, with the `render` feature, `PresentationPlugin` draws it.
pub mod cast;
pub mod constants;
pub mod error;
pub mod logging;
pub mod motion;
pub mod numeric;
pub mod plugin;
pub mod policy;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod presentation;
pub mod random;
pub mod render;
pub mod tick;
pub mod vector_math;
pub mod walker;
pub use constants::*;

// Re-export commonly used items
pub use cast::{Cast, CastSnapshot, WalkerSnapshot};
pub use error::{CastError, UnknownMotion};
pub use logging::init as init_logging;
pub use motion::{Motion, Participants, Reaction};
pub use plugin::{CastSettings, CastState, SpriteRequests, WalkerPlugin, WalkerPluginError};
pub use policy::{MotionPolicy, Role};
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use presentation::PresentationPlugin;
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use render::{LogRenderer, Placement, RenderRequest, Renderer};
pub use tick::{drive, CancelHandle, IntervalTicker, ManualTicker, TickSource};
pub use walker::animation::{Facing, SpriteCell};
pub use walker::kinematics::Viewport;
pub use walker::{SpriteMeta, Walker, WalkerId};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use ceviwalk::prelude::*;
    //! ```

    pub use crate::Cast;
    pub use crate::Motion;
    pub use crate::RandomSource;
    pub use crate::Role;
    pub use crate::SeededRandom;
    pub use crate::Viewport;
    pub use crate::WalkerPlugin;
}
