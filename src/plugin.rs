//! Bevy plugin advancing the cast on the fixed timestep.
//!
//! [`WalkerPlugin`] inserts a [`CastState`] resource built from
//! [`CastSettings`] and runs one cast tick per `FixedUpdate` run. Render
//! requests are merged into [`SpriteRequests`] for whichever presentation
//! layer is installed to drain.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use hashbrown::HashMap;
use log::{debug, error};
use thiserror::Error;

use crate::cast::Cast;
use crate::constants::{
    DEFAULT_CELL_SIZE, DEFAULT_SPRITE_SHEET, DEFAULT_TICK_HZ, DEFAULT_VIEWPORT_HEIGHT,
    DEFAULT_VIEWPORT_WIDTH,
};
use crate::error::CastError;
use crate::random::{RandomSource, SeededRandom};
use crate::render::{RenderRequest, Renderer};
use crate::walker::kinematics::Viewport;
use crate::walker::WalkerId;

/// Startup configuration for the cast.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CastSettings {
    /// Edge length of a sprite cell in pixels.
    pub cell_size: u32,
    /// Simulation ticks per second.
    pub tick_hz: f64,
    /// Viewport used until a window reports its size.
    pub viewport: Viewport,
    /// Seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Sprite sheet path relative to the asset directory.
    pub sprite_sheet: String,
}

impl Default for CastSettings {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            tick_hz: DEFAULT_TICK_HZ,
            viewport: Viewport::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
            seed: None,
            sprite_sheet: DEFAULT_SPRITE_SHEET.to_owned(),
        }
    }
}

/// The running cast together with its viewport and random source.
#[derive(Resource)]
pub struct CastState {
    /// The walkers.
    pub cast: Cast,
    /// Current viewport bounds.
    pub viewport: Viewport,
    rng: Box<dyn RandomSource>,
}

impl CastState {
    /// Spawns a cast as described by `settings`.
    ///
    /// # Errors
    /// Returns [`CastError`] when the tick rate, viewport or cell size is
    /// unusable.
    pub fn from_settings(settings: &CastSettings) -> Result<Self, CastError> {
        if !(settings.tick_hz.is_finite() && settings.tick_hz > 0.0) {
            return Err(CastError::InvalidTickRate {
                hz: settings.tick_hz,
            });
        }
        let mut rng = SeededRandom::from_optional_seed(settings.seed);
        let cell = f64::from(settings.cell_size);
        let cast = Cast::spawn(cell, cell, settings.viewport, &mut rng)?;
        Ok(Self::new(cast, settings.viewport, Box::new(rng)))
    }

    /// Wraps an existing cast.
    #[must_use]
    pub fn new(cast: Cast, viewport: Viewport, rng: Box<dyn RandomSource>) -> Self {
        Self {
            cast,
            viewport,
            rng,
        }
    }

    /// Adopts a new viewport size.
    ///
    /// Before the first tick the walkers are scattered again across the new
    /// size, so a window larger than the configured viewport is used in full.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        if self.cast.ticks() > 0 {
            return;
        }
        if let Ok(bounds) = viewport.validated() {
            self.cast.scatter(bounds, self.rng.as_mut());
            debug!(
                "rescattered the cast across {}x{}",
                bounds.width, bounds.height
            );
        }
    }

    /// Runs one tick, forwarding requests to `renderer`.
    pub fn advance(&mut self, renderer: &mut dyn Renderer) {
        self.cast
            .process_all(self.viewport, self.rng.as_mut(), renderer);
    }
}

/// Render requests waiting for the presentation layer, one per walker.
///
/// Several fixed ticks may run between two frames. The newest placement
/// wins, and a cell is only replaced by a newer cell.
#[derive(Resource, Debug, Default)]
pub struct SpriteRequests {
    pending: HashMap<WalkerId, RenderRequest>,
}

impl SpriteRequests {
    /// Pending request for `walker`.
    #[must_use]
    pub fn get(&self, walker: WalkerId) -> Option<&RenderRequest> {
        self.pending.get(&walker)
    }

    /// Number of walkers with a pending request.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every pending request.
    pub fn drain(&mut self) -> impl Iterator<Item = (WalkerId, RenderRequest)> + '_ {
        self.pending.drain()
    }
}

impl Renderer for SpriteRequests {
    fn present(&mut self, walker: WalkerId, request: &RenderRequest) {
        let entry = self.pending.entry(walker).or_insert(*request);
        entry.placement = request.placement;
        if request.cell.is_some() {
            entry.cell = request.cell;
        }
    }
}

/// System sets configured by [`WalkerPlugin`].
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CastSystems {
    /// Advances the cast one tick.
    Advance,
}

/// Event raised when the plugin cannot build its cast.
#[derive(Event, Debug, Clone, Error)]
#[error("walker plugin failed: {detail}")]
pub struct WalkerPluginError {
    /// Description of the underlying error.
    pub detail: String,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn log_walker_error(event: On<WalkerPluginError>) {
    error!("{}", event.event());
}

/// Advances the cast one tick and queues the render requests.
pub fn advance_cast_system(mut state: ResMut<CastState>, mut requests: ResMut<SpriteRequests>) {
    state.advance(&mut *requests);
}

/// Bevy plugin owning the cast.
#[derive(Debug, Clone, Default)]
pub struct WalkerPlugin {
    /// Configuration used to spawn the cast.
    pub settings: CastSettings,
}

impl Plugin for WalkerPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_walker_error);

        let state = match CastState::from_settings(&self.settings) {
            Ok(state) => state,
            Err(e) => {
                app.world_mut().trigger(WalkerPluginError {
                    detail: e.to_string(),
                });
                return;
            }
        };

        app.insert_resource(self.settings.clone())
            .insert_resource(state)
            .init_resource::<SpriteRequests>()
            .insert_resource(Time::<Fixed>::from_hz(self.settings.tick_hz))
            .add_systems(FixedUpdate, advance_cast_system.in_set(CastSystems::Advance));
    }
}
