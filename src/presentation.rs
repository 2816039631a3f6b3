//! Presentation layer drawing the cast with Bevy sprites.
//!
//! `PresentationPlugin` spawns the camera and one atlas sprite per walker,
//! keeps the cast's viewport in step with the primary window and applies the
//! queued [`SpriteRequests`] to each sprite's `Transform` and atlas index.
//! It never feeds anything back into the simulation apart from the viewport
//! size.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use hashbrown::HashMap;
use log::warn;

use crate::constants::{CHARACTER_COUNT, FACINGS_PER_CHARACTER, FRAME_COUNT};
use crate::plugin::{CastSettings, CastState, CastSystems, SpriteRequests};
use crate::render::RenderRequest;
use crate::walker::kinematics::Viewport;
use crate::walker::WalkerId;

/// Atlas columns on the sprite sheet: one per character facing.
pub const ATLAS_COLUMNS: u32 = CHARACTER_COUNT * FACINGS_PER_CHARACTER;

/// Links a sprite entity to the walker it draws.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkerSprite(pub WalkerId);

/// Spawns a `Camera2d` unless the host application already did.
fn camera_setup(mut commands: Commands, cameras: Query<&Camera2d>) {
    if cameras.is_empty() {
        commands.spawn((Camera2d, Name::new("CastCamera")));
    }
}

/// Loads the sprite sheet and spawns one sprite per walker.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn spawn_walker_sprites(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    settings: Res<CastSettings>,
    cast_state: Option<Res<CastState>>,
) {
    let Some(state) = cast_state else {
        warn!("no cast to draw; skipping sprite spawn");
        return;
    };
    let image = asset_server.load(settings.sprite_sheet.clone());
    let layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::splat(settings.cell_size),
        ATLAS_COLUMNS,
        FRAME_COUNT,
        None,
        None,
    ));

    for (id, walker) in state.cast.walkers() {
        commands.spawn((
            Sprite::from_atlas_image(
                image.clone(),
                TextureAtlas {
                    layout: layout.clone(),
                    index: 0,
                },
            ),
            Transform::default(),
            WalkerSprite(id),
            Name::new(walker.role().as_str()),
        ));
    }
}

/// Copies the primary window's size into the cast's viewport.
///
/// The first size seen before any tick also re-scatters the walkers.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn sync_viewport_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    cast_state: Option<ResMut<CastState>>,
) {
    let (Ok(window), Some(mut state)) = (windows.single(), cast_state) else {
        return;
    };
    let viewport = Viewport::new(f64::from(window.width()), f64::from(window.height()));
    if state.viewport != viewport {
        state.resize(viewport);
    }
}

/// Moves sprites to their latest placement and swaps changed atlas cells.
pub fn apply_sprite_requests_system(
    mut requests: ResMut<SpriteRequests>,
    cast_state: Option<Res<CastState>>,
    mut sprites: Query<(&WalkerSprite, &mut Transform, &mut Sprite)>,
) {
    let Some(state) = cast_state else {
        return;
    };
    let pending: HashMap<WalkerId, RenderRequest> = requests.drain().collect();
    if pending.is_empty() {
        return;
    }

    for (walker, mut transform, mut sprite) in &mut sprites {
        let Some(request) = pending.get(&walker.0) else {
            continue;
        };
        let Some(cell_size) = state.cast.walker(walker.0).map(|w| w.sprite().cell_size()) else {
            continue;
        };
        transform.translation = request
            .placement
            .to_world(state.viewport, cell_size)
            .as_vec3();
        if let (Some(cell), Some(atlas)) = (request.cell, sprite.texture_atlas.as_mut()) {
            atlas.index = cell.atlas_index(ATLAS_COLUMNS);
        }
    }
}

/// Plugin drawing the cast; add it after [`WalkerPlugin`](crate::plugin::WalkerPlugin).
#[derive(Debug, Default)]
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CastSettings>()
            .init_resource::<SpriteRequests>()
            .add_systems(Startup, (camera_setup, spawn_walker_sprites))
            .add_systems(
                FixedUpdate,
                sync_viewport_system.before(CastSystems::Advance),
            )
            .add_systems(Update, apply_sprite_requests_system);
    }
}
