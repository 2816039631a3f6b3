//! Captures `WalkerPluginError` events raised while building an app.
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use ceviwalk::WalkerPluginError;

/// Error details recorded by the observer, oldest first.
#[derive(Resource, Default, Debug)]
pub struct CapturedErrors(pub Vec<String>);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_error(event: On<WalkerPluginError>, mut errors: ResMut<CapturedErrors>) {
    errors.0.push(event.event().detail.clone());
}

/// Installs the capturing observer; call before adding `WalkerPlugin`.
pub fn install_error_observer(app: &mut App) {
    app.insert_resource(CapturedErrors::default());
    app.world_mut().add_observer(record_error);
}
