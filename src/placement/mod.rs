mod components;
mod systems;

pub use components::*;
pub use systems::{
    cleanup_placements, place_along_polyline, place_objects_along_track, MAX_PLACED_OBJECTS,
};

use bevy::prelude::*;

use crate::track::{TrackPlugin, TrackSystems};

/// Plugin for stamping copies of a template entity along a track.
///
/// Placement is a one-shot authoring operation: write a [`PlaceAlongTrack`]
/// message to (re)generate the batch from the current curve. Later track edits
/// do not move placed objects.
///
/// # Usage
///
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_train_track::prelude::*;
///
/// fn setup(mut commands: Commands, track: Entity, sleeper: Entity) {
///     commands.spawn(TrackPlacement::new(track, sleeper).with_spacing(0.5));
/// }
///
/// fn place_on_key(
///     keyboard: Res<ButtonInput<KeyCode>>,
///     placements: Query<Entity, With<TrackPlacement>>,
///     mut requests: MessageWriter<PlaceAlongTrack>,
/// ) {
///     if keyboard.just_pressed(KeyCode::KeyP) {
///         for placement in &placements {
///             requests.write(PlaceAlongTrack { placement });
///         }
///     }
/// }
/// ```
pub struct TrackPlacementPlugin;

impl Plugin for TrackPlacementPlugin {
    fn build(&self, app: &mut App) {
        // Ensure TrackPlugin is added
        if !app.is_plugin_added::<TrackPlugin>() {
            app.add_plugins(TrackPlugin);
        }

        app.register_type::<TrackPlacement>()
            .register_type::<PlacedInstance>()
            .add_message::<PlaceAlongTrack>()
            .add_systems(
                Update,
                (systems::place_objects_along_track, systems::cleanup_placements)
                    .chain()
                    .after(TrackSystems),
            );
    }
}
