mod arc_length;
mod components;
mod systems;
mod types;

pub use arc_length::ArcLengthTable;
pub use components::*;
pub use systems::{refresh_arc_length_tables, sync_control_points};
pub use types::*;

use bevy::prelude::*;

use crate::prefab::{hide_prefab_sources, PrefabSource};

/// System set for keeping track geometry current.
///
/// Anything reading [`TrackArcLength`] during `Update` should run after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackSystems;

/// Plugin that registers track types and keeps arc length caches fresh.
pub struct TrackPlugin;

impl Plugin for TrackPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<BezierMethod>()
            .register_type::<TrainTrack>()
            .register_type::<TrackControlPoint>()
            .register_type::<PrefabSource>()
            .add_systems(
                Update,
                (
                    hide_prefab_sources,
                    systems::sync_control_points,
                    systems::refresh_arc_length_tables,
                )
                    .chain()
                    .in_set(TrackSystems),
            );
    }
}
