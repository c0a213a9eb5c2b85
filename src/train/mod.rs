//! Train plugin for driving a consist along a track.
//!
//! A train is an entity with a [`TrainController`] pointing at a
//! [`TrainTrack`](crate::track::TrainTrack). Each frame the keyboard is read
//! into [`DriveInput`], the train's velocity is integrated, and the train plus
//! its rolling stock are snapped onto the curve.
//!
//! # Example
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use bevy_train_track::prelude::*;
//!
//! fn setup(mut commands: Commands) {
//!     let track = commands.spawn(TrainTrack::new(vec![
//!         Vec3::new(0.0, 0.0, 0.0),
//!         Vec3::new(0.0, 0.0, 10.0),
//!         Vec3::new(10.0, 0.0, 10.0),
//!         Vec3::new(10.0, 0.0, 0.0),
//!     ])).id();
//!
//!     commands.spawn((
//!         Transform::default(),
//!         TrainController::new(track)
//!             .with_rolling_stock(4, 2.0)
//!             .with_slope_gravity(9.8),
//!     ));
//! }
//! ```
//!
//! # Spacing Policies
//!
//! - `ArcLength`: cars keep a constant distance along the curve (default)
//! - `Parametric`: cars keep a constant offset in t, spacing varies with curvature

mod components;
mod motion;
mod systems;

pub use components::*;
pub use motion::{advance_parameter, apply_friction, integrate_velocity, trailing_parameter};
pub use systems::{cleanup_consists, read_drive_input, rebuild_consists, update_trains};

use bevy::prelude::*;

use crate::track::{TrackPlugin, TrackSystems};

/// Plugin that moves trains and their rolling stock along tracks.
pub struct TrainPlugin;

impl Plugin for TrainPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<TrackPlugin>() {
            app.add_plugins(TrackPlugin);
        }

        app.register_type::<TrainController>()
            .register_type::<RollingStock>()
            .register_type::<SpacingPolicy>()
            .register_type::<DriveInput>()
            .init_resource::<DriveInput>()
            .init_resource::<DriveBindings>()
            .add_message::<TrainEvent>()
            .add_systems(
                Update,
                (
                    systems::read_drive_input,
                    systems::rebuild_consists,
                    systems::update_trains,
                    systems::cleanup_consists,
                )
                    .chain()
                    .after(TrackSystems),
            );
    }
}
