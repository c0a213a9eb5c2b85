//! # bevy_train_track
//!
//! A Bevy plugin for trains running on Bézier tracks.
//!
//! ## Features
//!
//! - Bézier tracks of any degree, evaluated by de Casteljau reduction or in
//!   closed form for cubics
//! - Arc length tables for converting between curve parameter and distance
//! - Keyboard-driven trains with friction and optional slope gravity
//! - Rolling stock spaced by true arc length or by curve parameter
//! - One-shot placement of objects (sleepers, posts) along a track
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_train_track::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(TrainPlugin)
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands) {
//!     let track = commands
//!         .spawn(TrainTrack::new(vec![
//!             Vec3::new(0.0, 0.0, 0.0),
//!             Vec3::new(0.0, 0.0, 10.0),
//!             Vec3::new(10.0, 0.0, 10.0),
//!             Vec3::new(10.0, 0.0, 0.0),
//!         ]))
//!         .id();
//!
//!     commands.spawn((
//!         Transform::default(),
//!         TrainController::new(track).with_rolling_stock(3, 2.0),
//!     ));
//! }
//! ```
//!
//! ## Plugins
//!
//! - [`TrackPlugin`]: Track types, control point sync and arc length caching (required)
//! - [`TrainPlugin`]: Keyboard-driven trains with rolling stock (optional)
//! - [`TrackPlacementPlugin`]: Batch placement of objects along a track (optional)
//!
//! The math underneath is usable without an `App`: see [`track::de_casteljau`],
//! [`track::ArcLengthTable`] and [`train::TrainController::tick`].

pub mod error;
pub mod geometry;
pub mod placement;
pub mod prefab;
pub mod track;
pub mod train;

pub use error::TrackError;
pub use placement::TrackPlacementPlugin;
pub use track::TrackPlugin;
pub use train::TrainPlugin;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::error::TrackError;
    pub use crate::placement::{
        PlaceAlongTrack, PlacedInstance, TrackPlacement, TrackPlacementPlugin,
    };
    pub use crate::prefab::PrefabSource;
    pub use crate::track::{
        ArcLengthTable, BezierMethod, CurveEvaluator, TrackArcLength, TrackControlPoint,
        TrackPlugin, TrackSystems, TrainTrack,
    };
    pub use crate::train::{
        DriveBindings, DriveInput, MotionModel, RollingStock, SpacingPolicy, TrainController,
        TrainEvent, TrainEventKind, TrainPlugin,
    };
}
