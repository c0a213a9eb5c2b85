use bevy::prelude::*;

/// Component describing a batch of objects to stamp along a track.
///
/// Nothing is spawned until a [`PlaceAlongTrack`] message names this entity.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct TrackPlacement {
    /// The track entity to place along.
    pub track: Entity,
    /// The template entity to clone.
    /// This entity should have a `PrefabSource` component.
    pub source: Entity,
    /// Distance between consecutive objects, measured along the sampled curve.
    pub spacing: f32,
}

impl Default for TrackPlacement {
    fn default() -> Self {
        Self {
            track: Entity::PLACEHOLDER,
            source: Entity::PLACEHOLDER,
            spacing: 1.0,
        }
    }
}

impl TrackPlacement {
    /// Create a new placement along a track.
    pub fn new(track: Entity, source: Entity) -> Self {
        Self {
            track,
            source,
            ..default()
        }
    }

    /// Set the spacing between objects.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }
}

/// Request to run a [`TrackPlacement`] once, replacing any previous batch.
#[derive(Message, Debug, Clone, Copy)]
pub struct PlaceAlongTrack {
    /// The entity carrying the `TrackPlacement`.
    pub placement: Entity,
}

/// Marker component added to placed object entities.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlacedInstance {
    /// The placement controller entity.
    pub placement: Entity,
    /// The index of this object along the track.
    pub index: usize,
}

/// Internal component to track the spawned batch.
#[derive(Component, Debug, Clone, Default)]
pub(crate) struct PlacementState {
    /// Currently spawned instance entities.
    pub instances: Vec<Entity>,
}
