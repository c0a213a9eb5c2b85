use bevy::prelude::*;

use crate::error::TrackError;
use crate::geometry::pose;
use crate::prefab::clone_visuals;
use crate::track::TrainTrack;

use super::{PlaceAlongTrack, PlacedInstance, PlacementState, TrackPlacement};

/// Upper bound on objects produced by one placement run.
pub const MAX_PLACED_OBJECTS: usize = 100_000;

/// Walk a polyline and emit a transform every `spacing` units of distance.
///
/// Distance left over at the end of one segment carries into the next, so
/// spacing stays even across sample boundaries. The first object sits on the
/// first point; each faces along the segment it lies on.
///
/// Spacing so small that the run would exceed [`MAX_PLACED_OBJECTS`] is
/// rejected as [`TrackError::InvalidSpacing`].
pub fn place_along_polyline(points: &[Vec3], spacing: f32) -> Result<Vec<Transform>, TrackError> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(TrackError::InvalidSpacing { spacing });
    }
    if points.len() < 2 {
        return Err(TrackError::TooFewControlPoints {
            count: points.len(),
        });
    }

    let total_length: f32 = points.windows(2).map(|pair| pair[0].distance(pair[1])).sum();
    if total_length / spacing >= MAX_PLACED_OBJECTS as f32 {
        return Err(TrackError::InvalidSpacing { spacing });
    }

    let mut transforms = Vec::new();
    let mut distance_covered = 0.0;

    for pair in points.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let segment_length = start.distance(end);

        while distance_covered < segment_length {
            let position = start.lerp(end, distance_covered / segment_length);
            transforms.push(pose(position, end - start, Vec3::Y));
            distance_covered += spacing;
        }

        distance_covered -= segment_length;
    }

    Ok(transforms)
}

/// Run requested placements, replacing each placement's previous batch.
pub fn place_objects_along_track(
    mut commands: Commands,
    mut requests: MessageReader<PlaceAlongTrack>,
    placements: Query<(&TrackPlacement, Option<&PlacementState>)>,
    tracks: Query<&TrainTrack>,
    sources: Query<(
        Option<&Mesh3d>,
        Option<&MeshMaterial3d<StandardMaterial>>,
    )>,
) {
    for request in requests.read() {
        let Ok((placement, state)) = placements.get(request.placement) else {
            warn!("placement request for {:?} has no TrackPlacement", request.placement);
            continue;
        };

        let transforms = tracks
            .get(placement.track)
            .map_err(|_| TrackError::MissingTrack)
            .and_then(|track| {
                track.validate()?;
                place_along_polyline(&track.sample(), placement.spacing)
            });
        let transforms = match transforms {
            Ok(transforms) => transforms,
            Err(err) => {
                warn!("skipping placement {:?}: {err}", request.placement);
                continue;
            }
        };

        // Despawn the previous batch
        if let Some(state) = state {
            for &instance in &state.instances {
                if let Ok(mut entity_commands) = commands.get_entity(instance) {
                    entity_commands.despawn();
                }
            }
        }

        let visuals = sources.get(placement.source).ok();
        let mut instances = Vec::with_capacity(transforms.len());
        for (index, transform) in transforms.into_iter().enumerate() {
            let mut entity_commands = commands.spawn((
                transform,
                PlacedInstance {
                    placement: request.placement,
                    index,
                },
                Visibility::default(),
            ));
            clone_visuals(&mut entity_commands, visuals);
            instances.push(entity_commands.id());
        }

        info!(
            "placed {} objects along track {:?}",
            instances.len(),
            placement.track
        );
        commands
            .entity(request.placement)
            .insert(PlacementState { instances });
    }
}

/// Cleanup instances when a placement is removed.
pub fn cleanup_placements(
    mut commands: Commands,
    mut removed: RemovedComponents<TrackPlacement>,
    instances: Query<(Entity, &PlacedInstance)>,
) {
    for removed_placement in removed.read() {
        for (entity, instance) in &instances {
            if instance.placement == removed_placement {
                commands.entity(entity).despawn();
            }
        }
        if let Ok(mut entity_commands) = commands.get_entity(removed_placement) {
            entity_commands.remove::<PlacementState>();
        }
    }
}
