use bevy::prelude::*;

use super::{TrackArcLength, TrackControlPoint, TrainTrack};

/// Copy moved control point transforms into their tracks.
pub fn sync_control_points(
    points: Query<(&TrackControlPoint, &Transform), Changed<Transform>>,
    mut tracks: Query<&mut TrainTrack>,
) {
    for (marker, transform) in &points {
        let Ok(mut track) = tracks.get_mut(marker.track) else {
            continue;
        };

        let Some(&current) = track.control_points.get(marker.index) else {
            debug!(
                "control point index {} out of range for track {:?}",
                marker.index, marker.track
            );
            continue;
        };

        // Only touch the track when something moved, so the arc length cache stays put
        if current != transform.translation {
            track.control_points[marker.index] = transform.translation;
        }
    }
}

/// Rebuild the arc length cache of every track that changed this frame.
pub fn refresh_arc_length_tables(
    mut commands: Commands,
    mut tracks: Query<(Entity, &TrainTrack, Option<&mut TrackArcLength>), Changed<TrainTrack>>,
) {
    for (entity, track, cache) in &mut tracks {
        let table = track.arc_length_table();
        debug!(
            "rebuilt arc length table for {entity:?}: {} segments, length {:.3}",
            table.segments(),
            table.total_length()
        );

        match cache {
            Some(mut cache) => cache.0 = table,
            None => {
                commands.entity(entity).insert(TrackArcLength(table));
            }
        }
    }
}
