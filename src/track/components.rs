use bevy::prelude::*;

use crate::error::TrackError;

use super::arc_length::ArcLengthTable;
use super::types::{BezierMethod, CurveEvaluator};

/// Default number of segments a track is sampled into.
pub const DEFAULT_TRACK_SEGMENTS: usize = 50;

/// A Bézier track defined by a variable number of control points.
///
/// The whole control point list forms one curve of degree `n - 1`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component, Default)]
pub struct TrainTrack {
    /// Control points defining the curve shape.
    pub control_points: Vec<Vec3>,
    /// Number of segments used for sampling and arc length lookup.
    ///
    /// Also scales how far a train moves in t per unit of velocity.
    pub segments: usize,
    /// How the curve is evaluated.
    pub method: BezierMethod,
}

impl Default for TrainTrack {
    fn default() -> Self {
        Self {
            control_points: Vec::new(),
            segments: DEFAULT_TRACK_SEGMENTS,
            method: BezierMethod::default(),
        }
    }
}

impl TrainTrack {
    /// Create a new track through the given control points.
    pub fn new(control_points: Vec<Vec3>) -> Self {
        Self {
            control_points,
            ..default()
        }
    }

    /// Set the segment count.
    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    /// Set the evaluation method.
    pub fn with_method(mut self, method: BezierMethod) -> Self {
        self.method = method;
        self
    }

    /// Evaluate the track at parameter t (0.0 to 1.0).
    pub fn evaluate(&self, t: f32) -> Vec3 {
        self.method.evaluate(&self.control_points, t)
    }

    /// Unit forward direction at t, `None` where the curve is stationary.
    pub fn forward(&self, t: f32) -> Option<Vec3> {
        self.method.forward(&self.control_points, t)
    }

    /// Check if the track has enough points to move along.
    pub fn is_valid(&self) -> bool {
        self.control_points.len() >= 2 && self.segments >= 1
    }

    /// Validate the track configuration.
    pub fn validate(&self) -> Result<(), TrackError> {
        if self.control_points.len() < 2 {
            return Err(TrackError::TooFewControlPoints {
                count: self.control_points.len(),
            });
        }
        if self.segments == 0 {
            return Err(TrackError::ZeroSegments);
        }
        Ok(())
    }

    /// Sample the curve at `segments + 1` evenly spaced parameters.
    pub fn sample(&self) -> Vec<Vec3> {
        let segments = self.segments.max(1);
        (0..=segments)
            .map(|i| self.evaluate(i as f32 / segments as f32))
            .collect()
    }

    /// Build a fresh arc length table for the current control points.
    pub fn arc_length_table(&self) -> ArcLengthTable {
        ArcLengthTable::build(&self.control_points, self.segments, self.method)
    }
}

/// Cached arc length table for a [`TrainTrack`].
///
/// Inserted and refreshed automatically whenever the track changes.
#[derive(Component, Debug, Clone, Default)]
pub struct TrackArcLength(pub ArcLengthTable);

/// Marks an entity whose [`Transform`] drives one control point of a track.
///
/// Moving the entity moves the control point on the next update.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct TrackControlPoint {
    /// The entity that owns the track.
    pub track: Entity,
    /// The index of this control point in the track.
    pub index: usize,
}
