//! Error types for track and train configuration.

/// Errors raised when validating a track, a train, or a batch placement request.
///
/// Per-frame curve math never returns these; degenerate curves fall back to
/// safe defaults instead. Validation happens at configuration boundaries.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    /// A curve needs at least two control points to have a length.
    #[error("track needs at least 2 control points, got {count}")]
    TooFewControlPoints { count: usize },

    /// The curve must be sampled into at least one segment.
    #[error("track segment count must be at least 1")]
    ZeroSegments,

    /// Spacing must be a positive, finite distance.
    #[error("invalid spacing: {spacing}")]
    InvalidSpacing { spacing: f32 },

    /// The referenced track entity does not carry a `TrainTrack`.
    #[error("referenced track entity has no TrainTrack component")]
    MissingTrack,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_include_values() {
        let err = TrackError::TooFewControlPoints { count: 1 };
        assert_eq!(err.to_string(), "track needs at least 2 control points, got 1");

        let err = TrackError::InvalidSpacing { spacing: -0.5 };
        assert!(err.to_string().contains("-0.5"));
    }
}
