//! Arc length tables for Bézier tracks.
//!
//! The curve is sampled at `segments + 1` evenly spaced parameters and the
//! straight-line distance between consecutive samples is accumulated. No
//! numeric integration is involved, so the table underestimates the true length
//! by an amount that shrinks as `segments` grows.

use bevy::prelude::*;

use super::{BezierMethod, CurveEvaluator};

/// Cumulative distance lookup for converting between t and arc length.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLengthTable {
    /// Cumulative distance at sample `i`, where sample `i` sits at `t = i / segments`.
    cumulative: Vec<f32>,
}

impl Default for ArcLengthTable {
    fn default() -> Self {
        Self {
            cumulative: vec![0.0, 0.0],
        }
    }
}

impl ArcLengthTable {
    /// Build a table by sampling the curve at `segments + 1` parameters.
    ///
    /// A segment count of zero is treated as one.
    pub fn build(points: &[Vec3], segments: usize, method: BezierMethod) -> Self {
        let segments = segments.max(1);
        let mut cumulative = Vec::with_capacity(segments + 1);
        let mut total = 0.0;
        let mut prev_point = method.evaluate(points, 0.0);

        cumulative.push(0.0);

        for i in 1..=segments {
            let t = i as f32 / segments as f32;
            let point = method.evaluate(points, t);
            total += prev_point.distance(point);
            cumulative.push(total);
            prev_point = point;
        }

        Self { cumulative }
    }

    /// Number of segments the curve was divided into.
    pub fn segments(&self) -> usize {
        self.cumulative.len() - 1
    }

    /// Cumulative distances, one per sample.
    pub fn cumulative(&self) -> &[f32] {
        &self.cumulative
    }

    /// Total sampled length of the curve.
    pub fn total_length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Whether every entry is at least as large as the one before it.
    pub fn is_monotonic(&self) -> bool {
        self.cumulative.windows(2).all(|w| w[1] >= w[0])
    }

    /// Get the arc length at parameter t.
    ///
    /// Interpolates linearly between the two samples bracketing t. The
    /// parameter is clamped to [0, 1], so `t = 1` returns the total length.
    pub fn arc_length_at_t(&self, t: f32) -> f32 {
        let segments = self.segments();
        let scaled = t.clamp(0.0, 1.0) * segments as f32;
        let index = (scaled.floor() as usize).min(segments - 1);
        let fraction = scaled - index as f32;

        let l0 = self.cumulative[index];
        let l1 = self.cumulative[index + 1];
        l0 + (l1 - l0) * fraction
    }

    /// Find the parameter t at a given arc length.
    ///
    /// Scans for the interval containing `distance` and interpolates the
    /// fractional sample index. Distances outside [0, total] (including ones
    /// that overshoot through rounding) fall back to `0.0`. Callers wrap
    /// distances modulo [`total_length`](Self::total_length) before lookup.
    pub fn t_at_arc_length(&self, distance: f32) -> f32 {
        self.try_t_at_arc_length(distance).unwrap_or(0.0)
    }

    /// Like [`t_at_arc_length`](Self::t_at_arc_length), but returns `None`
    /// instead of falling back when `distance` lies outside the table.
    pub fn try_t_at_arc_length(&self, distance: f32) -> Option<f32> {
        let segments = self.segments() as f32;

        self.cumulative
            .windows(2)
            .position(|w| w[0] <= distance && distance <= w[1])
            .map(|i| {
                let l0 = self.cumulative[i];
                let l1 = self.cumulative[i + 1];
                let span = l1 - l0;
                if span <= f32::EPSILON {
                    return i as f32 / segments;
                }
                (i as f32 + (distance - l0) / span) / segments
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_table(segments: usize) -> ArcLengthTable {
        ArcLengthTable::build(
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 10.0),
                Vec3::new(10.0, 0.0, 10.0),
                Vec3::new(10.0, 0.0, 0.0),
            ],
            segments,
            BezierMethod::Auto,
        )
    }

    #[test]
    fn reference_curve_length() {
        let table = reference_table(50);
        assert_eq!(table.cumulative().len(), 51);
        assert_eq!(table.cumulative()[0], 0.0);
        // Analytic length is 20, the 50-segment polyline is just short of it
        assert!((table.total_length() - 20.0).abs() < 0.01);
        assert!(table.total_length() <= 20.0 + 1e-4);
    }

    #[test]
    fn arc_length_endpoints() {
        let table = reference_table(50);

        assert_eq!(table.arc_length_at_t(0.0), 0.0);
        assert!((table.arc_length_at_t(0.9999) - table.total_length()).abs() < 0.01);
        assert!((table.arc_length_at_t(1.0) - table.total_length()).abs() < 1e-5);
    }

    #[test]
    fn table_is_monotonic() {
        // Deterministic point clouds of every small size, including repeats
        for count in 2..=8 {
            for seed in 0..4 {
                let points: Vec<Vec3> = (0..count)
                    .map(|i| {
                        let a = (i * 7 + seed * 13) as f32;
                        Vec3::new(a.sin() * 10.0, (a * 0.37).cos() * 4.0, (a * 1.9).sin() * 8.0)
                    })
                    .chain(std::iter::repeat_n(Vec3::new(1.0, 2.0, 3.0), seed % 2))
                    .collect();

                for segments in [1, 7, 50, 200] {
                    for method in [BezierMethod::Auto, BezierMethod::DeCasteljau] {
                        let table = ArcLengthTable::build(&points, segments, method);
                        assert!(
                            table.is_monotonic(),
                            "{count} points, seed {seed}, {segments} segments, {method:?}"
                        );
                        assert_eq!(table.cumulative()[0], 0.0);
                        assert_eq!(table.segments(), segments);
                    }
                }
            }
        }
    }

    #[test]
    fn round_trip_within_one_step() {
        let table = reference_table(50);
        let step = 1.0 / 50.0;

        for i in 1..99 {
            let t = i as f32 / 100.0;
            let back = table.t_at_arc_length(table.arc_length_at_t(t));
            assert!((back - t).abs() <= step, "t={t} came back as {back}");
        }
    }

    #[test]
    fn out_of_range_falls_back_to_zero() {
        let table = reference_table(50);
        let beyond = table.total_length() + 0.5;

        assert_eq!(table.t_at_arc_length(beyond), 0.0);
        assert_eq!(table.t_at_arc_length(-1.0), 0.0);
        assert_eq!(table.try_t_at_arc_length(beyond), None);

        let end = table.try_t_at_arc_length(table.total_length()).unwrap();
        assert!((end - 1.0).abs() < 1e-5);
    }

    #[test]
    fn stationary_curve_maps_to_zero() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        let table = ArcLengthTable::build(&[p, p], 10, BezierMethod::Auto);
        assert_eq!(table.total_length(), 0.0);
        assert_eq!(table.t_at_arc_length(0.0), 0.0);
    }

    #[test]
    fn zero_segments_treated_as_one() {
        let table = ArcLengthTable::build(
            &[Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0)],
            0,
            BezierMethod::Auto,
        );
        assert_eq!(table.segments(), 1);
        assert!((table.total_length() - 5.0).abs() < 1e-5);
        assert!((table.arc_length_at_t(0.5) - 2.5).abs() < 1e-5);
        assert!((table.t_at_arc_length(2.5) - 0.5).abs() < 1e-5);
    }
}
