use bevy::prelude::*;

/// Parameter step used for the finite-difference forward direction.
pub const FORWARD_DELTA: f32 = 0.01;

/// Squared length below which a finite difference is treated as stationary.
const MIN_FORWARD_LENGTH_SQUARED: f32 = 1e-12;

/// How a Bézier curve is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Default)]
pub enum BezierMethod {
    /// Closed-form Bernstein evaluation for exactly 4 control points,
    /// de Casteljau reduction for any other count.
    #[default]
    Auto,
    /// Always use de Casteljau reduction.
    DeCasteljau,
}

/// Trait for evaluating a single Bézier curve over all of its control points.
pub trait CurveEvaluator {
    /// Evaluate the curve at parameter t (0.0 to 1.0).
    ///
    /// No control points yields `Vec3::ZERO`, a single point yields that point.
    fn evaluate(&self, points: &[Vec3], t: f32) -> Vec3;

    /// Approximate the unit forward direction at t by finite difference.
    ///
    /// Samples t and `(t + FORWARD_DELTA) mod 1`. Returns `None` when the curve
    /// is stationary over that interval, callers keep their previous forward.
    fn forward(&self, points: &[Vec3], t: f32) -> Option<Vec3> {
        let current = self.evaluate(points, t);
        let next = self.evaluate(points, wrap_unit(t + FORWARD_DELTA));
        let delta = next - current;
        if !delta.is_finite() || delta.length_squared() < MIN_FORWARD_LENGTH_SQUARED {
            return None;
        }
        Some(delta.normalize())
    }
}

impl CurveEvaluator for BezierMethod {
    fn evaluate(&self, points: &[Vec3], t: f32) -> Vec3 {
        match (*self, points) {
            (Self::Auto, &[p0, p1, p2, p3]) => cubic_bezier(p0, p1, p2, p3, t),
            _ => de_casteljau(points, t),
        }
    }
}

/// Evaluate a Bézier curve of any degree by repeated linear interpolation.
pub fn de_casteljau(points: &[Vec3], t: f32) -> Vec3 {
    match points {
        [] => Vec3::ZERO,
        [single] => *single,
        _ => {
            let mut work = points.to_vec();
            for level in (1..work.len()).rev() {
                for i in 0..level {
                    work[i] = work[i].lerp(work[i + 1], t);
                }
            }
            work[0]
        }
    }
}

/// Closed-form cubic Bézier: `(1-t)³P0 + 3(1-t)²tP1 + 3(1-t)t²P2 + t³P3`.
pub fn cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;

    p0 * mt3 + p1 * 3.0 * mt2 * t + p2 * 3.0 * mt * t2 + p3 * t3
}

/// Wrap a curve parameter into [0, 1).
pub fn wrap_unit(t: f32) -> f32 {
    let wrapped = t.rem_euclid(1.0);
    // rem_euclid rounds tiny negatives up to exactly 1.0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_points() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn cubic_matches_de_casteljau() {
        let sets = [
            reference_points(),
            vec![
                Vec3::new(-3.0, 1.0, 2.0),
                Vec3::new(4.5, -2.0, 0.25),
                Vec3::new(0.0, 7.0, -1.0),
                Vec3::new(2.0, 2.0, 9.0),
            ],
        ];

        for points in &sets {
            for i in 0..=100 {
                let t = i as f32 / 100.0;
                let closed = cubic_bezier(points[0], points[1], points[2], points[3], t);
                let generic = de_casteljau(points, t);
                assert!(
                    (closed - generic).length() < 1e-5,
                    "mismatch at t={t}: {closed} vs {generic}"
                );
            }
        }
    }

    #[test]
    fn reference_curve_endpoints() {
        let points = reference_points();
        for method in [BezierMethod::Auto, BezierMethod::DeCasteljau] {
            assert!(method.evaluate(&points, 0.0).length() < 1e-6);
            assert!((method.evaluate(&points, 1.0) - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
            assert!((method.evaluate(&points, 0.5) - Vec3::new(5.0, 0.0, 7.5)).length() < 1e-5);
        }
    }

    #[test]
    fn degenerate_point_counts() {
        assert_eq!(de_casteljau(&[], 0.3), Vec3::ZERO);
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(de_casteljau(&[p], 0.7), p);

        // Two points is a straight line
        let mid = de_casteljau(&[Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)], 0.25);
        assert!((mid - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn forward_follows_curve() {
        let points = reference_points();
        let forward = BezierMethod::Auto.forward(&points, 0.0).unwrap();
        assert!((forward.length() - 1.0).abs() < 1e-5);
        // Leaves the origin heading +Z
        assert!(forward.z > 0.9);

        let forward = BezierMethod::Auto.forward(&points, 0.5).unwrap();
        assert!(forward.x > 0.9);
    }

    #[test]
    fn forward_on_stationary_curve_is_none() {
        let p = Vec3::splat(2.0);
        assert!(BezierMethod::Auto.forward(&[p, p, p], 0.4).is_none());
        assert!(BezierMethod::Auto.forward(&[], 0.4).is_none());
    }

    #[test]
    fn wrap_unit_stays_in_range() {
        assert_eq!(wrap_unit(0.25), 0.25);
        assert!((wrap_unit(1.25) - 0.25).abs() < 1e-6);
        assert!((wrap_unit(-0.25) - 0.75).abs() < 1e-6);
        assert_eq!(wrap_unit(1.0), 0.0);
        let tiny = wrap_unit(-1e-9);
        assert!((0.0..1.0).contains(&tiny));
    }
}
