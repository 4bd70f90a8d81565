//! # Catmull-Rom Spline
//!
//! Closed (cyclic) Catmull-Rom curves used for animated translations. A curve
//! with `N` control points has exactly `N` segments; the last one wraps back
//! to the first control point, so there is no open or clamped variant.
//!
//! The global parameter `t` covers the whole loop: `t = 0` is the start of
//! segment 0 and `t → 1` approaches it again from the last segment.

use cgmath::{Matrix4, Point3, Vector3};
use thiserror::Error;

use crate::math::Frame;

/// A closed spline needs at least four control points per segment.
pub const MIN_CONTROL_POINTS: usize = 4;

/// Number of samples used when drawing the path guide of a curve.
pub const PATH_GUIDE_SAMPLES: usize = 101;

/// Catmull-Rom basis matrix, row-major.
#[rustfmt::skip]
const CATMULL_ROM: [[f32; 4]; 4] = [
    [-0.5,  1.5, -1.5,  0.5],
    [ 1.0, -2.5,  2.0, -0.5],
    [-0.5,  0.0,  0.5,  0.0],
    [ 0.0,  1.0,  0.0,  0.0],
];

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplineError {
    #[error("a closed Catmull-Rom curve needs at least {MIN_CONTROL_POINTS} points, got {0}")]
    TooFewPoints(usize),
}

/// Position and first derivative of a curve at some parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    pub position: Point3<f32>,
    pub velocity: Vector3<f32>,
}

impl CurveSample {
    /// Rotation aligning an object's +X axis with the direction of travel.
    ///
    /// Uses `(0, 1, 0)` as the up hint. A velocity parallel to the up hint is
    /// not handled and produces a degenerate matrix.
    pub fn alignment(&self) -> Matrix4<f32> {
        Frame::from_forward(self.velocity, Vector3::unit_y()).to_matrix()
    }
}

/// A closed Catmull-Rom curve through a cyclic sequence of control points.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRom {
    points: Vec<Point3<f32>>,
}

impl CatmullRom {
    pub fn new(points: Vec<Point3<f32>>) -> Result<Self, SplineError> {
        if points.len() < MIN_CONTROL_POINTS {
            return Err(SplineError::TooFewPoints(points.len()));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point3<f32>] {
        &self.points
    }

    pub fn segment_count(&self) -> usize {
        self.points.len()
    }

    /// Evaluates the curve at global parameter `t ∈ [0, 1)`.
    ///
    /// Values outside the range are wrapped by the segment index arithmetic,
    /// so `t` and `t + 1` land on the same point.
    pub fn sample(&self, t: f32) -> CurveSample {
        let n = self.points.len();
        let gt = t * n as f32;
        let segment = gt.floor();
        let local_t = gt - segment;

        let segment = (segment as i64).rem_euclid(n as i64) as usize;
        let p0 = self.points[(segment + n - 1) % n];
        let p1 = self.points[segment];
        let p2 = self.points[(segment + 1) % n];
        let p3 = self.points[(segment + 2) % n];

        segment_sample(local_t, [p0, p1, p2, p3])
    }

    /// Evenly spaced samples over the whole loop, for drawing the path.
    ///
    /// Both ends of the polyline sit on the first control point.
    pub fn path_guide(&self) -> Vec<Point3<f32>> {
        let last = (PATH_GUIDE_SAMPLES - 1) as f32;
        (0..PATH_GUIDE_SAMPLES)
            .map(|i| self.sample(i as f32 / last).position)
            .collect()
    }
}

/// Evaluates one Catmull-Rom segment at local parameter `t ∈ [0, 1]`.
pub fn segment_sample(t: f32, control: [Point3<f32>; 4]) -> CurveSample {
    let mut position = [0.0f32; 3];
    let mut velocity = [0.0f32; 3];

    for axis in 0..3 {
        let p = [
            control[0][axis],
            control[1][axis],
            control[2][axis],
            control[3][axis],
        ];

        // A = M * P
        let mut a = [0.0f32; 4];
        for (row, coeff) in a.iter_mut().enumerate() {
            *coeff = (0..4).map(|k| CATMULL_ROM[row][k] * p[k]).sum();
        }

        position[axis] = t * t * t * a[0] + t * t * a[1] + t * a[2] + a[3];
        velocity[axis] = 3.0 * t * t * a[0] + 2.0 * t * a[1] + a[2];
    }

    CurveSample {
        position: Point3::from(position),
        velocity: Vector3::from(velocity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{EuclideanSpace, InnerSpace, MetricSpace};

    fn square() -> CatmullRom {
        CatmullRom::new(vec![
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(-1.0, 0.0, 1.0),
            Point3::new(-1.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, -1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_fewer_than_four_points() {
        let err = CatmullRom::new(vec![Point3::origin(); 3]).unwrap_err();
        assert_eq!(err, SplineError::TooFewPoints(3));
    }

    #[test]
    fn test_passes_through_control_points() {
        let curve = square();
        for (i, p) in curve.points().iter().enumerate() {
            let sample = curve.sample(i as f32 / 4.0);
            assert!(sample.position.distance(*p) < 1e-5, "segment {}", i);
        }
    }

    #[test]
    fn test_closed_curve_continuity() {
        let curve = square();
        let start = curve.sample(0.0).position;
        let end = curve.sample(1.0 - 1e-6).position;
        assert!(start.distance(curve.points()[0]) < 1e-5);
        assert!(end.distance(curve.points()[0]) < 1e-3);
    }

    #[test]
    fn test_stays_inside_symmetric_hull() {
        let curve = square();
        for t in [0.25, 0.5, 0.75] {
            let p = curve.sample(t).position;
            assert!(p.x.abs() <= 1.0 + 1e-5, "t={} p={:?}", t, p);
            assert!(p.z.abs() <= 1.0 + 1e-5, "t={} p={:?}", t, p);
            assert!(p.y.abs() < 1e-6);
        }
    }

    #[test]
    fn test_wraps_parameters_outside_unit_range() {
        let curve = square();
        let a = curve.sample(0.3).position;
        let b = curve.sample(1.3).position;
        let c = curve.sample(-0.7).position;
        assert!(a.distance(b) < 1e-4);
        assert!(a.distance(c) < 1e-4);
    }

    #[test]
    fn test_velocity_matches_finite_difference() {
        let curve = square();
        let t = 0.4;
        let h = 1e-3;
        let ahead = curve.sample(t + h).position;
        let behind = curve.sample(t - h).position;
        // d/dt_global = d/dt_local * segment_count
        let numeric = (ahead - behind) / (2.0 * h) / curve.segment_count() as f32;
        let analytic = curve.sample(t).velocity;
        assert!((numeric - analytic).magnitude() < 1e-2);
    }

    #[test]
    fn test_path_guide_closes() {
        let guide = square().path_guide();
        assert_eq!(guide.len(), PATH_GUIDE_SAMPLES);
        assert!(guide[0].distance(guide[PATH_GUIDE_SAMPLES - 1]) < 1e-5);
    }

    #[test]
    fn test_alignment_points_x_along_velocity() {
        use cgmath::Transform;
        let sample = square().sample(0.1);
        let m = sample.alignment();
        let x = m.transform_vector(Vector3::unit_x());
        assert!((x - sample.velocity.normalize()).magnitude() < 1e-5);
    }
}
