//! # Transforms
//!
//! The closed set of spatial operations a group can apply. Each variant turns
//! into a 4×4 matrix for a given [`FrameTime`]; static variants ignore the
//! time.

use cgmath::{Deg, EuclideanSpace, Matrix4, Point3, SquareMatrix, Vector3, Vector4};

use crate::animation::{CatmullRom, CurveSample, FrameTime};
use crate::math::try_normalize;

/// What drives a rotation's angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateKind {
    /// `params = (degrees, x, y, z)`, a fixed rotation.
    Angle,
    /// `params = (period_seconds, x, y, z)`, one full turn per period.
    Time,
}

/// Translation along a closed Catmull-Rom curve, one loop every `time` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicTranslate {
    pub time: u32,
    pub align: bool,
    curve: CatmullRom,
    path_guide: Vec<Point3<f32>>,
}

impl DynamicTranslate {
    pub fn new(time: u32, align: bool, curve: CatmullRom) -> Self {
        let path_guide = curve.path_guide();
        Self {
            time,
            align,
            curve,
            path_guide,
        }
    }

    pub fn curve(&self) -> &CatmullRom {
        &self.curve
    }

    /// Polyline through the whole loop, for drawing the path.
    pub fn path_guide(&self) -> &[Point3<f32>] {
        &self.path_guide
    }

    /// Loop parameter at `time`, wrapped to `[0, 1)`.
    ///
    /// A zero duration never moves and stays at the start of the curve.
    pub fn loop_parameter(&self, time: FrameTime) -> f32 {
        time.loop_fraction(u64::from(self.time) * 1000)
    }

    pub fn sample(&self, time: FrameTime) -> CurveSample {
        self.curve.sample(self.loop_parameter(time))
    }

    pub fn matrix(&self, time: FrameTime) -> Matrix4<f32> {
        let sample = self.sample(time);
        let translation = Matrix4::from_translation(sample.position.to_vec());
        if self.align {
            translation * sample.alignment()
        } else {
            translation
        }
    }
}

/// One spatial operation of a group.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    StaticTranslate(Vector3<f32>),
    DynamicTranslate(DynamicTranslate),
    Rotate { kind: RotateKind, params: Vector4<f32> },
    Scale(Vector3<f32>),
}

impl Transform {
    pub fn rotate_angle(degrees: f32, axis: Vector3<f32>) -> Self {
        Transform::Rotate {
            kind: RotateKind::Angle,
            params: Vector4::new(degrees, axis.x, axis.y, axis.z),
        }
    }

    pub fn rotate_time(period_seconds: f32, axis: Vector3<f32>) -> Self {
        Transform::Rotate {
            kind: RotateKind::Time,
            params: Vector4::new(period_seconds, axis.x, axis.y, axis.z),
        }
    }

    /// Whether the matrix depends on the frame time.
    pub fn is_animated(&self) -> bool {
        matches!(
            self,
            Transform::DynamicTranslate(_)
                | Transform::Rotate {
                    kind: RotateKind::Time,
                    ..
                }
        )
    }

    pub fn matrix(&self, time: FrameTime) -> Matrix4<f32> {
        match self {
            Transform::StaticTranslate(xyz) => Matrix4::from_translation(*xyz),
            Transform::DynamicTranslate(dynamic) => dynamic.matrix(time),
            Transform::Rotate { kind, params } => {
                let degrees = match kind {
                    RotateKind::Angle => params.x,
                    RotateKind::Time => time_rotation_degrees(params.x, time),
                };
                rotation(degrees, params.truncate_n(0))
            }
            Transform::Scale(xyz) => Matrix4::from_nonuniform_scale(xyz.x, xyz.y, xyz.z),
        }
    }
}

/// Angle of a rotation that turns once every `period_seconds`.
///
/// The elapsed time is reduced modulo the period first, so the angle stays in
/// `[0, 360)` (or `(-360, 0]` for a negative period) no matter how long the
/// engine runs. A zero period does not rotate.
pub fn time_rotation_degrees(period_seconds: f32, time: FrameTime) -> f32 {
    let period_ms = f64::from(period_seconds) * 1000.0;
    if period_ms == 0.0 || !period_ms.is_finite() {
        return 0.0;
    }
    let into_period = time.elapsed_ms as f64 % period_ms.abs();
    (360.0 * into_period / period_ms) as f32
}

/// Rotation of `degrees` about `axis`, which need not be normalized.
///
/// A zero axis has no direction and yields the identity.
fn rotation(degrees: f32, axis: Vector3<f32>) -> Matrix4<f32> {
    match try_normalize(axis) {
        Some(axis) => Matrix4::from_axis_angle(axis, Deg(degrees)),
        None => Matrix4::identity(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Transform as _};

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-4
    }

    fn square_loop(time: u32, align: bool) -> DynamicTranslate {
        let curve = CatmullRom::new(vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ])
        .unwrap();
        DynamicTranslate::new(time, align, curve)
    }

    #[test]
    fn test_static_translate_and_scale() {
        let t = Transform::StaticTranslate(Vector3::new(1.0, 2.0, 3.0));
        let p = t.matrix(FrameTime::ZERO).transform_point(Point3::new(0.0, 0.0, 0.0));
        assert_eq!(p, Point3::new(1.0, 2.0, 3.0));

        let s = Transform::Scale(Vector3::new(2.0, 3.0, 4.0));
        let v = s.matrix(FrameTime::ZERO).transform_vector(Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(v, Vector3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_rotate_angle_about_unnormalized_axis() {
        let r = Transform::rotate_angle(90.0, Vector3::new(0.0, 5.0, 0.0));
        let v = r.matrix(FrameTime::from_millis(12345)).transform_vector(Vector3::unit_x());
        assert!(close(v, -Vector3::unit_z()), "{:?}", v);
    }

    #[test]
    fn test_rotate_zero_axis_is_identity() {
        let r = Transform::rotate_angle(45.0, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(r.matrix(FrameTime::ZERO), Matrix4::identity());
    }

    #[test]
    fn test_time_rotation_angle() {
        assert_eq!(time_rotation_degrees(4.0, FrameTime::from_millis(1000)), 90.0);
        assert_eq!(time_rotation_degrees(4.0, FrameTime::from_millis(5000)), 90.0);
        assert_eq!(time_rotation_degrees(-4.0, FrameTime::from_millis(1000)), -90.0);
        assert_eq!(time_rotation_degrees(0.0, FrameTime::from_millis(1000)), 0.0);
    }

    #[test]
    fn test_time_rotation_matches_unwrapped_angle() {
        let r = Transform::rotate_time(3.0, Vector3::unit_y());
        let time = FrameTime::from_millis(7_250);
        let unwrapped = Matrix4::from_axis_angle(Vector3::unit_y(), Deg(360.0 * 7_250.0 / 3_000.0));
        let a = r.matrix(time).transform_vector(Vector3::unit_x());
        let b = unwrapped.transform_vector(Vector3::unit_x());
        assert!(close(a, b));
    }

    #[test]
    fn test_dynamic_translate_wraps_time() {
        let d = square_loop(4, false);
        assert_eq!(d.loop_parameter(FrameTime::from_millis(1000)), 0.25);
        assert_eq!(d.loop_parameter(FrameTime::from_millis(5000)), 0.25);

        let at = |ms| Transform::DynamicTranslate(d.clone())
            .matrix(FrameTime::from_millis(ms))
            .transform_point(Point3::new(0.0, 0.0, 0.0));
        assert!(close(at(0).to_vec(), Vector3::unit_x()));
        assert!(close(at(1000).to_vec(), -Vector3::unit_z()));
        assert!(close(at(9000).to_vec(), -Vector3::unit_z()));
    }

    #[test]
    fn test_zero_duration_is_stationary() {
        let d = square_loop(0, false);
        assert_eq!(d.loop_parameter(FrameTime::from_millis(777)), 0.0);
    }

    #[test]
    fn test_aligned_translate_faces_velocity() {
        let d = square_loop(10, true);
        let time = FrameTime::from_millis(1234);
        let m = d.matrix(time);
        let forward = m.transform_vector(Vector3::unit_x());
        assert!(close(forward, d.sample(time).velocity.normalize()));
    }

    #[test]
    fn test_is_animated() {
        assert!(!Transform::StaticTranslate(Vector3::unit_x()).is_animated());
        assert!(!Transform::rotate_angle(1.0, Vector3::unit_y()).is_animated());
        assert!(Transform::rotate_time(1.0, Vector3::unit_y()).is_animated());
        assert!(Transform::DynamicTranslate(square_loop(1, false)).is_animated());
    }

    #[test]
    fn test_path_guide_is_cached() {
        let d = square_loop(1, false);
        assert_eq!(d.path_guide(), d.curve().path_guide().as_slice());
    }
}
