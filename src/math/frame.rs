//! Orthonormal frames and rotation matrices built from them.

use cgmath::{InnerSpace, Matrix4, Vector3, Vector4};

/// Lengths below this are treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f32 = 1e-12;

/// Normalizes `v`, returning `None` for (near) zero-length vectors instead of
/// a vector full of NaNs.
pub fn try_normalize(v: Vector3<f32>) -> Option<Vector3<f32>> {
    let len2 = v.magnitude2();
    if len2 > NORMALIZE_EPSILON {
        Some(v / len2.sqrt())
    } else {
        None
    }
}

/// Normalizes `v`, or returns `fallback` if `v` has no direction.
pub fn normalize_or(v: Vector3<f32>, fallback: Vector3<f32>) -> Vector3<f32> {
    try_normalize(v).unwrap_or(fallback)
}

/// Builds a rotation matrix whose columns are the three given axes.
///
/// Translation is zero and the last row is `(0, 0, 0, 1)`. The axes are used
/// as given, callers are expected to pass an orthonormal basis.
pub fn rotation_from_axes(x: Vector3<f32>, y: Vector3<f32>, z: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_cols(x.extend(0.0), y.extend(0.0), z.extend(0.0), Vector4::unit_w())
}

/// Orthonormal basis that points an object's +X axis along `forward`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub forward: Vector3<f32>,
    pub up: Vector3<f32>,
    pub right: Vector3<f32>,
}

impl Frame {
    /// Derives a frame from a direction of travel and an up hint.
    ///
    /// `right = forward × up_hint`, then `up = right × forward`. The result
    /// is meaningless when `forward` is parallel to `up_hint`; this case is
    /// not special-cased and yields non-finite axes.
    pub fn from_forward(forward: Vector3<f32>, up_hint: Vector3<f32>) -> Self {
        let forward = forward.normalize();
        let right = forward.cross(up_hint).normalize();
        let up = right.cross(forward).normalize();
        Self { forward, up, right }
    }

    /// The rotation taking the local X/Y/Z axes onto forward/up/right.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        rotation_from_axes(self.forward, self.up, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Transform};

    #[test]
    fn test_try_normalize_rejects_zero() {
        assert!(try_normalize(Vector3::new(0.0, 0.0, 0.0)).is_none());
        let n = try_normalize(Vector3::new(3.0, 0.0, 4.0)).unwrap();
        assert!((n.magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_identity_axes_give_identity() {
        let m = rotation_from_axes(Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z());
        assert_eq!(m, Matrix4::identity());
    }

    #[test]
    fn test_frame_is_orthonormal() {
        let frame = Frame::from_forward(Vector3::new(1.0, 0.3, -2.0), Vector3::unit_y());
        assert!(frame.forward.dot(frame.up).abs() < 1e-5);
        assert!(frame.forward.dot(frame.right).abs() < 1e-5);
        assert!(frame.up.dot(frame.right).abs() < 1e-5);
        assert!((frame.right.magnitude() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_frame_matrix_maps_x_to_forward() {
        let frame = Frame::from_forward(Vector3::new(0.0, 0.0, -1.0), Vector3::unit_y());
        let m = frame.to_matrix();
        let mapped = m.transform_vector(Vector3::unit_x());
        assert!((mapped - frame.forward).magnitude() < 1e-6);
        assert_eq!(m.w, Vector4::unit_w());
    }
}
