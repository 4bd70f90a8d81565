//! # Coordinate System Conversions
//!
//! Conversions between the three coordinate systems used by the generators
//! and the follow camera. Every vector is a [`Vector3<f32>`] whose components
//! are interpreted as follows:
//!
//! - **Cartesian**: `(x, y, z)`, Y-up.
//! - **Cylindrical**: `(radial distance, height, azimuth)`. The height sits in
//!   the second slot so that it lines up with the cartesian Y axis.
//! - **Spherical**: `(radius, polar angle from +Y, azimuth)`.
//!
//! Azimuths are measured in the XZ plane from the +Z axis towards +X, i.e.
//! `atan2(x, z)`. All angles are in radians.
//!
//! Points lying on the Y axis have no defined azimuth; they get an azimuth of
//! zero instead of whatever `atan2(0, 0)` happens to return. The origin also
//! gets a polar angle of zero.

use cgmath::Vector3;

/// Converts a cartesian vector into cylindrical coordinates.
pub fn cartesian_to_cylindrical(cartesian: Vector3<f32>) -> Vector3<f32> {
    let Vector3 { x, y, z } = cartesian;

    let radial_dist = (x * x + z * z).sqrt();
    Vector3::new(radial_dist, y, azimuth_of(x, z))
}

/// Converts a cylindrical vector into cartesian coordinates.
pub fn cylindrical_to_cartesian(cylindrical: Vector3<f32>) -> Vector3<f32> {
    let Vector3 {
        x: radial_dist,
        y: height,
        z: azimuth,
    } = cylindrical;

    Vector3::new(
        radial_dist * azimuth.sin(),
        height,
        radial_dist * azimuth.cos(),
    )
}

/// Converts a cartesian vector into spherical coordinates.
pub fn cartesian_to_spherical(cartesian: Vector3<f32>) -> Vector3<f32> {
    let Vector3 { x, y, z } = cartesian;

    let radius = (x * x + y * y + z * z).sqrt();
    let polar = if radius == 0.0 {
        0.0
    } else {
        (y / radius).clamp(-1.0, 1.0).acos()
    };

    Vector3::new(radius, polar, azimuth_of(x, z))
}

/// Converts a spherical vector into cartesian coordinates.
pub fn spherical_to_cartesian(spherical: Vector3<f32>) -> Vector3<f32> {
    let Vector3 {
        x: radius,
        y: polar,
        z: azimuth,
    } = spherical;

    let radius_sin_polar = radius * polar.sin();
    Vector3::new(
        radius_sin_polar * azimuth.sin(),
        radius * polar.cos(),
        radius_sin_polar * azimuth.cos(),
    )
}

/// Converts a cylindrical vector into spherical coordinates.
///
/// The azimuth is shared by both systems and passes through untouched.
pub fn cylindrical_to_spherical(cylindrical: Vector3<f32>) -> Vector3<f32> {
    let Vector3 {
        x: radial_dist,
        y: height,
        z: azimuth,
    } = cylindrical;

    let radius = (radial_dist * radial_dist + height * height).sqrt();
    let polar = if radial_dist == 0.0 && height == 0.0 {
        0.0
    } else {
        radial_dist.atan2(height)
    };

    Vector3::new(radius, polar, azimuth)
}

/// Converts a spherical vector into cylindrical coordinates.
pub fn spherical_to_cylindrical(spherical: Vector3<f32>) -> Vector3<f32> {
    let Vector3 {
        x: radius,
        y: polar,
        z: azimuth,
    } = spherical;

    Vector3::new(radius * polar.sin(), radius * polar.cos(), azimuth)
}

pub fn cartesian_to_cylindrical_inplace(v: &mut Vector3<f32>) {
    *v = cartesian_to_cylindrical(*v);
}

pub fn cylindrical_to_cartesian_inplace(v: &mut Vector3<f32>) {
    *v = cylindrical_to_cartesian(*v);
}

pub fn cartesian_to_spherical_inplace(v: &mut Vector3<f32>) {
    *v = cartesian_to_spherical(*v);
}

pub fn spherical_to_cartesian_inplace(v: &mut Vector3<f32>) {
    *v = spherical_to_cartesian(*v);
}

pub fn cylindrical_to_spherical_inplace(v: &mut Vector3<f32>) {
    *v = cylindrical_to_spherical(*v);
}

pub fn spherical_to_cylindrical_inplace(v: &mut Vector3<f32>) {
    *v = spherical_to_cylindrical(*v);
}

// Pole axis points have no azimuth, pin them to zero.
fn azimuth_of(x: f32, z: f32) -> f32 {
    if x == 0.0 && z == 0.0 {
        0.0
    } else {
        x.atan2(z)
    }
}
