//! # Primitive Shape Generation
//!
//! One module per primitive. All shapes are generated with outward normals
//! and texture coordinates.

pub mod bezier;
pub mod cone;
pub mod cuboid;
pub mod plane;
pub mod sphere;

pub use bezier::{generate_bezier_patch, parse_patch_file, BezierPatchSet};
pub use cone::generate_cone;
pub use cuboid::generate_box;
pub use plane::generate_plane;
pub use sphere::generate_sphere;

use std::fmt;

/// Parameters of any procedural primitive except Bézier patches, which need
/// an input file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Box { side_len: f32, num_divs: u32 },
    Sphere { radius: f32, num_slices: u32, num_stacks: u32 },
    Cone { radius: f32, height: f32, num_slices: u32, num_stacks: u32 },
    Plane { side_len: f32, num_divs: u32 },
}

impl Primitive {
    pub fn generate(&self) -> Result<super::Mesh, super::GeneratorError> {
        match *self {
            Primitive::Box { side_len, num_divs } => generate_box(side_len, num_divs),
            Primitive::Sphere {
                radius,
                num_slices,
                num_stacks,
            } => generate_sphere(radius, num_slices, num_stacks),
            Primitive::Cone {
                radius,
                height,
                num_slices,
                num_stacks,
            } => generate_cone(radius, height, num_slices, num_stacks),
            Primitive::Plane { side_len, num_divs } => generate_plane(side_len, num_divs),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Box { side_len, num_divs } => write!(f, "box(side={}, divs={})", side_len, num_divs),
            Primitive::Sphere {
                radius,
                num_slices,
                num_stacks,
            } => write!(f, "sphere(r={}, slices={}, stacks={})", radius, num_slices, num_stacks),
            Primitive::Cone {
                radius,
                height,
                num_slices,
                num_stacks,
            } => write!(
                f,
                "cone(r={}, h={}, slices={}, stacks={})",
                radius, height, num_slices, num_stacks
            ),
            Primitive::Plane { side_len, num_divs } => write!(f, "plane(side={}, divs={})", side_len, num_divs),
        }
    }
}
