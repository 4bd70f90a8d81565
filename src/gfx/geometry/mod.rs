//! # Procedural Geometry Generation
//!
//! This module provides functions to generate common 3D primitive shapes procedurally,
//! eliminating the need for external model files for basic shapes.
//!
//! ## Supported Primitives
//!
//! - **Box**: Cube centered at the origin with configurable subdivisions per face
//! - **Sphere**: UV sphere with configurable slices and stacks
//! - **Cone**: Cone standing on the xOz plane with configurable slices and stacks
//! - **Plane**: Flat square on the xOz plane with configurable subdivisions
//! - **Bézier patch**: Bicubic surfaces read from a patch file, with configurable tessellation
//!
//! Every generator returns a non-indexed triangle list in counter-clockwise winding,
//! or a [`GeneratorError`] if the parameters are rejected. Parameters are validated
//! before anything is allocated.
//!
//! ## Usage
//!
//! ```rust
//! use orrery::gfx::geometry::{generate_box, generate_sphere, generate_plane};
//!
//! // A unit box with 2x2 divisions per face
//! let cube = generate_box(1.0, 2).unwrap();
//! assert_eq!(cube.vertex_count(), 6 * 2 * 2 * 6);
//!
//! // A sphere with 16 slices and 8 stacks
//! let sphere = generate_sphere(1.0, 16, 8).unwrap();
//!
//! // A 10x10 plane with 4 divisions along each axis
//! let plane = generate_plane(10.0, 4).unwrap();
//! ```

pub mod output;
pub mod primitives;

pub use output::{generate_and_write, read_mesh, read_mesh_from_path, write_mesh, write_mesh_to_path};
pub use primitives::*;

use std::collections::TryReserveError;

use cgmath::{InnerSpace, Vector3};
use thiserror::Error;

/// Errors produced while generating (or writing) a primitive.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("ran out of memory")]
    OutOfMemory,
    #[error("input/output error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed number: {0}")]
    MalformedNumber(String),

    #[error("attempted to generate a primitive with zero divisions")]
    ZeroDivisions,
    #[error("attempted to generate a primitive with less than three slices (got {0})")]
    TooFewSlices(u32),
    #[error("attempted to generate a sphere with less than two stacks (got {0})")]
    TooFewStacks(u32),
    #[error("attempted to generate a cone with zero stacks")]
    ZeroStacks,

    #[error("attempted to generate a bezier patch with less than one patch")]
    LessThanOnePatch,
    #[error("attempted to generate a bezier patch with less than one control point")]
    LessThanOneControlPoint,
    #[error("attempted to generate a bezier patch with zero tessellation")]
    ZeroTessellation,
    #[error("bezier patch references control point {index}, but only {count} exist")]
    PatchIndexOutOfRange { index: usize, count: usize },
    #[error("bezier patch {index} requested, but the set has {count}")]
    NoSuchPatch { index: usize, count: usize },
}

impl From<TryReserveError> for GeneratorError {
    fn from(_: TryReserveError) -> Self {
        GeneratorError::OutOfMemory
    }
}

/// A non-indexed triangle mesh.
///
/// Every three consecutive vertices form one triangle. Normals and texture
/// coordinates are optional: each is either empty or exactly as long as
/// `vertices`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z), empty if the mesh has none
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates (u, v), empty if the mesh has none
    pub tex_coords: Vec<[f32; 2]>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with room for `vertex_count` vertices.
    ///
    /// Fails with [`GeneratorError::OutOfMemory`] instead of aborting when the
    /// allocation cannot be satisfied.
    pub fn with_capacity(
        vertex_count: usize,
        with_normals: bool,
        with_tex_coords: bool,
    ) -> Result<Self, GeneratorError> {
        let mut mesh = Self::new();
        mesh.vertices.try_reserve_exact(vertex_count)?;
        if with_normals {
            mesh.normals.try_reserve_exact(vertex_count)?;
        }
        if with_tex_coords {
            mesh.tex_coords.try_reserve_exact(vertex_count)?;
        }
        Ok(mesh)
    }

    /// Builds a position-only mesh.
    pub fn from_positions(vertices: Vec<[f32; 3]>) -> Self {
        Self {
            vertices,
            ..Self::default()
        }
    }

    /// Get the number of vertices in this mesh
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this mesh
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_tex_coords(&self) -> bool {
        !self.tex_coords.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether the mesh is a whole number of triangles and its optional
    /// attribute arrays line up with its positions.
    pub fn is_well_formed(&self) -> bool {
        let n = self.vertices.len();
        n % 3 == 0
            && (self.normals.is_empty() || self.normals.len() == n)
            && (self.tex_coords.is_empty() || self.tex_coords.len() == n)
    }

    pub(crate) fn push(&mut self, position: Vector3<f32>, normal: Vector3<f32>, uv: [f32; 2]) {
        self.vertices.push(position.into());
        self.normals.push(normal.into());
        self.tex_coords.push(uv);
    }

    /// Translates every vertex by `offset`.
    pub fn translate(&mut self, offset: Vector3<f32>) {
        for v in &mut self.vertices {
            v[0] += offset.x;
            v[1] += offset.y;
            v[2] += offset.z;
        }
    }

    /// Average of all vertex positions, or `None` for an empty mesh.
    pub fn centroid(&self) -> Option<Vector3<f32>> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::new(0.0f64, 0.0, 0.0), |acc, v| {
                acc + Vector3::new(v[0] as f64, v[1] as f64, v[2] as f64)
            });
        let mean = sum / self.vertices.len() as f64;
        Some(Vector3::new(mean.x as f32, mean.y as f32, mean.z as f32))
    }

    /// Geometric normal of triangle `index`, following its winding order.
    pub fn face_normal(&self, index: usize) -> Option<Vector3<f32>> {
        let tri = self.vertices.get(index * 3..index * 3 + 3)?;
        let a = Vector3::from(tri[0]);
        let b = Vector3::from(tri[1]);
        let c = Vector3::from(tri[2]);
        Some((b - a).cross(c - a))
    }

    /// Appends all triangles of `other`.
    ///
    /// Attribute arrays are only kept if both meshes have them.
    pub fn append(&mut self, other: &Mesh) {
        let keep_normals = (self.has_normals() || self.is_empty()) && other.has_normals();
        let keep_uvs = (self.has_tex_coords() || self.is_empty()) && other.has_tex_coords();
        self.vertices.extend_from_slice(&other.vertices);
        if keep_normals {
            self.normals.extend_from_slice(&other.normals);
        } else {
            self.normals.clear();
        }
        if keep_uvs {
            self.tex_coords.extend_from_slice(&other.tex_coords);
        } else {
            self.tex_coords.clear();
        }
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(mut lo, mut hi), v| {
            for axis in 0..3 {
                lo[axis] = lo[axis].min(v[axis]);
                hi[axis] = hi[axis].max(v[axis]);
            }
            (lo, hi)
        }))
    }

    /// Largest deviation of any normal from unit length.
    pub fn max_normal_error(&self) -> f32 {
        self.normals
            .iter()
            .map(|n| (Vector3::from(*n).magnitude() - 1.0).abs())
            .fold(0.0, f32::max)
    }
}
