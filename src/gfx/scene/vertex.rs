//! # Vertex Data Structures
//!
//! GPU-compatible interleaved vertex format built from a [`Mesh`].

use crate::gfx::geometry::Mesh;

/// A 3D vertex with position, normal and texture coordinate.
///
/// # Memory Layout
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout, which is required for GPU buffer operations.
///
/// # Examples
///
/// ```
/// use orrery::gfx::scene::vertex::Vertex3D;
///
/// let vertex = Vertex3D {
///     position: [0.0, 1.0, 0.0],
///     normal: [0.0, 1.0, 0.0],
///     tex_coords: [0.5, 0.5],
/// };
/// assert_eq!(bytemuck::bytes_of(&vertex).len(), Vertex3D::SIZE);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz], zero if the mesh has no normals
    pub normal: [f32; 3],
    /// Texture coordinates [u, v], zero if the mesh has none
    pub tex_coords: [f32; 2],
}

impl Vertex3D {
    /// Size of one vertex in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Interleaves the attribute arrays of `mesh`.
    ///
    /// Missing normals and texture coordinates are filled with zeros.
    pub fn interleave(mesh: &Mesh) -> Vec<Vertex3D> {
        mesh.vertices
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex3D {
                position,
                normal: mesh.normals.get(i).copied().unwrap_or([0.0; 3]),
                tex_coords: mesh.tex_coords.get(i).copied().unwrap_or([0.0; 2]),
            })
            .collect()
    }
}
