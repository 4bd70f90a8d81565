//! Axis-aligned box centered at the origin.

use cgmath::Vector3;

use crate::gfx::geometry::{GeneratorError, Mesh};

/// Which end of a division a corner sits on, along one of the two face axes.
#[derive(Clone, Copy)]
enum Edge {
    Lo,
    Hi,
}

use Edge::{Hi, Lo};

/// One face of the box, tessellated in its own `(a, b)` parametric frame.
struct Face {
    /// Maps face coordinates `(a, b)` and the side length onto the 3D corner
    /// of the uncentered box, which spans `[0, side]` on every axis.
    place: fn(f32, f32, f32) -> [f32; 3],
    normal: [f32; 3],
    /// Corner order of the two triangles of each division, counter-clockwise
    /// when seen from outside the box.
    triangles: [[(Edge, Edge); 3]; 2],
}

/// Faces in emission order: front, back, left, right, top, bottom.
const FACES: [Face; 6] = [
    // front, z = side, (a, b) = (x, y)
    Face {
        place: |a, b, s| [a, b, s],
        normal: [0.0, 0.0, 1.0],
        triangles: [
            [(Lo, Hi), (Lo, Lo), (Hi, Hi)],
            [(Hi, Hi), (Lo, Lo), (Hi, Lo)],
        ],
    },
    // back, z = 0, (a, b) = (x, y)
    Face {
        place: |a, b, _| [a, b, 0.0],
        normal: [0.0, 0.0, -1.0],
        triangles: [
            [(Lo, Hi), (Hi, Lo), (Lo, Lo)],
            [(Hi, Hi), (Hi, Lo), (Lo, Hi)],
        ],
    },
    // left, x = 0, (a, b) = (y, z)
    Face {
        place: |a, b, _| [0.0, a, b],
        normal: [-1.0, 0.0, 0.0],
        triangles: [
            [(Hi, Lo), (Lo, Lo), (Hi, Hi)],
            [(Hi, Hi), (Lo, Lo), (Lo, Hi)],
        ],
    },
    // right, x = side, (a, b) = (y, z)
    Face {
        place: |a, b, s| [s, a, b],
        normal: [1.0, 0.0, 0.0],
        triangles: [
            [(Hi, Hi), (Lo, Hi), (Hi, Lo)],
            [(Hi, Lo), (Lo, Hi), (Lo, Lo)],
        ],
    },
    // top, y = side, (a, b) = (x, z)
    Face {
        place: |a, b, s| [a, s, b],
        normal: [0.0, 1.0, 0.0],
        triangles: [
            [(Lo, Lo), (Lo, Hi), (Hi, Lo)],
            [(Hi, Lo), (Lo, Hi), (Hi, Hi)],
        ],
    },
    // bottom, y = 0, (a, b) = (x, z)
    Face {
        place: |a, b, _| [a, 0.0, b],
        normal: [0.0, -1.0, 0.0],
        triangles: [
            [(Lo, Hi), (Lo, Lo), (Hi, Hi)],
            [(Hi, Hi), (Lo, Lo), (Hi, Lo)],
        ],
    },
];

/// Generate a box of side `side_len` centered at the origin.
///
/// Every face is split into `num_divs × num_divs` square divisions, each made
/// of two triangles. Normals point out of the face and texture coordinates
/// span `[0, 1]²` on every face.
///
/// # Errors
/// [`GeneratorError::ZeroDivisions`] if `num_divs == 0`.
pub fn generate_box(side_len: f32, num_divs: u32) -> Result<Mesh, GeneratorError> {
    if num_divs == 0 {
        return Err(GeneratorError::ZeroDivisions);
    }

    let divs = num_divs as usize;
    let total_vertex_count = divs
        .checked_mul(divs)
        .and_then(|n| n.checked_mul(6 * 2 * 3))
        .ok_or(GeneratorError::OutOfMemory)?;
    let mut mesh = Mesh::with_capacity(total_vertex_count, true, true)?;

    let div_len = side_len / num_divs as f32;
    let div_uv = 1.0 / num_divs as f32;
    let half = side_len / 2.0;

    for face in &FACES {
        let normal = Vector3::from(face.normal);

        for row in 0..num_divs {
            let b = |edge: Edge| match edge {
                Lo => row as f32,
                Hi => (row + 1) as f32,
            };

            for col in 0..num_divs {
                let a = |edge: Edge| match edge {
                    Lo => col as f32,
                    Hi => (col + 1) as f32,
                };

                for triangle in &face.triangles {
                    for &(ea, eb) in triangle {
                        let [x, y, z] = (face.place)(a(ea) * div_len, b(eb) * div_len, side_len);
                        mesh.push(
                            Vector3::new(x - half, y - half, z - half),
                            normal,
                            [a(ea) * div_uv, b(eb) * div_uv],
                        );
                    }
                }
            }
        }
    }

    Ok(mesh)
}
