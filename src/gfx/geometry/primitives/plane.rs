use cgmath::Vector3;

use crate::gfx::geometry::{GeneratorError, Mesh};

/// Generate a flat square on the xOz plane, centered at the origin and facing +Y.
///
/// The square is split into `num_divs × num_divs` cells of two triangles.
/// Texture coordinates map the square onto `[0, 1]²` with V flipped, so the
/// first row of cells (lowest z) touches `v = 1`.
///
/// # Errors
/// [`GeneratorError::ZeroDivisions`] if `num_divs == 0`.
pub fn generate_plane(side_len: f32, num_divs: u32) -> Result<Mesh, GeneratorError> {
    if num_divs == 0 {
        return Err(GeneratorError::ZeroDivisions);
    }

    let divs = num_divs as usize;
    let total_vertex_count = divs
        .checked_mul(divs)
        .and_then(|n| n.checked_mul(2 * 3))
        .ok_or(GeneratorError::OutOfMemory)?;
    let mut mesh = Mesh::with_capacity(total_vertex_count, true, true)?;

    let div_len = side_len / num_divs as f32;
    let div_uv = 1.0 / num_divs as f32;
    let half = side_len / 2.0;
    let up = Vector3::unit_y();

    for row in 0..num_divs {
        let lo_z = row as f32 * div_len - half;
        let hi_z = (row + 1) as f32 * div_len - half;
        let lo_v = (num_divs - row) as f32 * div_uv;
        let hi_v = (num_divs - row - 1) as f32 * div_uv;

        for col in 0..num_divs {
            let lo_x = col as f32 * div_len - half;
            let hi_x = (col + 1) as f32 * div_len - half;
            let lo_u = col as f32 * div_uv;
            let hi_u = (col + 1) as f32 * div_uv;

            mesh.push(Vector3::new(lo_x, 0.0, lo_z), up, [lo_u, lo_v]);
            mesh.push(Vector3::new(lo_x, 0.0, hi_z), up, [lo_u, hi_v]);
            mesh.push(Vector3::new(hi_x, 0.0, lo_z), up, [hi_u, lo_v]);

            mesh.push(Vector3::new(hi_x, 0.0, lo_z), up, [hi_u, lo_v]);
            mesh.push(Vector3::new(lo_x, 0.0, hi_z), up, [lo_u, hi_v]);
            mesh.push(Vector3::new(hi_x, 0.0, hi_z), up, [hi_u, hi_v]);
        }
    }

    Ok(mesh)
}
