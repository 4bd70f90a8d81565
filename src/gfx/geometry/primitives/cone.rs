//! Cone standing on the xOz plane with its apex on the +Y axis.

use std::f32::consts::PI;

use cgmath::Vector3;

use crate::gfx::geometry::{GeneratorError, Mesh};
use crate::math::{cylindrical_to_cartesian, normalize_or};

/// Generate a cone with its base centered at the origin and apex at
/// `(0, height, 0)`.
///
/// Vertices are laid out in cylindrical coordinates `(radius, height,
/// azimuth)` and converted to cartesian once the slice is complete. Each slice
/// is a base triangle, `num_stacks - 1` body quads whose radius shrinks
/// linearly towards the apex, and an apex triangle. The side of a slice is
/// flat shaded with a single normal.
///
/// # Errors
/// * [`GeneratorError::TooFewSlices`] if `num_slices <= 2`
/// * [`GeneratorError::ZeroStacks`] if `num_stacks == 0`
pub fn generate_cone(
    radius: f32,
    height: f32,
    num_slices: u32,
    num_stacks: u32,
) -> Result<Mesh, GeneratorError> {
    if num_slices <= 2 {
        return Err(GeneratorError::TooFewSlices(num_slices));
    }
    if num_stacks == 0 {
        return Err(GeneratorError::ZeroStacks);
    }

    let total_vertex_count = 6usize
        .checked_mul(num_slices as usize)
        .and_then(|n| n.checked_mul(num_stacks as usize))
        .ok_or(GeneratorError::OutOfMemory)?;
    let mut mesh = Mesh::with_capacity(total_vertex_count, true, true)?;

    let stacks = num_stacks as f32;
    let slice_angle = 2.0 * PI / num_slices as f32;
    let radius_step = radius / stacks;
    let stack_height = height / stacks;
    let top_height = height - stack_height;
    let tex_slice = 1.0 / num_slices as f32;
    let tex_stack = 1.0 / stacks;

    let base_normal = -Vector3::unit_y();
    let apex = Vector3::new(0.0, height, 0.0);

    for i in 0..num_slices {
        let curr_angle = i as f32 * slice_angle;
        let next_angle = (i + 1) as f32 * slice_angle;
        let curr_u = i as f32 * tex_slice;
        let next_u = (i + 1) as f32 * tex_slice;

        let cyl = |r: f32, h: f32, theta: f32| cylindrical_to_cartesian(Vector3::new(r, h, theta));

        // base
        mesh.push(Vector3::new(0.0, 0.0, 0.0), base_normal, [0.5, 0.5]);
        mesh.push(
            cyl(radius, 0.0, next_angle),
            base_normal,
            [0.5 + 0.5 * next_angle.cos(), 0.5 + 0.5 * next_angle.sin()],
        );
        mesh.push(
            cyl(radius, 0.0, curr_angle),
            base_normal,
            [0.5 + 0.5 * curr_angle.cos(), 0.5 + 0.5 * curr_angle.sin()],
        );

        // A zero radius (or height) collapses the side, fall back to +Y.
        let a = cyl(radius, 0.0, curr_angle);
        let b = cyl(radius, 0.0, next_angle);
        let c = cyl(radius - radius_step, stack_height, curr_angle);
        let side_normal = normalize_or((b - a).cross(c - a), Vector3::unit_y());

        for j in 0..num_stacks - 1 {
            let curr_r = radius - j as f32 * radius_step;
            let next_r = radius - (j + 1) as f32 * radius_step;
            let curr_h = j as f32 * stack_height;
            let next_h = (j + 1) as f32 * stack_height;
            let curr_v = j as f32 * tex_stack;
            let next_v = (j + 1) as f32 * tex_stack;

            mesh.push(cyl(next_r, next_h, next_angle), side_normal, [next_u, next_v]);
            mesh.push(cyl(next_r, next_h, curr_angle), side_normal, [curr_u, next_v]);
            mesh.push(cyl(curr_r, curr_h, next_angle), side_normal, [next_u, curr_v]);

            mesh.push(cyl(curr_r, curr_h, curr_angle), side_normal, [curr_u, curr_v]);
            mesh.push(cyl(curr_r, curr_h, next_angle), side_normal, [next_u, curr_v]);
            mesh.push(cyl(next_r, next_h, curr_angle), side_normal, [curr_u, next_v]);
        }

        // apex
        let top_v = tex_stack * (num_stacks - 1) as f32;
        mesh.push(apex, side_normal, [curr_u, 1.0]);
        mesh.push(cyl(radius_step, top_height, curr_angle), side_normal, [curr_u, top_v]);
        mesh.push(cyl(radius_step, top_height, next_angle), side_normal, [next_u, top_v]);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn test_cone_vertex_count() {
        for (slices, stacks) in [(3, 1), (8, 4), (32, 3)] {
            let mesh = generate_cone(1.0, 2.0, slices, stacks).unwrap();
            assert_eq!(mesh.vertex_count(), 6 * slices as usize * stacks as usize);
            assert!(mesh.is_well_formed());
        }
    }

    #[test]
    fn test_cone_zero_radius_has_no_nans() {
        let mesh = generate_cone(0.0, 1.0, 3, 1).unwrap();
        assert!(mesh.is_well_formed());
        assert!(mesh.vertices.iter().flatten().all(|c| c.is_finite()));
        assert!(mesh.normals.iter().flatten().all(|c| c.is_finite()));
        assert!(mesh.tex_coords.iter().flatten().all(|c| c.is_finite()));
    }

    #[test]
    fn test_cone_stays_inside_bounds() {
        let mesh = generate_cone(2.0, 5.0, 16, 4).unwrap();
        for v in &mesh.vertices {
            let radial = (v[0] * v[0] + v[2] * v[2]).sqrt();
            assert!(radial <= 2.0 + 1e-5);
            assert!((0.0..=5.0 + 1e-5).contains(&v[1]));
            // radius shrinks linearly with height
            assert!(radial <= 2.0 * (1.0 - v[1] / 5.0) + 1e-4);
        }
        assert!(mesh.vertices.contains(&[0.0, 5.0, 0.0]));
    }

    #[test]
    fn test_cone_winds_outward() {
        let mesh = generate_cone(1.0, 1.0, 12, 3).unwrap();
        for tri in 0..mesh.triangle_count() {
            let geometric = mesh.face_normal(tri).unwrap();
            let declared = Vector3::from(mesh.normals[tri * 3]);
            assert!(geometric.dot(declared) > 0.0, "triangle {} winds inward", tri);
        }
    }

    #[test]
    fn test_cone_parameter_validation() {
        assert!(matches!(generate_cone(1.0, 1.0, 2, 5), Err(GeneratorError::TooFewSlices(2))));
        assert!(matches!(generate_cone(1.0, 1.0, 5, 0), Err(GeneratorError::ZeroStacks)));
    }
}
