//! UV sphere centered at the origin.

use std::f32::consts::{FRAC_PI_2, PI};

use cgmath::Vector3;

use crate::gfx::geometry::{GeneratorError, Mesh};

/// Generate a sphere of the given radius centered at the origin.
///
/// The sphere is cut into `num_slices` wedges around the Y axis and
/// `num_stacks` bands from the north pole down. The polar angle is measured
/// from the equator, so stack `i` spans `π/2 − i·π/num_stacks` to
/// `π/2 − (i+1)·π/num_stacks`. The first and last stacks are triangle fans
/// through the poles, every other stack is a ring of quads.
///
/// # Errors
/// * [`GeneratorError::TooFewSlices`] if `num_slices <= 2`
/// * [`GeneratorError::TooFewStacks`] if `num_stacks <= 1`
pub fn generate_sphere(radius: f32, num_slices: u32, num_stacks: u32) -> Result<Mesh, GeneratorError> {
    if num_slices <= 2 {
        return Err(GeneratorError::TooFewSlices(num_slices));
    }
    if num_stacks <= 1 {
        return Err(GeneratorError::TooFewStacks(num_stacks));
    }

    let slice_angle = 2.0 * PI / num_slices as f32;
    let stack_angle = PI / num_stacks as f32;

    let total_vertex_count = 6usize
        .checked_mul((num_stacks - 1) as usize)
        .and_then(|n| n.checked_mul(num_slices as usize))
        .ok_or(GeneratorError::OutOfMemory)?;
    let mut mesh = Mesh::with_capacity(total_vertex_count, true, true)?;

    // Unit direction for a (stack angle, slice angle) pair.
    let direction = |stack: f32, slice: f32| {
        Vector3::new(stack.cos() * slice.sin(), stack.sin(), stack.cos() * slice.cos())
    };

    let last_stack = num_stacks - 1;

    for i in 0..num_stacks {
        let curr_stack = FRAC_PI_2 - i as f32 * stack_angle;
        let next_stack = FRAC_PI_2 - (i + 1) as f32 * stack_angle;
        let curr_v = 1.0 - i as f32 / num_stacks as f32;
        let next_v = 1.0 - (i + 1) as f32 / num_stacks as f32;

        for j in 0..num_slices {
            let curr_slice = j as f32 * slice_angle;
            let next_slice = (j + 1) as f32 * slice_angle;
            let curr_u = j as f32 / num_slices as f32;
            let next_u = (j + 1) as f32 / num_slices as f32;

            let mut emit = |stack: f32, slice: f32, uv: [f32; 2]| {
                let n = direction(stack, slice);
                mesh.push(n * radius, n, uv);
            };

            if i < last_stack {
                emit(curr_stack, curr_slice, [curr_u, curr_v]);
                emit(next_stack, curr_slice, [curr_u, next_v]);
                emit(next_stack, next_slice, [next_u, next_v]);
            } else {
                emit(next_stack, next_slice, [next_u, next_v]);
                emit(curr_stack, next_slice, [next_u, curr_v]);
                emit(curr_stack, curr_slice, [curr_u, curr_v]);
            }

            if i > 0 && i < last_stack {
                emit(next_stack, next_slice, [next_u, next_v]);
                emit(curr_stack, next_slice, [next_u, curr_v]);
                emit(curr_stack, curr_slice, [curr_u, curr_v]);
            }
        }
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;
    use rand::Rng;

    #[test]
    fn test_sphere_vertex_count() {
        for (slices, stacks) in [(3, 2), (8, 4), (16, 9), (5, 30)] {
            let mesh = generate_sphere(1.0, slices, stacks).unwrap();
            assert_eq!(mesh.vertex_count(), 6 * (stacks as usize - 1) * slices as usize);
            assert!(mesh.is_well_formed());
        }
    }

    #[test]
    fn test_sphere_vertices_on_surface() {
        let mut rng = rand::rng();
        for _ in 0..10 {
            let radius = rng.random_range(0.1..50.0f32);
            let slices = rng.random_range(3..24);
            let stacks = rng.random_range(2..24);
            let mesh = generate_sphere(radius, slices, stacks).unwrap();
            for v in &mesh.vertices {
                let d = Vector3::from(*v).magnitude();
                assert!((d - radius).abs() <= radius * 1e-5, "r={} d={}", radius, d);
            }
        }
    }

    #[test]
    fn test_sphere_winds_outward() {
        let mesh = generate_sphere(2.0, 12, 6).unwrap();
        for tri in 0..mesh.triangle_count() {
            let geometric = mesh.face_normal(tri).unwrap();
            let outward: Vector3<f32> = (0..3)
                .map(|k| Vector3::from(mesh.vertices[tri * 3 + k]))
                .fold(Vector3::new(0.0, 0.0, 0.0), |acc, v| acc + v);
            assert!(geometric.dot(outward) > 0.0, "triangle {} winds inward", tri);
        }
    }

    #[test]
    fn test_sphere_normals_are_unit() {
        let mesh = generate_sphere(7.0, 10, 5).unwrap();
        assert!(mesh.max_normal_error() < 1e-5);
    }

    #[test]
    fn test_sphere_parameter_validation() {
        assert!(matches!(generate_sphere(1.0, 2, 5), Err(GeneratorError::TooFewSlices(2))));
        assert!(matches!(generate_sphere(1.0, 5, 1), Err(GeneratorError::TooFewStacks(1))));
        assert!(matches!(generate_sphere(1.0, 0, 0), Err(GeneratorError::TooFewSlices(0))));
    }
}
