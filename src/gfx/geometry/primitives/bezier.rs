//! # Bézier Patches
//!
//! Bicubic Bézier surfaces read from a patch file and tessellated into
//! triangles.
//!
//! ## Patch file format
//!
//! ```text
//! <number of patches>
//! <16 comma separated control point indices>   (one line per patch)
//! <number of control points>
//! <x>, <y>, <z>                                (one line per control point)
//! ```
//!
//! Numbers may be separated by any mix of commas and whitespace.

use std::io::{BufRead, Read};

use cgmath::Vector3;
use log::debug;

use crate::gfx::geometry::{GeneratorError, Mesh};
use crate::math::normalize_or;

/// Cubic Bézier basis matrix. Symmetric, so `M = Mᵀ`.
#[rustfmt::skip]
const BEZIER: [[f32; 4]; 4] = [
    [-1.0,  3.0, -3.0, 1.0],
    [ 3.0, -6.0,  3.0, 0.0],
    [-3.0,  3.0,  0.0, 0.0],
    [ 1.0,  0.0,  0.0, 0.0],
];

type Mat4 = [[f32; 4]; 4];

/// Patches and the shared control point pool they index into.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierPatchSet {
    /// Each patch is a 4×4 grid of indices, row major.
    pub patches: Vec<[usize; 16]>,
    pub control_points: Vec<Vector3<f32>>,
}

/// Per-axis coefficient matrices `M · P · M` of one patch, reused for every
/// sample of that patch.
struct PatchCoefficients {
    axes: [Mat4; 3],
}

impl PatchCoefficients {
    fn new(control: &[Vector3<f32>; 16]) -> Self {
        let axes = [0, 1, 2].map(|axis| {
            let mut p = [[0.0f32; 4]; 4];
            for (k, row) in p.iter_mut().enumerate() {
                for (l, value) in row.iter_mut().enumerate() {
                    *value = control[k * 4 + l][axis];
                }
            }
            mat_mul(&mat_mul(&BEZIER, &p), &BEZIER)
        });
        Self { axes }
    }

    /// Evaluates `row · C · colᵀ` for every axis.
    fn eval(&self, row: [f32; 4], col: [f32; 4]) -> Vector3<f32> {
        let [x, y, z] = self.axes.map(|c| {
            (0..4)
                .map(|k| row[k] * (0..4).map(|l| c[k][l] * col[l]).sum::<f32>())
                .sum()
        });
        Vector3::new(x, y, z)
    }

    /// Unit surface normal `∂P/∂u × ∂P/∂v` at `(u, v)`.
    ///
    /// Poles of degenerate patches have a vanishing derivative; they get +Y.
    fn normal(&self, u: f32, v: f32) -> Vector3<f32> {
        let du = self.eval(powers(v), derivative_powers(u));
        let dv = self.eval(derivative_powers(v), powers(u));
        normalize_or(du.cross(dv), Vector3::unit_y())
    }
}

fn mat_mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [[0.0f32; 4]; 4];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, value) in row.iter_mut().enumerate() {
            *value = (0..4).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

fn grid_row(grid: &[Vector3<f32>; 16], r: usize) -> [Vector3<f32>; 4] {
    [grid[r * 4], grid[r * 4 + 1], grid[r * 4 + 2], grid[r * 4 + 3]]
}

fn powers(t: f32) -> [f32; 4] {
    [t * t * t, t * t, t, 1.0]
}

fn derivative_powers(t: f32) -> [f32; 4] {
    [3.0 * t * t, 2.0 * t, 1.0, 0.0]
}

/// Point on the cubic Bézier curve through `p` at parameter `t`.
pub fn bezier_curve(t: f32, p: [Vector3<f32>; 4]) -> Vector3<f32> {
    let t_pow = powers(t);
    let mut out = Vector3::new(0.0, 0.0, 0.0);
    for (k, point) in p.iter().enumerate() {
        let weight: f32 = (0..4).map(|i| t_pow[i] * BEZIER[i][k]).sum();
        out += *point * weight;
    }
    out
}

impl BezierPatchSet {
    /// Checks that the set is non-empty and every index names a control point.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.patches.is_empty() {
            return Err(GeneratorError::LessThanOnePatch);
        }
        if self.control_points.is_empty() {
            return Err(GeneratorError::LessThanOneControlPoint);
        }
        let count = self.control_points.len();
        match self.patches.iter().flatten().find(|&&i| i >= count) {
            Some(&index) => Err(GeneratorError::PatchIndexOutOfRange { index, count }),
            None => Ok(()),
        }
    }

    /// Control points of patch `index`, in patch order.
    fn control_grid(&self, index: usize) -> Result<[Vector3<f32>; 16], GeneratorError> {
        let patch = self.patches.get(index).ok_or(GeneratorError::NoSuchPatch {
            index,
            count: self.patches.len(),
        })?;
        let count = self.control_points.len();
        let mut grid = [Vector3::new(0.0, 0.0, 0.0); 16];
        for (slot, &i) in grid.iter_mut().zip(patch.iter()) {
            *slot = *self
                .control_points
                .get(i)
                .ok_or(GeneratorError::PatchIndexOutOfRange { index: i, count })?;
        }
        Ok(grid)
    }

    /// Surface point of patch `index` at `(u, v)`.
    ///
    /// Each row of the control grid is first evaluated as a curve at `u`,
    /// then the four results are blended at `v`. Fails if the patch or one
    /// of its control points does not exist.
    pub fn surface_point(&self, index: usize, u: f32, v: f32) -> Result<Vector3<f32>, GeneratorError> {
        let grid = self.control_grid(index)?;
        let rows = [0, 1, 2, 3].map(|r| bezier_curve(u, grid_row(&grid, r)));
        Ok(bezier_curve(v, rows))
    }

    /// Unit surface normal of patch `index` at `(u, v)`.
    pub fn surface_normal(&self, index: usize, u: f32, v: f32) -> Result<Vector3<f32>, GeneratorError> {
        Ok(PatchCoefficients::new(&self.control_grid(index)?).normal(u, v))
    }

    /// Tessellates every patch into a `tessellation × tessellation` grid of
    /// quads, two triangles each.
    pub fn tessellate(&self, tessellation: u32) -> Result<Mesh, GeneratorError> {
        if tessellation == 0 {
            return Err(GeneratorError::ZeroTessellation);
        }
        self.validate()?;

        let tess = tessellation as usize;
        let total_vertex_count = self
            .patches
            .len()
            .checked_mul(tess)
            .and_then(|n| n.checked_mul(tess))
            .and_then(|n| n.checked_mul(6))
            .ok_or(GeneratorError::OutOfMemory)?;
        let mut mesh = Mesh::with_capacity(total_vertex_count, true, true)?;

        let step = 1.0 / tessellation as f32;

        for index in 0..self.patches.len() {
            let grid = self.control_grid(index)?;
            let coefficients = PatchCoefficients::new(&grid);

            for i in 0..tessellation {
                let u = i as f32 * step;
                let u_next = (i + 1) as f32 * step;

                let curr = [0, 1, 2, 3].map(|r| bezier_curve(u, grid_row(&grid, r)));
                let next = [0, 1, 2, 3].map(|r| bezier_curve(u_next, grid_row(&grid, r)));

                for j in 0..tessellation {
                    let v = j as f32 * step;
                    let v_next = (j + 1) as f32 * step;

                    let pa = bezier_curve(v, curr);
                    let pb = bezier_curve(v, next);
                    let pc = bezier_curve(v_next, curr);
                    let pd = bezier_curve(v_next, next);

                    let na = coefficients.normal(u, v);
                    let nb = coefficients.normal(u_next, v);
                    let nc = coefficients.normal(u, v_next);
                    let nd = coefficients.normal(u_next, v_next);

                    mesh.push(pa, na, [u, v]);
                    mesh.push(pb, nb, [u_next, v]);
                    mesh.push(pc, nc, [u, v_next]);

                    mesh.push(pb, nb, [u_next, v]);
                    mesh.push(pd, nd, [u_next, v_next]);
                    mesh.push(pc, nc, [u, v_next]);
                }
            }
        }

        Ok(mesh)
    }
}

/// Whitespace and comma separated numbers of a patch file.
struct Tokens {
    text: String,
    pos: usize,
}

impl Tokens {
    fn read(mut reader: impl BufRead) -> Result<Self, GeneratorError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self { text, pos: 0 })
    }

    fn next_token(&mut self) -> Option<&str> {
        let is_sep = |c: char| c.is_whitespace() || c == ',';
        let rest = &self.text[self.pos..];
        let start = rest.find(|c: char| !is_sep(c))?;
        let len = rest[start..].find(is_sep).unwrap_or(rest.len() - start);
        let token = &self.text[self.pos + start..self.pos + start + len];
        self.pos += start + len;
        Some(token)
    }

    fn parse<T: std::str::FromStr>(&mut self) -> Result<T, GeneratorError> {
        let token = self
            .next_token()
            .ok_or_else(|| GeneratorError::MalformedNumber("unexpected end of patch file".to_string()))?;
        token
            .parse()
            .map_err(|_| GeneratorError::MalformedNumber(token.to_string()))
    }
}

/// Reads a patch file.
///
/// # Errors
/// * [`GeneratorError::Io`] if the reader fails
/// * [`GeneratorError::MalformedNumber`] on a token that is not a number, or on early end of input
/// * [`GeneratorError::LessThanOnePatch`] / [`GeneratorError::LessThanOneControlPoint`] on empty sections
/// * [`GeneratorError::PatchIndexOutOfRange`] if a patch names a missing control point
pub fn parse_patch_file(reader: impl BufRead) -> Result<BezierPatchSet, GeneratorError> {
    let mut tokens = Tokens::read(reader)?;

    let num_patches: usize = tokens.parse()?;
    if num_patches < 1 {
        return Err(GeneratorError::LessThanOnePatch);
    }

    let mut patches = Vec::new();
    patches.try_reserve_exact(num_patches)?;
    for _ in 0..num_patches {
        let mut patch = [0usize; 16];
        for index in patch.iter_mut() {
            *index = tokens.parse()?;
        }
        patches.push(patch);
    }

    let num_ctrl_points: usize = tokens.parse()?;
    if num_ctrl_points < 1 {
        return Err(GeneratorError::LessThanOneControlPoint);
    }

    let mut control_points = Vec::new();
    control_points.try_reserve_exact(num_ctrl_points)?;
    for _ in 0..num_ctrl_points {
        let x = tokens.parse()?;
        let y = tokens.parse()?;
        let z = tokens.parse()?;
        control_points.push(Vector3::new(x, y, z));
    }

    let set = BezierPatchSet {
        patches,
        control_points,
    };
    set.validate()?;

    debug!(
        "Parsed {} bezier patches over {} control points",
        num_patches, num_ctrl_points
    );

    Ok(set)
}

/// Reads a patch file and tessellates it.
///
/// A zero tessellation is rejected before the input is read.
pub fn generate_bezier_patch(reader: impl BufRead, tessellation: u32) -> Result<Mesh, GeneratorError> {
    if tessellation == 0 {
        return Err(GeneratorError::ZeroTessellation);
    }
    parse_patch_file(reader)?.tessellate(tessellation)
}
