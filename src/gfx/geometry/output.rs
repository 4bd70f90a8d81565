//! # `.3d` Mesh Files
//!
//! Text format shared by the generator output and the scene model loader:
//!
//! ```text
//! <vertex count>
//! x y z            (one line per vertex)
//!
//! nx ny nz         (optional, one line per vertex)
//!
//! u v              (optional, one line per vertex)
//! ```
//!
//! Blocks are separated by a blank line. A file may carry positions only,
//! positions and normals, positions and texture coordinates, or all three.

use std::fs::File;
use std::io::{BufRead, BufWriter, Read, Write};
use std::path::Path;

use log::info;

use super::{GeneratorError, Mesh};

/// Writes `mesh` in the `.3d` format.
///
/// Attribute blocks are emitted only for attributes the mesh has.
pub fn write_mesh<W: Write>(mesh: &Mesh, out: &mut W) -> Result<(), GeneratorError> {
    writeln!(out, "{}", mesh.vertex_count())?;
    for [x, y, z] in &mesh.vertices {
        writeln!(out, "{} {} {}", x, y, z)?;
    }
    if mesh.has_normals() {
        writeln!(out)?;
        for [x, y, z] in &mesh.normals {
            writeln!(out, "{} {} {}", x, y, z)?;
        }
    }
    if mesh.has_tex_coords() {
        writeln!(out)?;
        for [u, v] in &mesh.tex_coords {
            writeln!(out, "{} {}", u, v)?;
        }
    }
    Ok(())
}

/// Writes `mesh` to a new file at `path`, replacing any existing file.
pub fn write_mesh_to_path(mesh: &Mesh, path: impl AsRef<Path>) -> Result<(), GeneratorError> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write_mesh(mesh, &mut out)?;
    out.flush()?;
    info!(
        "Wrote {} vertices ({} triangles) to {}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        path.display()
    );
    Ok(())
}

/// Runs a generator and writes its mesh to `path`.
///
/// Nothing is written if generation fails.
pub fn generate_and_write<F>(generate: F, path: impl AsRef<Path>) -> Result<Mesh, GeneratorError>
where
    F: FnOnce() -> Result<Mesh, GeneratorError>,
{
    let mesh = generate()?;
    write_mesh_to_path(&mesh, path)?;
    Ok(mesh)
}

/// Reads a mesh in the `.3d` format.
///
/// The number of values after the positions decides which attribute blocks
/// are present. Any other amount is reported as a malformed file.
pub fn read_mesh(mut reader: impl BufRead) -> Result<Mesh, GeneratorError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let mut tokens = text.split_whitespace();

    let count_token = tokens
        .next()
        .ok_or_else(|| GeneratorError::MalformedNumber("missing vertex count".to_string()))?;
    let count: usize = count_token
        .parse()
        .map_err(|_| GeneratorError::MalformedNumber(count_token.to_string()))?;
    if count % 3 != 0 {
        return Err(GeneratorError::MalformedNumber(format!(
            "vertex count {} is not a whole number of triangles",
            count
        )));
    }

    let values = tokens
        .map(|t| t.parse::<f32>().map_err(|_| GeneratorError::MalformedNumber(t.to_string())))
        .collect::<Result<Vec<f32>, _>>()?;

    let positions_len = count
        .checked_mul(3)
        .ok_or_else(|| GeneratorError::MalformedNumber(count_token.to_string()))?;
    if values.len() < positions_len {
        return Err(GeneratorError::MalformedNumber(format!(
            "expected {} vertices, found {} values",
            count,
            values.len()
        )));
    }

    let (positions, rest) = values.split_at(positions_len);
    let (normals, tex_coords): (&[f32], &[f32]) = match rest.len() {
        0 => (&[], &[]),
        n if n == count * 3 => (rest, &[]),
        n if n == count * 2 => (&[], rest),
        n if n == count * 5 => rest.split_at(count * 3),
        n => {
            return Err(GeneratorError::MalformedNumber(format!(
                "{} trailing values do not match {} vertices",
                n, count
            )))
        }
    };

    let mut mesh = Mesh::with_capacity(count, !normals.is_empty(), !tex_coords.is_empty())?;
    mesh.vertices
        .extend(positions.chunks_exact(3).map(|c| [c[0], c[1], c[2]]));
    mesh.normals
        .extend(normals.chunks_exact(3).map(|c| [c[0], c[1], c[2]]));
    mesh.tex_coords
        .extend(tex_coords.chunks_exact(2).map(|c| [c[0], c[1]]));
    Ok(mesh)
}

/// Reads a `.3d` file from disk.
pub fn read_mesh_from_path(path: impl AsRef<Path>) -> Result<Mesh, GeneratorError> {
    let file = File::open(path)?;
    read_mesh(std::io::BufReader::new(file))
}
