//! Loading of model files referenced by a scene.
//!
//! `.3d` files are read in the generator's output format. `.obj` files go
//! through `tobj`, triangulated and flattened so that every face corner
//! becomes its own vertex.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};

use super::error::ParseError;
use crate::gfx::geometry::{read_mesh_from_path, GeneratorError, Mesh};

/// Model file formats the engine can load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    ThreeD,
    Obj,
}

impl ModelFormat {
    /// Picks the format from a file name's extension.
    pub fn from_file_name(name: &str) -> Result<Self, ParseError> {
        if name.ends_with(".3d") {
            Ok(ModelFormat::ThreeD)
        } else if name.ends_with(".obj") {
            Ok(ModelFormat::Obj)
        } else {
            Err(ParseError::AmbiguousModelExtension(name.to_string()))
        }
    }
}

/// Loads a model file, dispatching on its extension.
pub fn load_model(path: &Path) -> Result<Mesh, ParseError> {
    let format = ModelFormat::from_file_name(&path.to_string_lossy())?;
    if !path.is_file() {
        return Err(ParseError::NoModelFile(path.to_path_buf()));
    }
    match format {
        ModelFormat::ThreeD => load_3d(path),
        ModelFormat::Obj => load_obj(path),
    }
}

fn load_3d(path: &Path) -> Result<Mesh, ParseError> {
    read_mesh_from_path(path).map_err(|source| match source {
        GeneratorError::OutOfMemory => ParseError::OutOfMemory,
        source => ParseError::Model {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Loads an OBJ file and flattens its indexed faces into a triangle list.
///
/// Normals and texture coordinates are kept only when every shape in the
/// file provides them.
pub fn load_obj(path: &Path) -> Result<Mesh, ParseError> {
    let obj_error = |source: tobj::LoadError| ParseError::ObjLoader {
        path: path.to_path_buf(),
        source,
    };

    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(obj_error)?;

    if let Err(e) = materials {
        warn!("Ignoring materials of {}: {}", path.display(), e);
    }

    let vertex_count: usize = models.iter().map(|m| m.mesh.indices.len()).sum();
    let with_normals = !models.is_empty()
        && models
            .iter()
            .all(|m| !m.mesh.normals.is_empty() && m.mesh.normals.len() == m.mesh.positions.len());
    let with_tex_coords = !models.is_empty()
        && models
            .iter()
            .all(|m| !m.mesh.texcoords.is_empty() && m.mesh.texcoords.len() / 2 == m.mesh.positions.len() / 3);

    let mut mesh =
        Mesh::with_capacity(vertex_count, with_normals, with_tex_coords).map_err(|_| ParseError::OutOfMemory)?;

    for model in &models {
        let source = &model.mesh;
        debug!(
            "OBJ shape '{}': {} positions, {} indices",
            model.name,
            source.positions.len() / 3,
            source.indices.len()
        );
        for &index in &source.indices {
            let i = index as usize;
            let position = triple(&source.positions, i)
                .ok_or_else(|| obj_error(tobj::LoadError::FaceVertexOutOfBounds))?;
            mesh.vertices.push(position);
            if with_normals {
                let normal = triple(&source.normals, i)
                    .ok_or_else(|| obj_error(tobj::LoadError::FaceNormalOutOfBounds))?;
                mesh.normals.push(normal);
            }
            if with_tex_coords {
                let uv = source
                    .texcoords
                    .get(i * 2..i * 2 + 2)
                    .ok_or_else(|| obj_error(tobj::LoadError::FaceTexCoordOutOfBounds))?;
                mesh.tex_coords.push([uv[0], uv[1]]);
            }
        }
    }

    Ok(mesh)
}

fn triple(values: &[f32], index: usize) -> Option<[f32; 3]> {
    let v = values.get(index * 3..index * 3 + 3)?;
    Some([v[0], v[1], v[2]])
}

/// Meshes loaded so far, keyed by resolved path.
///
/// Groups that reference the same file share one [`Mesh`].
#[derive(Debug, Default)]
pub struct ModelCache {
    meshes: HashMap<PathBuf, Arc<Mesh>>,
    hits: usize,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached mesh for `path`, loading it on first use.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Mesh>, ParseError> {
        if let Some(mesh) = self.meshes.get(path) {
            self.hits += 1;
            return Ok(Arc::clone(mesh));
        }
        let mesh = Arc::new(load_model(path)?);
        debug!("Loaded {} ({} vertices)", path.display(), mesh.vertex_count());
        self.meshes.insert(path.to_path_buf(), Arc::clone(&mesh));
        Ok(mesh)
    }

    /// Number of distinct files loaded.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Number of loads served from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::gfx::geometry::{generate_box, write_mesh_to_path};

    const QUAD_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1 4//1
";

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ModelFormat::from_file_name("a/b.3d").unwrap(), ModelFormat::ThreeD);
        assert_eq!(ModelFormat::from_file_name("b.obj").unwrap(), ModelFormat::Obj);
        assert!(matches!(
            ModelFormat::from_file_name("b.stl"),
            Err(ParseError::AmbiguousModelExtension(name)) if name == "b.stl"
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nothing.3d");
        assert!(matches!(load_model(&path), Err(ParseError::NoModelFile(p)) if p == path));
    }

    #[test]
    fn test_load_3d_round_trips_generator_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("box.3d");
        let mesh = generate_box(2.0, 2).unwrap();
        write_mesh_to_path(&mesh, &path).unwrap();

        let loaded = load_model(&path).unwrap();
        assert_eq!(loaded.vertex_count(), mesh.vertex_count());
        assert!(loaded.has_normals());
        assert!(loaded.has_tex_coords());
    }

    #[test]
    fn test_malformed_3d_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.3d");
        fs::write(&path, "3\n0 0 zero\n").unwrap();
        assert!(matches!(load_model(&path), Err(ParseError::Model { path: p, .. }) if p == path));
    }

    #[test]
    fn test_3d_with_partial_triangle_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("four.3d");
        fs::write(&path, "4\n0 0 0\n1 0 0\n0 1 0\n0 0 1\n").unwrap();
        assert!(matches!(
            load_model(&path),
            Err(ParseError::Model {
                source: GeneratorError::MalformedNumber(_),
                ..
            })
        ));
    }

    #[test]
    fn test_obj_quad_is_triangulated_and_flattened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.obj");
        fs::write(&path, QUAD_OBJ).unwrap();

        let mesh = load_model(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert!(mesh.is_well_formed());
        assert!(mesh.has_normals());
        assert!(!mesh.has_tex_coords());
        assert!(mesh.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
        assert_eq!(mesh.bounds(), Some(([0.0, 0.0, 0.0], [1.0, 1.0, 0.0])));
    }

    #[test]
    fn test_cache_shares_meshes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.obj");
        fs::write(&path, QUAD_OBJ).unwrap();

        let mut cache = ModelCache::new();
        let a = cache.load(&path).unwrap();
        let b = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
    }
}
