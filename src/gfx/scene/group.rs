//! # Scene Graph
//!
//! A [`World`] owns one root [`Group`]. Every group owns its transforms, its
//! models and its child groups, so the graph is a tree with no sharing
//! between nodes. Meshes are the exception: several models may point at the
//! same loaded [`Mesh`] through an [`Arc`].

use std::sync::Arc;

use cgmath::{Matrix4, SquareMatrix};

use super::buffers::BufferHandle;
use super::transform::Transform;
use crate::animation::FrameTime;
use crate::gfx::camera::Camera;
use crate::gfx::geometry::Mesh;

/// A mesh placed in the scene.
#[derive(Debug, Clone)]
pub struct Model {
    /// Path or label the mesh was loaded from.
    pub name: String,
    pub mesh: Arc<Mesh>,
    /// Set once the mesh has been uploaded.
    pub buffer: Option<BufferHandle>,
}

impl Model {
    pub fn new(name: impl Into<String>, mesh: Arc<Mesh>) -> Self {
        Self {
            name: name.into(),
            mesh,
            buffer: None,
        }
    }
}

/// A node of the scene graph.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub transforms: Vec<Transform>,
    pub models: Vec<Model>,
    pub children: Vec<Group>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.models.push(model);
        self
    }

    pub fn with_child(mut self, child: Group) -> Self {
        self.children.push(child);
        self
    }

    /// Composition of this group's own transforms, in list order.
    pub fn local_matrix(&self, time: FrameTime) -> Matrix4<f32> {
        self.transforms
            .iter()
            .fold(Matrix4::identity(), |acc, t| acc * t.matrix(time))
    }

    /// Visits this group and all of its descendants, parents first.
    pub fn for_each<'a>(&'a self, f: &mut impl FnMut(&'a Group)) {
        f(self);
        for child in &self.children {
            child.for_each(f);
        }
    }

    /// Mutable counterpart of [`Group::for_each`].
    pub fn for_each_mut(&mut self, f: &mut impl FnMut(&mut Group)) {
        f(self);
        for child in &mut self.children {
            child.for_each_mut(f);
        }
    }
}

/// A camera and the scene graph it looks at.
#[derive(Debug, Clone)]
pub struct World {
    pub camera: Camera,
    pub root: Group,
}

impl World {
    pub fn new(camera: Camera, root: Group) -> Self {
        Self { camera, root }
    }

    /// Gets statistics about the world
    pub fn statistics(&self) -> WorldStatistics {
        let mut stats = WorldStatistics::default();
        self.root.for_each(&mut |group| {
            stats.group_count += 1;
            stats.model_count += group.models.len();
            stats.total_vertices += group.models.iter().map(|m| m.mesh.vertex_count()).sum::<usize>();
            stats.transform_count += group.transforms.len();
            stats.animated_transform_count += group.transforms.iter().filter(|t| t.is_animated()).count();
        });
        stats
    }
}

/// World statistics for debugging and logging
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorldStatistics {
    pub group_count: usize,
    pub model_count: usize,
    pub total_vertices: usize,
    pub transform_count: usize,
    pub animated_transform_count: usize,
}

impl WorldStatistics {
    pub fn total_triangles(&self) -> usize {
        self.total_vertices / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::gfx::geometry::generate_box;
    use cgmath::{Transform as _, Point3, Vector3};

    fn cube() -> Model {
        Model::new("box", Arc::new(generate_box(1.0, 1).unwrap()))
    }

    #[test]
    fn test_local_matrix_composes_in_order() {
        // translate then scale: the scale applies to the model first
        let group = Group::new()
            .with_transform(Transform::StaticTranslate(Vector3::new(1.0, 0.0, 0.0)))
            .with_transform(Transform::Scale(Vector3::new(2.0, 2.0, 2.0)));
        let p = group
            .local_matrix(FrameTime::ZERO)
            .transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_eq!(p, Point3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_empty_group_is_identity() {
        assert_eq!(Group::new().local_matrix(FrameTime::ZERO), Matrix4::identity());
    }

    #[test]
    fn test_statistics() {
        let root = Group::new()
            .with_model(cube())
            .with_child(
                Group::new()
                    .with_transform(Transform::rotate_time(2.0, Vector3::unit_y()))
                    .with_model(cube())
                    .with_child(Group::new()),
            );
        let world = World::new(EngineConfig::default().default_camera, root);
        let stats = world.statistics();
        assert_eq!(stats.group_count, 3);
        assert_eq!(stats.model_count, 2);
        assert_eq!(stats.total_vertices, 72);
        assert_eq!(stats.total_triangles(), 24);
        assert_eq!(stats.transform_count, 1);
        assert_eq!(stats.animated_transform_count, 1);
    }
}
