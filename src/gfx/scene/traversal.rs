//! # Scene Traversal
//!
//! Depth-first, pre-order walk of the scene graph. The composed transform is
//! passed down by value: a group's transforms are applied in list order on
//! top of what its parent handed it, its models are reported under the
//! result, and each child receives a copy of that result. Nothing is written
//! back on the way up, so sibling subtrees never observe each other's
//! transforms.

use cgmath::{Matrix4, Point3, SquareMatrix};

use super::group::{Group, Model, World};
use super::transform::Transform;
use crate::animation::FrameTime;

/// Receives the output of a traversal.
pub trait SceneVisitor {
    /// Called once per model with the transform of its group.
    fn visit_model(&mut self, transform: &Matrix4<f32>, model: &Model);

    /// Called for each animated translation, with the transform in effect
    /// just before it is applied, so the path is drawn in the space the
    /// object moves in.
    fn visit_path(&mut self, _transform: &Matrix4<f32>, _path: &[Point3<f32>]) {}
}

impl<F> SceneVisitor for F
where
    F: FnMut(&Matrix4<f32>, &Model),
{
    fn visit_model(&mut self, transform: &Matrix4<f32>, model: &Model) {
        self(transform, model)
    }
}

/// Walks `group` and its descendants under the inherited `parent` transform.
pub fn traverse<V: SceneVisitor + ?Sized>(group: &Group, parent: Matrix4<f32>, time: FrameTime, visitor: &mut V) {
    let mut composed = parent;
    for transform in &group.transforms {
        if let Transform::DynamicTranslate(dynamic) = transform {
            visitor.visit_path(&composed, dynamic.path_guide());
        }
        composed = composed * transform.matrix(time);
    }

    for model in &group.models {
        visitor.visit_model(&composed, model);
    }

    for child in &group.children {
        traverse(child, composed, time, visitor);
    }
}

/// One model with the transform it should be drawn with.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub transform: Matrix4<f32>,
    pub model: &'a Model,
}

impl World {
    /// Walks the whole world from the identity transform.
    pub fn traverse<V: SceneVisitor + ?Sized>(&self, time: FrameTime, visitor: &mut V) {
        traverse(&self.root, Matrix4::identity(), time, visitor);
    }

    /// Every model of the world with its composed transform, in traversal order.
    pub fn collect_draws(&self, time: FrameTime) -> Vec<DrawItem<'_>> {
        let mut draws = Vec::new();
        collect_into(&self.root, Matrix4::identity(), time, &mut draws);
        draws
    }
}

/// Per-frame counters gathered by a traversal.
///
/// A model counts as in front of the camera when its origin lands on the
/// positive side of the clip-space `w` axis.
#[derive(Debug, Clone, Copy)]
pub struct DrawStats {
    view_proj: Matrix4<f32>,
    pub draw_calls: u32,
    pub vertices: u64,
    pub in_front: u32,
    pub paths: u32,
    /// Models reached without an uploaded buffer.
    pub unbound: u32,
}

impl DrawStats {
    pub fn new(view_proj: Matrix4<f32>) -> Self {
        Self {
            view_proj,
            draw_calls: 0,
            vertices: 0,
            in_front: 0,
            paths: 0,
            unbound: 0,
        }
    }
}

impl SceneVisitor for DrawStats {
    fn visit_model(&mut self, transform: &Matrix4<f32>, model: &Model) {
        self.draw_calls += 1;
        self.vertices += model.mesh.vertex_count() as u64;
        if (self.view_proj * transform).w.w > 0.0 {
            self.in_front += 1;
        }
        if model.buffer.is_none() {
            self.unbound += 1;
        }
    }

    fn visit_path(&mut self, _transform: &Matrix4<f32>, _path: &[Point3<f32>]) {
        self.paths += 1;
    }
}

fn collect_into<'a>(group: &'a Group, parent: Matrix4<f32>, time: FrameTime, draws: &mut Vec<DrawItem<'a>>) {
    let composed = parent * group.local_matrix(time);
    draws.extend(group.models.iter().map(|model| DrawItem {
        transform: composed,
        model,
    }));
    for child in &group.children {
        collect_into(child, composed, time, draws);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use cgmath::{EuclideanSpace, InnerSpace, Transform as _, Vector3};

    use crate::animation::CatmullRom;
    use crate::config::EngineConfig;
    use crate::gfx::geometry::Mesh;
    use crate::gfx::scene::transform::DynamicTranslate;

    fn model(name: &str) -> Model {
        Model::new(name, Arc::new(Mesh::from_positions(vec![[0.0; 3]; 3])))
    }

    fn translate(x: f32, y: f32, z: f32) -> Transform {
        Transform::StaticTranslate(Vector3::new(x, y, z))
    }

    fn origin_of(m: &Matrix4<f32>) -> Vector3<f32> {
        m.transform_point(Point3::origin()).to_vec()
    }

    fn world(root: Group) -> World {
        World::new(EngineConfig::default().default_camera, root)
    }

    #[test]
    fn test_nested_translations_compose_and_siblings_are_isolated() {
        let root = Group::new()
            .with_child(
                Group::new()
                    .with_transform(translate(5.0, 0.0, 0.0))
                    .with_child(
                        Group::new()
                            .with_transform(translate(0.0, 5.0, 0.0))
                            .with_model(model("grandchild")),
                    ),
            )
            .with_child(Group::new().with_model(model("sibling")));

        let mut seen = Vec::new();
        world(root).traverse(FrameTime::ZERO, &mut |m: &Matrix4<f32>, model: &Model| {
            seen.push((model.name.clone(), origin_of(m)));
        });

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, "grandchild");
        assert_eq!(seen[0].1, Vector3::new(5.0, 5.0, 0.0));
        assert_eq!(seen[1].0, "sibling");
        assert_eq!(seen[1].1, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_models_share_group_transform_and_order_is_preorder() {
        let root = Group::new()
            .with_transform(translate(1.0, 0.0, 0.0))
            .with_model(model("a"))
            .with_model(model("b"))
            .with_child(Group::new().with_model(model("c")))
            .with_child(Group::new().with_transform(translate(0.0, 0.0, 2.0)).with_model(model("d")));

        let w = world(root);
        let draws = w.collect_draws(FrameTime::ZERO);
        let names: Vec<&str> = draws.iter().map(|d| d.model.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
        assert_eq!(draws[0].transform, draws[1].transform);
        assert_eq!(origin_of(&draws[2].transform), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(origin_of(&draws[3].transform), Vector3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn test_visitor_and_collect_agree() {
        let root = Group::new()
            .with_transform(Transform::rotate_time(4.0, Vector3::unit_y()))
            .with_child(
                Group::new()
                    .with_transform(translate(3.0, 0.0, 0.0))
                    .with_transform(Transform::Scale(Vector3::new(2.0, 2.0, 2.0)))
                    .with_model(model("m")),
            );
        let w = world(root);
        let time = FrameTime::from_millis(1000);

        let mut visited = Vec::new();
        w.traverse(time, &mut |m: &Matrix4<f32>, _: &Model| visited.push(*m));
        let collected: Vec<Matrix4<f32>> = w.collect_draws(time).iter().map(|d| d.transform).collect();
        assert_eq!(visited, collected);

        // a quarter turn about Y carries +X onto -Z
        assert!((origin_of(&visited[0]) - Vector3::new(0.0, 0.0, -3.0)).magnitude() < 1e-4);
    }

    #[derive(Default)]
    struct Recorder {
        paths: Vec<(Matrix4<f32>, usize)>,
        models: usize,
    }

    impl SceneVisitor for Recorder {
        fn visit_model(&mut self, _: &Matrix4<f32>, _: &Model) {
            self.models += 1;
        }

        fn visit_path(&mut self, transform: &Matrix4<f32>, path: &[Point3<f32>]) {
            self.paths.push((*transform, path.len()));
        }
    }

    #[test]
    fn test_path_is_reported_before_its_translation() {
        let curve = CatmullRom::new(vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, -1.0),
        ])
        .unwrap();
        let root = Group::new()
            .with_transform(translate(0.0, 7.0, 0.0))
            .with_transform(Transform::DynamicTranslate(DynamicTranslate::new(10, true, curve)))
            .with_model(model("rider"));

        let mut recorder = Recorder::default();
        world(root).traverse(FrameTime::from_millis(2500), &mut recorder);

        assert_eq!(recorder.models, 1);
        assert_eq!(recorder.paths.len(), 1);
        assert_eq!(origin_of(&recorder.paths[0].0), Vector3::new(0.0, 7.0, 0.0));
        assert_eq!(recorder.paths[0].1, crate::animation::spline::PATH_GUIDE_SAMPLES);
    }

    #[test]
    fn test_draw_stats() {
        let camera = EngineConfig::default().default_camera;
        let root = Group::new()
            .with_model(model("origin"))
            .with_child(
                Group::new()
                    .with_transform(translate(30.0, 30.0, 30.0))
                    .with_model(model("behind")),
            );
        let w = world(root);

        let mut stats = DrawStats::new(camera.build_view_projection_matrix(1.0));
        w.traverse(FrameTime::ZERO, &mut stats);
        assert_eq!(stats.draw_calls, 2);
        assert_eq!(stats.vertices, 6);
        assert_eq!(stats.in_front, 1);
        assert_eq!(stats.paths, 0);
        assert_eq!(stats.unbound, 2);
    }
}
