// src/lib.rs
//! Orrery 3D Scene Engine
//!
//! Procedural primitive generation, hierarchical scene graphs with static and
//! time-driven transforms, and closed Catmull-Rom animation paths.

pub mod animation;
pub mod config;
pub mod gfx;
pub mod math;
pub mod parse;
pub mod performance;
pub mod prelude;

use std::sync::Arc;

use cgmath::{Point3, Vector3};

use crate::animation::CatmullRom;
use crate::config::EngineConfig;
use crate::gfx::geometry::{generate_plane, generate_sphere};
use crate::gfx::scene::{DynamicTranslate, Group, Model, Transform, World};

/// Creates the world shown when no scene file is given: a ground plane and a
/// spinning sphere orbited by a smaller one.
pub fn default_world() -> anyhow::Result<World> {
    let config = EngineConfig::default();
    let sphere = Arc::new(generate_sphere(1.0, 24, 12)?);
    let ground = Arc::new(generate_plane(20.0, 4)?);

    let orbit = CatmullRom::new(vec![
        Point3::new(4.0, 0.0, 0.0),
        Point3::new(0.0, 0.0, -4.0),
        Point3::new(-4.0, 0.0, 0.0),
        Point3::new(0.0, 0.0, 4.0),
    ])?;

    let moon = Group::new()
        .with_transform(Transform::DynamicTranslate(DynamicTranslate::new(8, true, orbit)))
        .with_transform(Transform::Scale(Vector3::new(0.3, 0.3, 0.3)))
        .with_model(Model::new("moon", Arc::clone(&sphere)));

    let planet = Group::new()
        .with_transform(Transform::StaticTranslate(Vector3::new(0.0, 2.0, 0.0)))
        .with_child(moon)
        .with_child(
            Group::new()
                .with_transform(Transform::rotate_time(10.0, Vector3::unit_y()))
                .with_model(Model::new("planet", sphere)),
        );

    let root = Group::new()
        .with_model(Model::new("ground", ground))
        .with_child(planet);

    Ok(World::new(config.default_camera, root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::FrameTime;

    #[test]
    fn test_default_world() {
        let world = default_world().unwrap();
        let stats = world.statistics();
        assert_eq!(stats.model_count, 3);
        assert_eq!(stats.animated_transform_count, 2);
        assert_eq!(world.collect_draws(FrameTime::from_millis(500)).len(), 3);
    }
}
