//! # Graphics Module
//!
//! Everything between a scene description and a renderer.
//!
//! - **Camera** ([`camera`]) - Look-at camera with free and follow controls
//! - **Geometry** ([`geometry`]) - Procedural primitives and the `.3d` mesh format
//! - **Scene** ([`scene`]) - Group hierarchy, transforms, traversal and buffer staging

pub mod camera;
pub mod geometry;
pub mod scene;

pub use camera::CameraManager;
pub use scene::World;
