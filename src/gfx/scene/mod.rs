//! # Scene Graph Module
//!
//! Hierarchical groups of transforms and models, their per-frame evaluation,
//! and the vertex data handed to a renderer.
//!
//! ## Key Components
//!
//! - [`World`] - Camera plus the root [`Group`]
//! - [`Group`] - A node holding transforms, models and child groups
//! - [`Transform`] - Static or time-driven translate, rotate and scale
//! - [`traverse`] - Depth-first walk yielding each model with its composed transform
//! - [`Vertex3D`] - Interleaved vertex layout for buffer upload
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use cgmath::Vector3;
//! use orrery::animation::FrameTime;
//! use orrery::config::EngineConfig;
//! use orrery::gfx::geometry::generate_box;
//! use orrery::gfx::scene::{Group, Model, Transform, World};
//!
//! let cube = Arc::new(generate_box(1.0, 1).unwrap());
//! let root = Group::new()
//!     .with_transform(Transform::StaticTranslate(Vector3::new(0.0, 1.0, 0.0)))
//!     .with_model(Model::new("cube", cube));
//! let world = World::new(EngineConfig::default().default_camera, root);
//!
//! for draw in world.collect_draws(FrameTime::ZERO) {
//!     println!("{} at {:?}", draw.model.name, draw.transform.w);
//! }
//! ```

pub mod buffers;
pub mod group;
pub mod transform;
pub mod traversal;
pub mod vertex;

// Re-export main types
pub use buffers::{BufferAllocator, BufferError, BufferHandle, StagingBuffers, UploadSummary};
pub use group::{Group, Model, World, WorldStatistics};
pub use transform::{DynamicTranslate, RotateKind, Transform};
pub use traversal::{traverse, DrawItem, DrawStats, SceneVisitor};
pub use vertex::Vertex3D;
