//! # Orrery Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use orrery::prelude::*;
//!
//! let world = orrery::default_world().unwrap();
//! let mut draws = 0;
//! world.traverse(FrameTime::from_millis(250), &mut |_: &Matrix4<f32>, _: &Model| draws += 1);
//! assert_eq!(draws, 3);
//! ```

pub use crate::default_world;

// Animation and time
pub use crate::animation::{CatmullRom, Clock, FrameTime, ManualClock, SystemClock};

// Configuration
pub use crate::config::{EngineConfig, ParseOptions};

// Geometry
pub use crate::gfx::geometry::{
    generate_bezier_patch, generate_box, generate_cone, generate_plane, generate_sphere, GeneratorError, Mesh,
    Primitive,
};

// Scene graph
pub use crate::gfx::camera::{Camera, CameraManager, Projection};
pub use crate::gfx::scene::{
    BufferAllocator, DrawItem, Group, Model, SceneVisitor, StagingBuffers, Transform, Vertex3D, World,
};

// Scene files
pub use crate::parse::{parse_world, ParseError};

// Performance monitoring
pub use crate::performance::{PerformanceMetrics, PerformanceMonitor};

// Common external types
pub use cgmath::{InnerSpace, Matrix4, Point3, Vector3};
