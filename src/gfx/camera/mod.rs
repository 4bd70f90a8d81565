pub mod camera;
pub mod camera_controller;
pub mod camera_utils;

// Re-export main types
pub use camera::{Camera, Projection};
pub use camera_controller::{CameraController, CameraMode, KeyboardState};
pub use camera_utils::{CameraManager, PolygonMode, ViewOptions};
