//! Engine configuration: window metadata, camera defaults and step sizes,
//! keybindings, and scene parsing options.

use std::f32::consts::PI;

use cgmath::Vector3;

use crate::gfx::camera::{Camera, CameraMode, Projection};

/// Environment variable holding the `env_logger` filter used by the binaries.
pub const LOG_ENV: &str = "ORRERY_LOG";

/// Filter applied when [`LOG_ENV`] is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// How a missing numeric attribute in a scene file is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AttributePolicy {
    /// A missing attribute is a parse error.
    #[default]
    Strict,
    /// A missing attribute reads as `0`.
    Lenient,
}

/// Options for scene file parsing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub attribute_policy: AttributePolicy,
}

impl ParseOptions {
    pub fn lenient() -> Self {
        Self {
            attribute_policy: AttributePolicy::Lenient,
        }
    }
}

/// Keys bound to camera and view actions.
///
/// Free mode moves with the `move_*` keys, follow mode rotates with the
/// `rotate_*` keys. By default both share WASD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keybindings {
    pub move_forward: char,
    pub move_left: char,
    pub move_backward: char,
    pub move_right: char,

    pub rotate_up: char,
    pub rotate_left: char,
    pub rotate_down: char,
    pub rotate_right: char,

    pub zoom_in: char,
    pub zoom_out: char,

    pub toggle_axis: char,
    pub toggle_lookat_indicator: char,
    pub next_polygon_mode: char,
    pub thinner_lines: char,
    pub thicker_lines: char,
    pub toggle_camera_mode: char,
    pub exit_follow_mode: char,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            move_forward: 'w',
            move_left: 'a',
            move_backward: 's',
            move_right: 'd',

            rotate_up: 'w',
            rotate_left: 'a',
            rotate_down: 's',
            rotate_right: 'd',

            zoom_in: 'e',
            zoom_out: 'q',

            toggle_axis: 'x',
            toggle_lookat_indicator: '.',
            next_polygon_mode: 'm',
            thinner_lines: '-',
            thicker_lines: '+',
            toggle_camera_mode: '\t',
            exit_follow_mode: '\u{1b}',
        }
    }
}

/// Step sizes and bounds of the camera controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    /// Radians per tick in follow mode.
    pub rotate_step: f32,
    /// Polar angle bounds in follow mode, away from the poles.
    pub polar_min: f32,
    pub polar_max: f32,
    /// Distance per tick when zooming.
    pub zoom_step: f32,
    pub radius_min: f32,
    pub radius_max: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            rotate_step: 0.01,
            polar_min: 0.001,
            polar_max: PI - 0.001,
            zoom_step: 1.0,
            radius_min: 0.001,
            radius_max: f32::MAX - 2.0,
        }
    }
}

/// Line width bounds of the wireframe view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSettings {
    pub default_width: f32,
    pub min_width: f32,
    pub max_width: f32,
    pub step: f32,
}

impl Default for LineSettings {
    fn default() -> Self {
        Self {
            default_width: 1.0,
            min_width: 0.5,
            max_width: 10.0,
            step: 0.5,
        }
    }
}

/// Engine configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Milliseconds between camera updates and redraws.
    pub render_tick_ms: u64,
    /// Camera used when no scene file is given.
    pub default_camera: Camera,
    pub default_camera_mode: CameraMode,
    pub camera: CameraSettings,
    pub lines: LineSettings,
    pub keybindings: Keybindings,
    pub enable_axis: bool,
    pub enable_lookat_indicator: bool,
    pub parse: ParseOptions,
}

impl EngineConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_title: "orrery".to_string(),
            window_width: 800,
            window_height: 800,
            render_tick_ms: 16,
            default_camera: Camera::new(
                Vector3::new(10.0, 10.0, 10.0),
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::unit_y(),
                Projection {
                    fov: 90.0,
                    near: 0.5,
                    far: 1000.0,
                },
            ),
            default_camera_mode: CameraMode::Follow,
            camera: CameraSettings::default(),
            lines: LineSettings::default(),
            keybindings: Keybindings::default(),
            enable_axis: true,
            enable_lookat_indicator: false,
            parse: ParseOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.render_tick_ms, 16);
        assert_eq!(config.default_camera_mode, CameraMode::Follow);
        assert_eq!(config.aspect_ratio(), 1.0);
        assert_eq!(config.parse.attribute_policy, AttributePolicy::Strict);
        assert!(config.camera.polar_min < config.camera.polar_max);
    }

    #[test]
    fn test_lenient_options() {
        assert_eq!(ParseOptions::lenient().attribute_policy, AttributePolicy::Lenient);
    }
}
