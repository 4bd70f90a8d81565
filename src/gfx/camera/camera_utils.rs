use cgmath::Matrix4;
use log::debug;

use super::{
    camera::Camera,
    camera_controller::{CameraController, CameraMode},
};
use crate::config::{EngineConfig, LineSettings};

/// How triangles are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Point,
    Line,
    Fill,
}

impl PolygonMode {
    pub fn next(self) -> Self {
        match self {
            PolygonMode::Point => PolygonMode::Line,
            PolygonMode::Line => PolygonMode::Fill,
            PolygonMode::Fill => PolygonMode::Point,
        }
    }
}

/// Display toggles driven by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub show_axis: bool,
    pub show_lookat_indicator: bool,
    pub polygon_mode: PolygonMode,
    pub line_width: f32,
}

pub struct CameraManager {
    pub camera: Camera,
    pub controller: CameraController,
    pub view: ViewOptions,
    lines: LineSettings,
}

impl CameraManager {
    pub fn new(camera: Camera, controller: CameraController, config: &EngineConfig) -> Self {
        Self {
            camera,
            controller,
            view: ViewOptions {
                show_axis: config.enable_axis,
                show_lookat_indicator: config.enable_lookat_indicator,
                polygon_mode: PolygonMode::Line,
                line_width: config.lines.default_width,
            },
            lines: config.lines,
        }
    }

    /// Builds a manager around `camera` using the modes, steps and bindings of `config`.
    pub fn from_config(camera: Camera, config: &EngineConfig) -> Self {
        let controller = CameraController::new(config.default_camera_mode, config.camera, config.keybindings);
        Self::new(camera, controller, config)
    }

    /// Records a key press and applies one-shot actions bound to it.
    pub fn key_down(&mut self, key: char) {
        let key = key.to_ascii_lowercase();
        self.controller.keyboard.press(key);
        let b = self.controller.bindings;

        if key == b.toggle_axis {
            self.view.show_axis = !self.view.show_axis;
        } else if key == b.toggle_lookat_indicator {
            self.view.show_lookat_indicator = !self.view.show_lookat_indicator;
        } else if key == b.next_polygon_mode {
            self.view.polygon_mode = self.view.polygon_mode.next();
        } else if key == b.thinner_lines {
            self.view.line_width = (self.view.line_width - self.lines.step).max(self.lines.min_width);
        } else if key == b.thicker_lines {
            self.view.line_width = (self.view.line_width + self.lines.step).min(self.lines.max_width);
        } else if key == b.toggle_camera_mode {
            let mode = self.controller.mode.toggled();
            self.controller.set_mode(mode);
        } else if key == b.exit_follow_mode {
            self.controller.set_mode(CameraMode::Free);
        } else {
            return;
        }
        debug!("Key {:?} changed view to {:?}", key, self.view);
    }

    pub fn key_up(&mut self, key: char) {
        self.controller.keyboard.release(key);
    }

    /// Advances the camera by one render tick.
    pub fn update(&mut self) {
        self.controller.update(&mut self.camera);
    }

    /// Get the view projection matrix from the camera
    pub fn get_view_proj_matrix(&self, aspect: f32) -> Matrix4<f32> {
        self.camera.build_view_projection_matrix(aspect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> CameraManager {
        let config = EngineConfig::default();
        CameraManager::from_config(config.default_camera, &config)
    }

    #[test]
    fn test_toggles() {
        let mut m = manager();
        let axis = m.view.show_axis;
        m.key_down('x');
        assert_eq!(m.view.show_axis, !axis);

        m.key_down('m');
        assert_eq!(m.view.polygon_mode, PolygonMode::Fill);
        m.key_down('m');
        assert_eq!(m.view.polygon_mode, PolygonMode::Point);
    }

    #[test]
    fn test_line_width_is_clamped() {
        let mut m = manager();
        for _ in 0..100 {
            m.key_down('+');
        }
        assert_eq!(m.view.line_width, m.lines.max_width);
        for _ in 0..100 {
            m.key_down('-');
        }
        assert_eq!(m.view.line_width, m.lines.min_width);
    }

    #[test]
    fn test_mode_keys() {
        let mut m = manager();
        assert_eq!(m.controller.mode, CameraMode::Follow);
        m.key_down('\t');
        assert_eq!(m.controller.mode, CameraMode::Free);
        m.key_down('\t');
        m.key_down('\u{1b}');
        assert_eq!(m.controller.mode, CameraMode::Free);
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let mut m = manager();
        let axis = m.view.show_axis;
        m.key_down('X');
        assert_eq!(m.view.show_axis, !axis);
        m.key_up('X');
        assert!(!m.controller.keyboard.pressed('x'));

        m.key_down('M');
        assert_eq!(m.view.polygon_mode, PolygonMode::Fill);
    }
}
