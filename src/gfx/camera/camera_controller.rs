use std::collections::HashSet;

use log::debug;

use super::camera::Camera;
use crate::config::{CameraSettings, Keybindings};
use crate::math::{cartesian_to_spherical, spherical_to_cartesian};

/// How keyboard input moves the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// WASD slides the eye and the look-at point together.
    Free,
    /// WASD orbits the eye around the look-at point, E/Q zoom.
    Follow,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Free => CameraMode::Follow,
            CameraMode::Follow => CameraMode::Free,
        }
    }
}

/// Set of currently held keys. Letters are stored lowercase.
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    keys: HashSet<char>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: char) {
        self.keys.insert(key.to_ascii_lowercase());
    }

    pub fn release(&mut self, key: char) {
        self.keys.remove(&key.to_ascii_lowercase());
    }

    pub fn pressed(&self, key: char) -> bool {
        self.keys.contains(&key.to_ascii_lowercase())
    }

    /// `1.0` if `key` is held, `0.0` otherwise.
    fn axis(&self, key: char) -> f32 {
        if self.pressed(key) {
            1.0
        } else {
            0.0
        }
    }

    /// Whether exactly `a` of the pair `a`/`b` is held.
    fn only(&self, a: char, b: char) -> bool {
        self.pressed(a) && !self.pressed(b)
    }
}

pub struct CameraController {
    pub mode: CameraMode,
    pub settings: CameraSettings,
    pub bindings: Keybindings,
    pub keyboard: KeyboardState,
}

impl CameraController {
    pub fn new(mode: CameraMode, settings: CameraSettings, bindings: Keybindings) -> Self {
        Self {
            mode,
            settings,
            bindings,
            keyboard: KeyboardState::new(),
        }
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        if self.mode != mode {
            debug!("Camera mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Applies one tick of held keys to `camera`.
    pub fn update(&self, camera: &mut Camera) {
        match self.mode {
            CameraMode::Free => self.update_free(camera),
            CameraMode::Follow => self.update_follow(camera),
        }
    }

    fn update_free(&self, camera: &mut Camera) {
        let keys = &self.keyboard;
        let b = &self.bindings;

        let direction = camera.direction();
        let right = camera.right();
        let translation = direction * keys.axis(b.move_forward) - direction * keys.axis(b.move_backward)
            + right * keys.axis(b.move_right)
            - right * keys.axis(b.move_left);

        camera.translate(translation);
    }

    fn update_follow(&self, camera: &mut Camera) {
        let keys = &self.keyboard;
        let b = &self.bindings;
        let s = &self.settings;

        // (radius, polar, azimuth) of the eye around the look-at point
        let mut rel = cartesian_to_spherical(camera.pos - camera.lookat);

        if keys.only(b.rotate_left, b.rotate_right) {
            rel.z -= s.rotate_step;
        } else if keys.only(b.rotate_right, b.rotate_left) {
            rel.z += s.rotate_step;
        }

        if keys.only(b.rotate_up, b.rotate_down) {
            rel.y = (rel.y - s.rotate_step).max(s.polar_min);
        } else if keys.only(b.rotate_down, b.rotate_up) {
            rel.y = (rel.y + s.rotate_step).min(s.polar_max);
        }

        if keys.only(b.zoom_in, b.zoom_out) {
            rel.x = (rel.x - s.zoom_step).max(s.radius_min);
        } else if keys.only(b.zoom_out, b.zoom_in) {
            rel.x = (rel.x + s.zoom_step).min(s.radius_max);
        }

        camera.pos = spherical_to_cartesian(rel) + camera.lookat;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::Projection;
    use cgmath::{InnerSpace, Vector3, Zero};

    fn camera() -> Camera {
        Camera::new(
            Vector3::new(10.0, 10.0, 10.0),
            Vector3::zero(),
            Vector3::unit_y(),
            Projection {
                fov: 90.0,
                near: 0.5,
                far: 1000.0,
            },
        )
    }

    fn controller(mode: CameraMode) -> CameraController {
        CameraController::new(mode, CameraSettings::default(), Keybindings::default())
    }

    #[test]
    fn test_keyboard_lowercases() {
        let mut keys = KeyboardState::new();
        keys.press('W');
        assert!(keys.pressed('w'));
        assert!(keys.pressed('W'));
        keys.release('W');
        assert!(!keys.pressed('w'));
        assert!(!keys.pressed('W'));
    }

    #[test]
    fn test_free_mode_moves_along_view() {
        let mut c = camera();
        let mut ctl = controller(CameraMode::Free);
        ctl.keyboard.press('w');
        let dir = c.direction();
        ctl.update(&mut c);
        assert!((c.pos - (Vector3::new(10.0, 10.0, 10.0) + dir)).magnitude() < 1e-5);
        assert!((c.lookat - dir).magnitude() < 1e-5);
    }

    #[test]
    fn test_free_mode_opposite_keys_cancel() {
        let mut c = camera();
        let mut ctl = controller(CameraMode::Free);
        ctl.keyboard.press('a');
        ctl.keyboard.press('d');
        ctl.update(&mut c);
        assert!((c.pos - Vector3::new(10.0, 10.0, 10.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_follow_mode_orbit_keeps_distance() {
        let mut c = camera();
        let mut ctl = controller(CameraMode::Follow);
        let before = c.pos.magnitude();
        ctl.keyboard.press('a');
        for _ in 0..100 {
            ctl.update(&mut c);
        }
        assert!((c.pos.magnitude() - before).abs() < 1e-3);
        assert_eq!(c.lookat, Vector3::zero());
    }

    #[test]
    fn test_follow_mode_zoom_clamps() {
        let mut c = camera();
        let mut ctl = controller(CameraMode::Follow);
        ctl.keyboard.press('e');
        for _ in 0..100 {
            ctl.update(&mut c);
        }
        let radius = c.pos.magnitude();
        assert!(radius >= ctl.settings.radius_min * 0.99);
        assert!(radius < 0.01);
    }

    #[test]
    fn test_follow_mode_polar_clamps() {
        let mut c = camera();
        let mut ctl = controller(CameraMode::Follow);
        ctl.keyboard.press('w');
        for _ in 0..1000 {
            ctl.update(&mut c);
        }
        let polar = cartesian_to_spherical(c.pos).y;
        assert!(polar >= ctl.settings.polar_min - 1e-4);
        assert!(c.pos.y > 0.0);
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(CameraMode::Free.toggled(), CameraMode::Follow);
        assert_eq!(CameraMode::Follow.toggled(), CameraMode::Free);
    }
}
