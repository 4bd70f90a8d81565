use cgmath::*;

/// Perspective projection parameters. `fov` is the vertical field of view in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn matrix(&self, aspect: f32) -> Matrix4<f32> {
        perspective(Deg(self.fov), aspect, self.near, self.far)
    }
}

/// Look-at camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pos: Vector3<f32>,
    pub lookat: Vector3<f32>,
    pub up: Vector3<f32>,
    pub projection: Projection,
}

impl Camera {
    pub fn new(pos: Vector3<f32>, lookat: Vector3<f32>, up: Vector3<f32>, projection: Projection) -> Self {
        Self {
            pos,
            lookat,
            up,
            projection,
        }
    }

    /// Unit vector from the eye towards the look-at point.
    pub fn direction(&self) -> Vector3<f32> {
        (self.lookat - self.pos).normalize()
    }

    /// Unit vector pointing to the right of the view direction.
    pub fn right(&self) -> Vector3<f32> {
        self.direction().cross(self.up).normalize()
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(Point3::from_vec(self.pos), Point3::from_vec(self.lookat), self.up)
    }

    pub fn build_view_projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        self.projection.matrix(aspect) * self.view_matrix()
    }

    /// Moves both the eye and the look-at point.
    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.pos += offset;
        self.lookat += offset;
    }
}
