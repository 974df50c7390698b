use cgmath::{Deg, Matrix4, Point3, Vector3, perspective};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Fixed look-at camera with a perspective projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// From the driver's seat, looking over the steering wheel at the screen.
    pub fn driver_seat() -> Self {
        Self {
            eye: Point3::new(-0.35, 1.35, 1.6),
            target: Point3::new(0.0, 0.8, -1.0),
            up: Vector3::unit_y(),
            fovy: Deg(45.0),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    pub fn view_proj(&self, width: u32, height: u32) -> Matrix4<f32> {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj = perspective(self.fovy, aspect, self.znear, self.zfar);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::driver_seat()
    }
}
