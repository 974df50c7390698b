//! Per-draw model transforms.
//!
//! A [`Transform`] is never stored by the renderer; it is built for one draw,
//! turned into a model matrix and written to the shader.

use cgmath::{Deg, Matrix4, Vector3};

/// Scale, Euler rotation in degrees and translation of one draw call.
///
/// Rotations are applied X first, then Y, then Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub rotation_z: f32,
    pub position: Vector3<f32>,
}

impl Transform {
    /// Identity transform: unit scale, no rotation, at the origin.
    pub fn new() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation_x: 0.0,
            rotation_y: 0.0,
            rotation_z: 0.0,
            position: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    /// `translate · rotZ · rotY · rotX · scale`
    pub fn to_matrix(&self) -> Matrix4<f32> {
        model_matrix(
            self.scale,
            self.rotation_x,
            self.rotation_y,
            self.rotation_z,
            self.position,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Transform> for Matrix4<f32> {
    fn from(transform: Transform) -> Self {
        transform.to_matrix()
    }
}

pub fn model_matrix(
    scale: Vector3<f32>,
    rotation_x: f32,
    rotation_y: f32,
    rotation_z: f32,
    position: Vector3<f32>,
) -> Matrix4<f32> {
    Matrix4::from_translation(position)
        * Matrix4::from_angle_z(Deg(rotation_z))
        * Matrix4::from_angle_y(Deg(rotation_y))
        * Matrix4::from_angle_x(Deg(rotation_x))
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
}
