//! Static scene lighting.
//!
//! The cabin is lit by one directional light standing in for the sun and one
//! point light standing in for the interior dome lamp. Both are written to the
//! shader once during preparation and never change afterwards.

use cgmath::Vector3;

use crate::shader::{self, ShaderUniforms};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub active: bool,
}

/// The complete light setup of a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Lighting {
    pub enabled: bool,
    pub directional: DirectionalLight,
    pub points: Vec<PointLight>,
}

impl Lighting {
    /// Daylight through the windscreen plus the cabin's overhead lamp.
    pub fn cabin() -> Self {
        Self {
            enabled: true,
            directional: DirectionalLight {
                direction: Vector3::new(0.2, -0.2, -0.5),
                ambient: Vector3::new(0.1, 0.0, 0.1),
                diffuse: Vector3::new(0.8, 0.8, 0.8),
                specular: Vector3::new(0.2, 0.2, 0.2),
                active: true,
            },
            points: vec![PointLight {
                position: Vector3::new(0.0, 2.5, -2.0),
                ambient: Vector3::new(0.05, 0.05, 0.05),
                diffuse: Vector3::new(1.0, 1.0, 1.0),
                specular: Vector3::new(0.2, 0.2, 0.2),
                active: true,
            }],
        }
    }

    /// Write every light into the shader's light uniforms.
    pub fn apply<U: ShaderUniforms + ?Sized>(&self, uniforms: &mut U) {
        uniforms.set_bool(shader::USE_LIGHTING, self.enabled);

        let sun = &self.directional;
        uniforms.set_vec3(&shader::directional_light("direction"), sun.direction);
        uniforms.set_vec3(&shader::directional_light("ambient"), sun.ambient);
        uniforms.set_vec3(&shader::directional_light("diffuse"), sun.diffuse);
        uniforms.set_vec3(&shader::directional_light("specular"), sun.specular);
        uniforms.set_bool(&shader::directional_light("bActive"), sun.active);

        for (index, light) in self.points.iter().enumerate() {
            uniforms.set_vec3(&shader::point_light(index, "position"), light.position);
            uniforms.set_vec3(&shader::point_light(index, "ambient"), light.ambient);
            uniforms.set_vec3(&shader::point_light(index, "diffuse"), light.diffuse);
            uniforms.set_vec3(&shader::point_light(index, "specular"), light.specular);
            uniforms.set_bool(&shader::point_light(index, "bActive"), light.active);
        }
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::cabin()
    }
}
