use cgmath::Vector3;

/// Phong-style surface properties referenced by tag from the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub tag: String,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    pub fn new(
        tag: impl Into<String>,
        diffuse_color: Vector3<f32>,
        specular_color: Vector3<f32>,
        shininess: f32,
    ) -> Self {
        Self {
            tag: tag.into(),
            diffuse_color,
            specular_color,
            shininess,
        }
    }
}
