//! The shader uniform contract.
//!
//! Everything the scene communicates to the GPU goes through named uniforms.
//! [`ShaderUniforms`] is the seam between the state bridge and whatever
//! actually owns the shader program: the wgpu backend in [`crate::uniforms`]
//! stages the values into uniform blocks, tests record them.

use cgmath::{Matrix4, Vector2, Vector3, Vector4};

pub const MODEL: &str = "model";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const UV_SCALE: &str = "UVscale";
pub const MATERIAL_DIFFUSE: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR: &str = "material.specularColor";
pub const MATERIAL_SHININESS: &str = "material.shininess";

/// Sampler value written when a texture tag could not be resolved.
pub const NO_TEXTURE_SLOT: i32 = -1;

/// Write access to the uniforms of the active shader program.
///
/// Values persist until overwritten; the last write before a draw wins.
pub trait ShaderUniforms {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>);
    fn set_vec4(&mut self, name: &str, value: Vector4<f32>);
    fn set_vec3(&mut self, name: &str, value: Vector3<f32>);
    fn set_vec2(&mut self, name: &str, value: Vector2<f32>);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_int(&mut self, name: &str, value: i32);
    fn set_bool(&mut self, name: &str, value: bool);
    /// Selects the texture unit a sampler reads from.
    fn set_sampler(&mut self, name: &str, unit: i32);
}

/// Which light block a `directionalLight.*` or `pointLights[n].*` name targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightBlock {
    Directional,
    Point(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightField {
    Direction,
    Position,
    Ambient,
    Diffuse,
    Specular,
    Active,
}

/// A uniform name from the contract, parsed into the field it addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformSlot {
    Model,
    ObjectColor,
    ObjectTexture,
    UseTexture,
    UseLighting,
    UvScale,
    MaterialDiffuse,
    MaterialSpecular,
    MaterialShininess,
    Light(LightBlock, LightField),
}

impl UniformSlot {
    /// Parse a uniform name. Returns `None` for names outside the contract.
    pub fn resolve(name: &str) -> Option<Self> {
        let slot = match name {
            MODEL => Self::Model,
            OBJECT_COLOR => Self::ObjectColor,
            OBJECT_TEXTURE => Self::ObjectTexture,
            USE_TEXTURE => Self::UseTexture,
            USE_LIGHTING => Self::UseLighting,
            UV_SCALE => Self::UvScale,
            MATERIAL_DIFFUSE => Self::MaterialDiffuse,
            MATERIAL_SPECULAR => Self::MaterialSpecular,
            MATERIAL_SHININESS => Self::MaterialShininess,
            _ => return Self::resolve_light(name),
        };
        Some(slot)
    }

    fn resolve_light(name: &str) -> Option<Self> {
        let (block, field) = name.split_once('.')?;
        let block = if block == "directionalLight" {
            LightBlock::Directional
        } else {
            let index = block.strip_prefix("pointLights[")?.strip_suffix(']')?;
            LightBlock::Point(index.parse().ok()?)
        };
        let field = match (block, field) {
            (LightBlock::Directional, "direction") => LightField::Direction,
            (LightBlock::Point(_), "position") => LightField::Position,
            (_, "ambient") => LightField::Ambient,
            (_, "diffuse") => LightField::Diffuse,
            (_, "specular") => LightField::Specular,
            (_, "bActive") => LightField::Active,
            _ => return None,
        };
        Some(Self::Light(block, field))
    }
}

/// Name of a field on the first point light, e.g. `pointLights[0].position`.
pub fn point_light(index: usize, field: &str) -> String {
    format!("pointLights[{index}].{field}")
}

/// Name of a field on the directional light, e.g. `directionalLight.ambient`.
pub fn directional_light(field: &str) -> String {
    format!("directionalLight.{field}")
}
