//! Per-draw shader state.
//!
//! [`RenderContext`] is the bridge between the scene and the shader program:
//! every draw is preceded by calls that overwrite the model matrix, surface
//! (flat colour or texture), UV scale and material. Whatever was written last
//! is what the next [`RenderContext::draw`] uses.
//!
//! The context holds an optional [`RenderTarget`]; without one every call is a
//! silent no-op, which mirrors drawing with no shader program bound.

use cgmath::{Vector2, Vector3, Vector4};

use crate::{
    data_structures::{
        mesh::{MeshKind, MeshProvider},
        transform::model_matrix,
    },
    resources::{
        material::MaterialRegistry,
        texture::{TextureBackend, TextureRegistry},
    },
    shader::{self, NO_TEXTURE_SLOT, ShaderUniforms},
};

/// Something that accepts uniform writes and draws primitive meshes.
pub trait RenderTarget: ShaderUniforms + MeshProvider {}

impl<T: ShaderUniforms + MeshProvider + ?Sized> RenderTarget for T {}

pub struct RenderContext<'a, T: RenderTarget + ?Sized, B: TextureBackend> {
    target: Option<&'a mut T>,
    textures: &'a TextureRegistry<B>,
    materials: &'a MaterialRegistry,
}

impl<'a, T: RenderTarget + ?Sized, B: TextureBackend> RenderContext<'a, T, B> {
    pub fn new(
        target: Option<&'a mut T>,
        textures: &'a TextureRegistry<B>,
        materials: &'a MaterialRegistry,
    ) -> Self {
        Self {
            target,
            textures,
            materials,
        }
    }

    /// Write the model matrix `translate · rotZ · rotY · rotX · scale`.
    pub fn set_transform(
        &mut self,
        scale: Vector3<f32>,
        rotation_x: f32,
        rotation_y: f32,
        rotation_z: f32,
        position: Vector3<f32>,
    ) {
        if let Some(target) = self.target.as_deref_mut() {
            let model = model_matrix(scale, rotation_x, rotation_y, rotation_z, position);
            target.set_mat4(shader::MODEL, model);
        }
    }

    /// Draw the next mesh in a solid colour, without texture sampling.
    pub fn set_flat_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        if let Some(target) = self.target.as_deref_mut() {
            target.set_bool(shader::USE_TEXTURE, false);
            target.set_vec4(shader::OBJECT_COLOR, Vector4::new(r, g, b, a));
        }
    }

    /// Sample the texture registered under `tag` for the next mesh.
    ///
    /// An unknown tag still enables texturing but selects [`NO_TEXTURE_SLOT`].
    pub fn set_texture(&mut self, tag: &str) {
        let Some(target) = self.target.as_deref_mut() else {
            return;
        };
        target.set_bool(shader::USE_TEXTURE, true);
        let unit = match self.textures.find_slot(tag) {
            Some(slot) => slot as i32,
            None => {
                log::warn!("No texture registered under '{tag}'");
                NO_TEXTURE_SLOT
            }
        };
        target.set_sampler(shader::OBJECT_TEXTURE, unit);
    }

    pub fn set_uv_scale(&mut self, u: f32, v: f32) {
        if let Some(target) = self.target.as_deref_mut() {
            target.set_vec2(shader::UV_SCALE, Vector2::new(u, v));
        }
    }

    /// Write the material registered under `tag`.
    ///
    /// Does nothing while no materials are defined, or when `tag` is unknown.
    pub fn set_material(&mut self, tag: &str) {
        if self.materials.is_empty() {
            return;
        }
        let Some(target) = self.target.as_deref_mut() else {
            return;
        };
        match self.materials.find(tag) {
            Some(material) => {
                target.set_vec3(shader::MATERIAL_DIFFUSE, material.diffuse_color);
                target.set_vec3(shader::MATERIAL_SPECULAR, material.specular_color);
                target.set_float(shader::MATERIAL_SHININESS, material.shininess);
            }
            None => log::warn!("No material defined under '{tag}'"),
        }
    }

    /// Draw one primitive with the state written so far.
    pub fn draw(&mut self, kind: MeshKind) {
        if let Some(target) = self.target.as_deref_mut() {
            target.draw_mesh(kind);
        }
    }
}
