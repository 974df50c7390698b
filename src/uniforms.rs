//! CPU staging of the shader uniform contract.
//!
//! [`UniformState`] implements [`ShaderUniforms`] by routing each named write
//! into one of two `bytemuck::Pod` blocks that mirror the WGSL structs in
//! `pipelines/scene_shader.wgsl`:
//!
//! - [`ObjectUniform`] changes between draws (transform, surface, material)
//! - [`SceneUniform`] is written once per frame (camera and lights)

use cgmath::{Matrix, Matrix4, SquareMatrix, Vector2, Vector3, Vector4};

use crate::shader::{LightBlock, LightField, NO_TEXTURE_SLOT, ShaderUniforms, UniformSlot};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub diffuse_color: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    pub use_texture: u32,
    pub uv_scale: [f32; 2],
    pub texture_slot: i32,
    // Uniform blocks are laid out in 16 byte rows
    pub _padding: u32,
}

impl Default for ObjectUniform {
    fn default() -> Self {
        let identity: [[f32; 4]; 4] = Matrix4::identity().into();
        Self {
            model: identity,
            normal: identity,
            object_color: [1.0; 4],
            diffuse_color: [1.0; 3],
            shininess: 1.0,
            specular_color: [0.0; 3],
            use_texture: 0,
            uv_scale: [1.0, 1.0],
            texture_slot: NO_TEXTURE_SLOT,
            _padding: 0,
        }
    }
}

/// One light as seen by the shader. `vector` is the direction of a
/// directional light or the position of a point light.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightRaw {
    pub vector: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    pub _padding0: f32,
    pub diffuse: [f32; 3],
    pub _padding1: f32,
    pub specular: [f32; 3],
    pub _padding2: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_position: [f32; 3],
    pub use_lighting: u32,
    pub directional: LightRaw,
    pub point: LightRaw,
}

impl Default for SceneUniform {
    fn default() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
            view_position: [0.0; 3],
            use_lighting: 0,
            directional: LightRaw::default(),
            point: LightRaw::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum UniformValue {
    Mat4(Matrix4<f32>),
    Vec4(Vector4<f32>),
    Vec3(Vector3<f32>),
    Vec2(Vector2<f32>),
    Float(f32),
    Int(i32),
    Bool(bool),
}

/// Current values of every uniform in the contract.
#[derive(Debug, Clone, Default)]
pub struct UniformState {
    pub object: ObjectUniform,
    pub scene: SceneUniform,
}

impl UniformState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_camera(&mut self, view_proj: Matrix4<f32>, eye: cgmath::Point3<f32>) {
        self.scene.view_proj = view_proj.into();
        self.scene.view_position = eye.into();
    }

    fn write(&mut self, name: &str, value: UniformValue) {
        let Some(slot) = UniformSlot::resolve(name) else {
            log::warn!("Ignoring write to unknown uniform '{name}'");
            return;
        };
        let object = &mut self.object;
        match (slot, value) {
            (UniformSlot::Model, UniformValue::Mat4(model)) => {
                object.model = model.into();
                object.normal = normal_matrix(model).into();
            }
            (UniformSlot::ObjectColor, UniformValue::Vec4(color)) => {
                object.object_color = color.into()
            }
            (UniformSlot::ObjectTexture, UniformValue::Int(unit)) => object.texture_slot = unit,
            (UniformSlot::UseTexture, UniformValue::Bool(flag)) => {
                object.use_texture = flag as u32
            }
            (UniformSlot::UseTexture, UniformValue::Int(flag)) => {
                object.use_texture = (flag != 0) as u32
            }
            (UniformSlot::UseLighting, UniformValue::Bool(flag)) => {
                self.scene.use_lighting = flag as u32
            }
            (UniformSlot::UseLighting, UniformValue::Int(flag)) => {
                self.scene.use_lighting = (flag != 0) as u32
            }
            (UniformSlot::UvScale, UniformValue::Vec2(scale)) => object.uv_scale = scale.into(),
            (UniformSlot::MaterialDiffuse, UniformValue::Vec3(color)) => {
                object.diffuse_color = color.into()
            }
            (UniformSlot::MaterialSpecular, UniformValue::Vec3(color)) => {
                object.specular_color = color.into()
            }
            (UniformSlot::MaterialShininess, UniformValue::Float(shininess)) => {
                object.shininess = shininess
            }
            (UniformSlot::Light(block, field), value) => self.write_light(name, block, field, value),
            (_, value) => log::warn!("Uniform '{name}' cannot hold {value:?}"),
        }
    }

    fn write_light(&mut self, name: &str, block: LightBlock, field: LightField, value: UniformValue) {
        let light = match block {
            LightBlock::Directional => &mut self.scene.directional,
            LightBlock::Point(0) => &mut self.scene.point,
            LightBlock::Point(index) => {
                log::warn!("Only one point light is supported, ignoring point light {index}");
                return;
            }
        };
        match (field, value) {
            (LightField::Direction | LightField::Position, UniformValue::Vec3(v)) => {
                light.vector = v.into()
            }
            (LightField::Ambient, UniformValue::Vec3(v)) => light.ambient = v.into(),
            (LightField::Diffuse, UniformValue::Vec3(v)) => light.diffuse = v.into(),
            (LightField::Specular, UniformValue::Vec3(v)) => light.specular = v.into(),
            (LightField::Active, UniformValue::Bool(flag)) => light.active = flag as u32,
            (LightField::Active, UniformValue::Int(flag)) => light.active = (flag != 0) as u32,
            (_, value) => log::warn!("Uniform '{name}' cannot hold {value:?}"),
        }
    }
}

impl ShaderUniforms for UniformState {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.write(name, UniformValue::Mat4(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.write(name, UniformValue::Vec4(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.write(name, UniformValue::Vec3(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.write(name, UniformValue::Vec2(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.write(name, UniformValue::Float(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.write(name, UniformValue::Int(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.write(name, UniformValue::Bool(value));
    }

    fn set_sampler(&mut self, name: &str, unit: i32) {
        self.write(name, UniformValue::Int(unit));
    }
}

/// Inverse transpose of the model matrix, for transforming normals under
/// non-uniform scale. Degenerate (zero-scale) models fall back to identity.
pub fn normal_matrix(model: Matrix4<f32>) -> Matrix4<f32> {
    model
        .invert()
        .map(|inverse| inverse.transpose())
        .unwrap_or_else(Matrix4::identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader;

    #[test]
    fn uniform_blocks_fill_whole_rows() {
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 192);
        assert_eq!(std::mem::size_of::<LightRaw>(), 64);
        assert_eq!(std::mem::size_of::<SceneUniform>(), 208);
    }

    #[test]
    fn routes_object_writes() {
        let mut state = UniformState::new();
        state.set_bool(shader::USE_TEXTURE, true);
        state.set_sampler(shader::OBJECT_TEXTURE, 3);
        state.set_vec2(shader::UV_SCALE, Vector2::new(3.0, 1.0));
        state.set_vec3(shader::MATERIAL_DIFFUSE, Vector3::new(0.3, 0.3, 0.3));
        state.set_float(shader::MATERIAL_SHININESS, 4.0);

        assert_eq!(state.object.use_texture, 1);
        assert_eq!(state.object.texture_slot, 3);
        assert_eq!(state.object.uv_scale, [3.0, 1.0]);
        assert_eq!(state.object.diffuse_color, [0.3, 0.3, 0.3]);
        assert_eq!(state.object.shininess, 4.0);
    }

    #[test]
    fn routes_light_writes() {
        let mut state = UniformState::new();
        state.set_vec3(
            &shader::point_light(0, "position"),
            Vector3::new(0.0, 2.5, -2.0),
        );
        state.set_bool(&shader::point_light(0, "bActive"), true);
        state.set_vec3(
            &shader::directional_light("direction"),
            Vector3::new(0.2, -0.2, -0.5),
        );
        state.set_int(shader::USE_LIGHTING, 1);

        assert_eq!(state.scene.point.vector, [0.0, 2.5, -2.0]);
        assert_eq!(state.scene.point.active, 1);
        assert_eq!(state.scene.directional.vector, [0.2, -0.2, -0.5]);
        assert_eq!(state.scene.use_lighting, 1);
    }

    #[test]
    fn ignores_unknown_names_and_mismatched_types() {
        let mut state = UniformState::new();
        let before = state.object;
        state.set_float("notAUniform", 1.0);
        state.set_float(shader::OBJECT_COLOR, 1.0);
        state.set_vec3(&shader::point_light(1, "position"), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(state.object, before);
        assert_eq!(state.scene.point, LightRaw::default());
    }

    #[test]
    fn model_write_updates_normal_matrix() {
        let mut state = UniformState::new();
        let model = Matrix4::from_nonuniform_scale(2.0, 1.0, 4.0);
        state.set_mat4(shader::MODEL, model);
        let normal: [[f32; 4]; 4] = Matrix4::from_nonuniform_scale(0.5, 1.0, 0.25).into();
        let raw: [[f32; 4]; 4] = model.into();
        assert_eq!(state.object.model, raw);
        assert_eq!(state.object.normal, normal);
    }

    #[test]
    fn degenerate_model_keeps_identity_normals() {
        let flat = Matrix4::from_nonuniform_scale(1.0, 0.0, 1.0);
        assert_eq!(normal_matrix(flat), Matrix4::identity());
    }
}
