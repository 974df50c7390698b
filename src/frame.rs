//! Recording one frame of draw commands.
//!
//! wgpu cannot change uniforms in the middle of a render pass the way a
//! stateful GL program can, so the scene is first played into a
//! [`FrameRecorder`]: each `draw_mesh` snapshots the current
//! [`ObjectUniform`] and remembers which primitive to draw with it. The
//! recorded frame is then uploaded and replayed by
//! [`crate::pipelines::scene::ScenePipeline`].

use crate::{
    data_structures::mesh::{MeshKind, MeshProvider},
    resources::mesh::GpuMeshes,
    shader::ShaderUniforms,
    uniforms::{ObjectUniform, UniformState},
};

/// A primitive and the index of the object uniform snapshot it draws with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawCall {
    pub mesh: MeshKind,
    pub object: u32,
}

pub struct FrameRecorder {
    device: wgpu::Device,
    uniforms: UniformState,
    meshes: GpuMeshes,
    objects: Vec<ObjectUniform>,
    draws: Vec<DrawCall>,
}

impl FrameRecorder {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            device: device.clone(),
            uniforms: UniformState::new(),
            meshes: GpuMeshes::new(),
            objects: Vec::new(),
            draws: Vec::new(),
        }
    }

    /// Forget the previous frame's draws. Uniform values are kept.
    pub fn begin_frame(&mut self) {
        self.objects.clear();
        self.draws.clear();
    }

    pub fn uniforms(&self) -> &UniformState {
        &self.uniforms
    }

    pub fn uniforms_mut(&mut self) -> &mut UniformState {
        &mut self.uniforms
    }

    pub fn meshes(&self) -> &GpuMeshes {
        &self.meshes
    }

    pub fn objects(&self) -> &[ObjectUniform] {
        &self.objects
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }
}

impl ShaderUniforms for FrameRecorder {
    fn set_mat4(&mut self, name: &str, value: cgmath::Matrix4<f32>) {
        self.uniforms.set_mat4(name, value);
    }

    fn set_vec4(&mut self, name: &str, value: cgmath::Vector4<f32>) {
        self.uniforms.set_vec4(name, value);
    }

    fn set_vec3(&mut self, name: &str, value: cgmath::Vector3<f32>) {
        self.uniforms.set_vec3(name, value);
    }

    fn set_vec2(&mut self, name: &str, value: cgmath::Vector2<f32>) {
        self.uniforms.set_vec2(name, value);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.uniforms.set_float(name, value);
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.uniforms.set_int(name, value);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.uniforms.set_bool(name, value);
    }

    fn set_sampler(&mut self, name: &str, unit: i32) {
        self.uniforms.set_sampler(name, unit);
    }
}

impl MeshProvider for FrameRecorder {
    fn load_mesh(&mut self, kind: MeshKind) {
        if !self.meshes.load(&self.device, kind) {
            log::debug!("{kind:?} mesh is already loaded");
        }
    }

    fn draw_mesh(&mut self, kind: MeshKind) {
        if self.meshes.get(kind).is_none() {
            log::warn!("Skipping draw of {kind:?}: mesh was never loaded");
            return;
        }
        let object = self.objects.len() as u32;
        self.objects.push(self.uniforms.object);
        self.draws.push(DrawCall { mesh: kind, object });
    }
}
