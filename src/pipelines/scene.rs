use wgpu::util::DeviceExt;

use crate::{
    context::Context,
    frame::FrameRecorder,
    pipelines::basic::{mk_object_bind_group_layout, mk_scene_bind_group_layout, mk_scene_pipeline},
    uniforms::{ObjectUniform, SceneUniform},
};

const OBJECT_SIZE: u64 = std::mem::size_of::<ObjectUniform>() as u64;

/// GPU resources for replaying a recorded frame.
///
/// Object uniforms of all draws live in one buffer, each at a stride that
/// satisfies the device's dynamic offset alignment.
pub struct ScenePipeline {
    pipeline: wgpu::RenderPipeline,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    object_capacity: u64,
    object_stride: u64,
    staging: Vec<u8>,
}

impl ScenePipeline {
    pub fn new(ctx: &Context, texture_layout: &wgpu::BindGroupLayout) -> Self {
        let device = &ctx.device;
        let scene_layout = mk_scene_bind_group_layout(device);
        let object_layout = mk_object_bind_group_layout(device);
        let pipeline = mk_scene_pipeline(
            device,
            &ctx.config,
            &scene_layout,
            &object_layout,
            texture_layout,
        );

        let scene_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: bytemuck::cast_slice(&[SceneUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
            label: Some("scene_bind_group"),
        });

        let alignment = u64::from(device.limits().min_uniform_buffer_offset_alignment);
        let object_stride = OBJECT_SIZE.div_ceil(alignment) * alignment;
        let object_capacity = 16;
        let (object_buffer, object_bind_group) =
            mk_object_buffer(device, &object_layout, object_capacity * object_stride);

        Self {
            pipeline,
            scene_buffer,
            scene_bind_group,
            object_layout,
            object_buffer,
            object_bind_group,
            object_capacity,
            object_stride,
            staging: Vec::new(),
        }
    }

    /// Upload the scene block and every object snapshot of `frame`.
    pub fn upload(&mut self, ctx: &Context, frame: &FrameRecorder) {
        ctx.queue.write_buffer(
            &self.scene_buffer,
            0,
            bytemuck::bytes_of(&frame.uniforms().scene),
        );

        let objects = frame.objects();
        if objects.is_empty() {
            return;
        }
        let count = objects.len() as u64;
        if count > self.object_capacity {
            self.object_capacity = count.next_power_of_two();
            log::debug!("Growing object uniform buffer to {} draws", self.object_capacity);
            let (buffer, bind_group) = mk_object_buffer(
                &ctx.device,
                &self.object_layout,
                self.object_capacity * self.object_stride,
            );
            self.object_buffer = buffer;
            self.object_bind_group = bind_group;
        }

        let stride = self.object_stride as usize;
        self.staging.clear();
        self.staging.resize(stride * objects.len(), 0);
        for (chunk, object) in self.staging.chunks_exact_mut(stride).zip(objects) {
            chunk[..OBJECT_SIZE as usize].copy_from_slice(bytemuck::bytes_of(object));
        }
        ctx.queue.write_buffer(&self.object_buffer, 0, &self.staging);
    }

    /// Replay the recorded draws into `render_pass`.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        frame: &FrameRecorder,
        textures: &wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.scene_bind_group, &[]);
        render_pass.set_bind_group(2, textures, &[]);

        for call in frame.draws() {
            let Some(mesh) = frame.meshes().get(call.mesh) else {
                continue;
            };
            let offset = (u64::from(call.object) * self.object_stride) as u32;
            render_pass.set_bind_group(1, &self.object_bind_group, &[offset]);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..mesh.num_elements, 0, 0..1);
        }
    }
}

fn mk_object_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    size: u64,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Object Uniform Buffer"),
        size,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(OBJECT_SIZE),
            }),
        }],
        label: Some("object_bind_group"),
    });
    (buffer, bind_group)
}
