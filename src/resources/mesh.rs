use wgpu::util::DeviceExt;

use crate::data_structures::mesh::{Geometry, MeshKind};

/// Vertex and index buffers of one primitive.
#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, kind: MeshKind, geometry: &Geometry) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{kind:?} Vertex Buffer")),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{kind:?} Index Buffer")),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            num_elements: geometry.indices.len() as u32,
        }
    }
}

/// The four primitives, each uploaded at most once.
#[derive(Debug, Default)]
pub struct GpuMeshes {
    meshes: [Option<GpuMesh>; 4],
}

impl GpuMeshes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload `kind` unless it is already resident. Returns whether it uploaded.
    pub fn load(&mut self, device: &wgpu::Device, kind: MeshKind) -> bool {
        let slot = &mut self.meshes[kind.index()];
        if slot.is_some() {
            return false;
        }
        let geometry = kind.geometry();
        log::debug!(
            "Uploading {kind:?} mesh: {} vertices, {} indices",
            geometry.vertices.len(),
            geometry.indices.len()
        );
        *slot = Some(GpuMesh::new(device, kind, &geometry));
        true
    }

    pub fn get(&self, kind: MeshKind) -> Option<&GpuMesh> {
        self.meshes[kind.index()].as_ref()
    }
}
