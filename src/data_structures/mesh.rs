//! The four primitive meshes the scene is assembled from.
//!
//! Geometry is generated on the CPU in OpenGL texture conventions (v grows
//! upwards), which is why textures are flipped vertically when loaded.

use std::f32::consts::TAU;

/// One of the primitive shapes a [`MeshProvider`] can draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Unit cube centered on the origin.
    Box,
    /// 2×2 square in the XZ plane facing +Y.
    Plane,
    /// Radius 1, standing on the XZ plane from y = 0 to y = 1.
    Cylinder,
    /// Ring of radius 1 around the Z axis.
    Torus,
}

impl MeshKind {
    pub const ALL: [MeshKind; 4] = [
        MeshKind::Box,
        MeshKind::Plane,
        MeshKind::Cylinder,
        MeshKind::Torus,
    ];

    pub fn index(self) -> usize {
        match self {
            MeshKind::Box => 0,
            MeshKind::Plane => 1,
            MeshKind::Cylinder => 2,
            MeshKind::Torus => 3,
        }
    }

    pub fn geometry(self) -> Geometry {
        match self {
            MeshKind::Box => Geometry::cube(),
            MeshKind::Plane => Geometry::plane(),
            MeshKind::Cylinder => Geometry::cylinder(CYLINDER_SEGMENTS),
            MeshKind::Torus => Geometry::torus(TORUS_MAJOR_SEGMENTS, TORUS_MINOR_SEGMENTS),
        }
    }
}

/// Loads primitive meshes and draws them with whatever state is current.
///
/// `load_mesh` is called once per kind during preparation; `draw_mesh` may be
/// called any number of times afterwards.
pub trait MeshProvider {
    fn load_mesh(&mut self, kind: MeshKind);
    fn draw_mesh(&mut self, kind: MeshKind);
}

const CYLINDER_SEGMENTS: u32 = 36;
const TORUS_MAJOR_SEGMENTS: u32 = 48;
const TORUS_MINOR_SEGMENTS: u32 = 16;
const TORUS_MAJOR_RADIUS: f32 = 1.0;
const TORUS_MINOR_RADIUS: f32 = 0.1;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl MeshVertex {
    fn new(position: [f32; 3], tex_coords: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            tex_coords,
            normal,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Indexed triangle list.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    fn push_quad(&mut self, corners: [MeshVertex; 4]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&corners);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn cube() -> Self {
        // (normal, u axis, v axis) per face, with u × v = normal
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ];
        let mut geometry = Geometry::default();
        for (n, u, v) in faces {
            let corner = |su: f32, sv: f32| {
                [
                    0.5 * (n[0] + su * u[0] + sv * v[0]),
                    0.5 * (n[1] + su * u[1] + sv * v[1]),
                    0.5 * (n[2] + su * u[2] + sv * v[2]),
                ]
            };
            geometry.push_quad([
                MeshVertex::new(corner(-1.0, -1.0), [0.0, 0.0], n),
                MeshVertex::new(corner(1.0, -1.0), [1.0, 0.0], n),
                MeshVertex::new(corner(1.0, 1.0), [1.0, 1.0], n),
                MeshVertex::new(corner(-1.0, 1.0), [0.0, 1.0], n),
            ]);
        }
        geometry
    }

    pub fn plane() -> Self {
        let up = [0.0, 1.0, 0.0];
        let mut geometry = Geometry::default();
        geometry.push_quad([
            MeshVertex::new([-1.0, 0.0, 1.0], [0.0, 0.0], up),
            MeshVertex::new([1.0, 0.0, 1.0], [1.0, 0.0], up),
            MeshVertex::new([1.0, 0.0, -1.0], [1.0, 1.0], up),
            MeshVertex::new([-1.0, 0.0, -1.0], [0.0, 1.0], up),
        ]);
        geometry
    }

    pub fn cylinder(segments: u32) -> Self {
        let segments = segments.max(3);
        let mut geometry = Geometry::default();

        // side wall, one seam column duplicated so u wraps cleanly
        for i in 0..=segments {
            let t = i as f32 / segments as f32;
            let (sin, cos) = (t * TAU).sin_cos();
            let normal = [cos, 0.0, sin];
            geometry
                .vertices
                .push(MeshVertex::new([cos, 0.0, sin], [t, 0.0], normal));
            geometry
                .vertices
                .push(MeshVertex::new([cos, 1.0, sin], [t, 1.0], normal));
        }
        for i in 0..segments {
            let bottom = 2 * i;
            let top = bottom + 1;
            let next_bottom = bottom + 2;
            let next_top = bottom + 3;
            geometry
                .indices
                .extend_from_slice(&[bottom, top, next_top, bottom, next_top, next_bottom]);
        }

        for (y, normal_y) in [(0.0, -1.0), (1.0, 1.0)] {
            let center = geometry.vertices.len() as u32;
            let normal = [0.0, normal_y, 0.0];
            geometry
                .vertices
                .push(MeshVertex::new([0.0, y, 0.0], [0.5, 0.5], normal));
            for i in 0..=segments {
                let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
                geometry.vertices.push(MeshVertex::new(
                    [cos, y, sin],
                    [0.5 + 0.5 * cos, 0.5 + 0.5 * sin],
                    normal,
                ));
            }
            for i in 0..segments {
                let a = center + 1 + i;
                let b = a + 1;
                if normal_y > 0.0 {
                    geometry.indices.extend_from_slice(&[center, b, a]);
                } else {
                    geometry.indices.extend_from_slice(&[center, a, b]);
                }
            }
        }
        geometry
    }

    pub fn torus(major_segments: u32, minor_segments: u32) -> Self {
        let major_segments = major_segments.max(3);
        let minor_segments = minor_segments.max(3);
        let mut geometry = Geometry::default();

        for i in 0..=major_segments {
            let s = i as f32 / major_segments as f32;
            let (sin_u, cos_u) = (s * TAU).sin_cos();
            for j in 0..=minor_segments {
                let t = j as f32 / minor_segments as f32;
                let (sin_v, cos_v) = (t * TAU).sin_cos();
                let ring = TORUS_MAJOR_RADIUS + TORUS_MINOR_RADIUS * cos_v;
                geometry.vertices.push(MeshVertex::new(
                    [ring * cos_u, ring * sin_u, TORUS_MINOR_RADIUS * sin_v],
                    [s, t],
                    [cos_v * cos_u, cos_v * sin_u, sin_v],
                ));
            }
        }

        let stride = minor_segments + 1;
        for i in 0..major_segments {
            for j in 0..minor_segments {
                let a = i * stride + j;
                let b = (i + 1) * stride + j;
                geometry
                    .indices
                    .extend_from_slice(&[a, b, b + 1, a, b + 1, a + 1]);
            }
        }
        geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(geometry: &Geometry) {
        assert!(!geometry.vertices.is_empty());
        assert_eq!(geometry.indices.len() % 3, 0);
        let count = geometry.vertices.len() as u32;
        assert!(geometry.indices.iter().all(|&i| i < count));
        for vertex in &geometry.vertices {
            let [x, y, z] = vertex.normal;
            let length = (x * x + y * y + z * z).sqrt();
            assert!((length - 1.0).abs() < 1e-4, "normal {:?}", vertex.normal);
        }
    }

    #[test]
    fn every_primitive_is_well_formed() {
        for kind in MeshKind::ALL {
            assert_well_formed(&kind.geometry());
        }
    }

    #[test]
    fn cube_spans_unit_extent() {
        let cube = Geometry::cube();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        for vertex in &cube.vertices {
            assert!(vertex.position.iter().all(|c| c.abs() == 0.5));
        }
    }

    #[test]
    fn cylinder_stands_on_the_floor() {
        let cylinder = Geometry::cylinder(8);
        let (min, max) = cylinder
            .vertices
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), v| {
                (lo.min(v.position[1]), hi.max(v.position[1]))
            });
        assert_eq!((min, max), (0.0, 1.0));
        // side + two caps
        assert_eq!(cylinder.indices.len(), (8 * 6 + 8 * 3 * 2) as usize);
    }

    #[test]
    fn torus_lies_around_z_axis() {
        let torus = Geometry::torus(12, 6);
        assert_eq!(torus.vertices.len(), 13 * 7);
        assert_eq!(torus.indices.len(), 12 * 6 * 6);
        for vertex in &torus.vertices {
            assert!(vertex.position[2].abs() <= TORUS_MINOR_RADIUS + 1e-6);
        }
    }

    #[test]
    fn kinds_have_distinct_indices() {
        let mut seen = [false; 4];
        for kind in MeshKind::ALL {
            assert!(!seen[kind.index()]);
            seen[kind.index()] = true;
        }
    }
}
