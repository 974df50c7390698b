//! Scene data structures: materials, lights, meshes, textures and transforms.
//!
//! - `material` holds the Phong material property set referenced by tag
//! - `light` holds the directional and point lights of a scene
//! - `mesh` generates the four primitive meshes and defines the mesh service
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `transform` builds per-draw model matrices

pub mod light;
pub mod material;
pub mod mesh;
pub mod texture;
pub mod transform;
