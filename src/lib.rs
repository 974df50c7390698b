//! cabin-scene
//!
//! A small wgpu renderer that assembles a car interior (dashboard, screen,
//! steering wheel, seats, console) from four primitive meshes. Textures and
//! materials are registered by tag, lights are static, and every object is
//! drawn by writing its transform, material and surface into named shader
//! uniforms before the draw call.
//!
//! High-level modules
//! - `camera`: fixed look-at camera for the driver's view
//! - `config`: window, asset and logging configuration
//! - `context`: window surface, device and queue
//! - `data_structures`: materials, lights, meshes, textures and transforms
//! - `flow`: the winit application loop
//! - `frame`: records draw commands and uniform snapshots for one frame
//! - `logging`: logger initialisation
//! - `pipelines`: the Phong render pipeline and frame replay
//! - `render`: the per-draw shader state bridge
//! - `resources`: texture and material registries, GPU mesh buffers
//! - `scene`: the cabin's materials, textures and draw list
//! - `shader`: the uniform name contract and the `ShaderUniforms` seam
//! - `uniforms`: CPU staging of the uniform contract for wgpu

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod frame;
pub mod logging;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
pub mod shader;
pub mod uniforms;

pub use cgmath::{Matrix4, Vector2, Vector3, Vector4};
