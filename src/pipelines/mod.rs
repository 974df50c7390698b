//! Render pipelines.
//!
//! - `basic` builds the Phong pipeline and its bind group layouts
//! - `scene` owns the uniform buffers and replays a recorded frame

pub mod basic;
pub mod scene;
