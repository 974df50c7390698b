//! Scene resources: the texture and material registries and the GPU buffers
//! backing the primitive meshes.

pub mod material;
pub mod mesh;
pub mod texture;

use std::path::{Path, PathBuf};

/// Resolve a texture file name against the scene's asset directory.
pub fn texture_path(asset_dir: &Path, file_name: &str) -> PathBuf {
    asset_dir.join("textures").join(file_name)
}
