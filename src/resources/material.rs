use std::collections::HashMap;

use cgmath::Vector3;

use crate::data_structures::material::Material;

/// Materials defined for a scene, addressed by tag.
///
/// Definitions keep their insertion order. Redefining a tag is allowed, but
/// lookups keep resolving to the first definition.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
    index: HashMap<String, usize>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(
        &mut self,
        tag: impl Into<String>,
        diffuse_color: Vector3<f32>,
        specular_color: Vector3<f32>,
        shininess: f32,
    ) {
        let material = Material::new(tag, diffuse_color, specular_color, shininess);
        if self.index.contains_key(&material.tag) {
            log::warn!(
                "Material '{}' is defined twice; lookups keep the first definition",
                material.tag
            );
        } else {
            self.index.insert(material.tag.clone(), self.materials.len());
        }
        self.materials.push(material);
    }

    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.index.get(tag).map(|&i| &self.materials[i])
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}
