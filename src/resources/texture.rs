//! Tag-addressed texture registry.
//!
//! Textures are loaded once during scene preparation and bound to the texture
//! unit matching their registry index. The registry owns the GPU objects it
//! created and releases each exactly once, either explicitly through
//! [`TextureRegistry::release_all`] or when it is dropped.

use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

use image::DynamicImage;

use crate::data_structures::texture::{Texture, create_default_sampler};

/// Number of texture units a scene can address.
pub const TEXTURE_SLOTS: usize = 16;

/// The GPU side of the registry: turns decoded images into texture objects.
pub trait TextureBackend {
    type Handle: Copy + PartialEq + fmt::Debug;

    /// Upload an already validated and flipped image. `label` is the tag.
    fn upload(&mut self, image: &DynamicImage, label: &str) -> anyhow::Result<Self::Handle>;

    /// Make `handle` the texture sampled by unit `slot`.
    fn bind(&mut self, slot: usize, handle: Self::Handle);

    /// Destroy the texture object behind `handle`.
    fn release(&mut self, handle: Self::Handle);
}

#[derive(Debug)]
pub enum TextureError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    UnsupportedChannels {
        path: PathBuf,
        channels: u8,
    },
    RegistryFull {
        capacity: usize,
    },
    Upload {
        path: PathBuf,
        source: anyhow::Error,
    },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "could not read image {}: {source}", path.display())
            }
            Self::Decode { path, source } => {
                write!(f, "could not decode image {}: {source}", path.display())
            }
            Self::UnsupportedChannels { path, channels } => write!(
                f,
                "image {} has {channels} channels, only RGB and RGBA are supported",
                path.display()
            ),
            Self::RegistryFull { capacity } => {
                write!(f, "all {capacity} texture slots are in use")
            }
            Self::Upload { path, source } => {
                write!(f, "could not upload image {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::Upload { source, .. } => Some(source.as_ref()),
            Self::UnsupportedChannels { .. } | Self::RegistryFull { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextureEntry<H> {
    pub tag: String,
    pub handle: H,
}

pub struct TextureRegistry<B: TextureBackend> {
    backend: B,
    entries: Vec<TextureEntry<B::Handle>>,
    // first slot registered under each tag
    slots: HashMap<String, usize>,
}

impl<B: TextureBackend> TextureRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            entries: Vec::with_capacity(TEXTURE_SLOTS),
            slots: HashMap::new(),
        }
    }

    /// Decode `path`, upload it and register it under `tag`.
    ///
    /// Returns the texture unit the image was assigned to. On failure the
    /// registry is left untouched and the error is logged.
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        tag: impl Into<String>,
    ) -> Result<usize, TextureError> {
        let path = path.as_ref();
        let result = self.try_load(path, tag.into());
        if let Err(e) = &result {
            log::error!("{e}");
        }
        result
    }

    fn try_load(&mut self, path: &Path, tag: String) -> Result<usize, TextureError> {
        if self.entries.len() >= TEXTURE_SLOTS {
            return Err(TextureError::RegistryFull {
                capacity: TEXTURE_SLOTS,
            });
        }
        let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let image = image::load_from_memory(&bytes).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let channels = image.color().channel_count();
        if channels != 3 && channels != 4 {
            return Err(TextureError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels,
            });
        }
        log::info!(
            "Loaded image {}: {}x{}, {} channels",
            path.display(),
            image.width(),
            image.height(),
            channels
        );

        // meshes use bottom-left texture origin
        let image = image.flipv();
        let handle = self
            .backend
            .upload(&image, &tag)
            .map_err(|source| TextureError::Upload {
                path: path.to_path_buf(),
                source,
            })?;

        let slot = self.entries.len();
        if self.slots.contains_key(&tag) {
            log::warn!("Texture tag '{tag}' is already registered; lookups keep the first entry");
        }
        self.slots.entry(tag.clone()).or_insert(slot);
        self.entries.push(TextureEntry { tag, handle });
        Ok(slot)
    }

    /// Bind every registered texture to the unit equal to its index.
    pub fn bind_all(&mut self) {
        for (slot, entry) in self.entries.iter().enumerate() {
            self.backend.bind(slot, entry.handle);
        }
    }

    pub fn find_handle(&self, tag: &str) -> Option<B::Handle> {
        self.find_slot(tag).map(|slot| self.entries[slot].handle)
    }

    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.slots.get(tag).copied()
    }

    /// Destroy every texture and empty the registry.
    pub fn release_all(&mut self) {
        for entry in self.entries.drain(..) {
            log::debug!("Releasing texture '{}'", entry.tag);
            self.backend.release(entry.handle);
        }
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureEntry<B::Handle>> {
        self.entries.iter()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: TextureBackend> Drop for TextureRegistry<B> {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl<B: TextureBackend> fmt::Debug for TextureRegistry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureRegistry")
            .field("entries", &self.entries)
            .finish()
    }
}

/// Layout of the texture bind group: one 2D texture per slot, then the sampler.
pub fn texture_slots_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let mut entries: Vec<wgpu::BindGroupLayoutEntry> = (0..TEXTURE_SLOTS as u32)
        .map(|binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        })
        .collect();
    entries.push(wgpu::BindGroupLayoutEntry {
        binding: TEXTURE_SLOTS as u32,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    });
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &entries,
        label: Some("texture_slots_bind_group_layout"),
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

/// wgpu implementation of [`TextureBackend`].
///
/// Keeps the texture bind group in sync with the slot assignments; slots that
/// were never bound sample a white fallback texture.
pub struct GpuTextures {
    device: wgpu::Device,
    queue: wgpu::Queue,
    textures: HashMap<TextureId, Texture>,
    next_id: u32,
    bound: [Option<TextureId>; TEXTURE_SLOTS],
    fallback: Texture,
    sampler: wgpu::Sampler,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GpuTextures {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let fallback = Texture::create_solid(device, queue, [255; 4], "fallback texture");
        let sampler = create_default_sampler(device);
        let layout = texture_slots_layout(device);
        let bound = [None; TEXTURE_SLOTS];
        let bind_group =
            create_slots_bind_group(device, &layout, &HashMap::new(), &bound, &fallback, &sampler);
        Self {
            device: device.clone(),
            queue: queue.clone(),
            textures: HashMap::new(),
            next_id: 0,
            bound,
            fallback,
            sampler,
            layout,
            bind_group,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    fn rebuild_bind_group(&mut self) {
        self.bind_group = create_slots_bind_group(
            &self.device,
            &self.layout,
            &self.textures,
            &self.bound,
            &self.fallback,
            &self.sampler,
        );
    }
}

impl TextureBackend for GpuTextures {
    type Handle = TextureId;

    fn upload(&mut self, image: &DynamicImage, label: &str) -> anyhow::Result<TextureId> {
        let limit = self.device.limits().max_texture_dimension_2d;
        if image.width() > limit || image.height() > limit {
            anyhow::bail!(
                "{}x{} exceeds the device limit of {limit}",
                image.width(),
                image.height()
            );
        }
        let texture = Texture::from_rgba(&self.device, &self.queue, &image.to_rgba8(), Some(label));
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.textures.insert(id, texture);
        Ok(id)
    }

    fn bind(&mut self, slot: usize, handle: TextureId) {
        let Some(unit) = self.bound.get_mut(slot) else {
            log::warn!("Texture slot {slot} is out of range");
            return;
        };
        *unit = Some(handle);
        self.rebuild_bind_group();
    }

    fn release(&mut self, handle: TextureId) {
        if let Some(texture) = self.textures.remove(&handle) {
            texture.texture.destroy();
        }
        for unit in self.bound.iter_mut().filter(|unit| **unit == Some(handle)) {
            *unit = None;
        }
        self.rebuild_bind_group();
    }
}

fn create_slots_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    textures: &HashMap<TextureId, Texture>,
    bound: &[Option<TextureId>; TEXTURE_SLOTS],
    fallback: &Texture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    let mut entries: Vec<wgpu::BindGroupEntry> = bound
        .iter()
        .enumerate()
        .map(|(binding, unit)| {
            let view = unit
                .and_then(|id| textures.get(&id))
                .map_or(&fallback.view, |texture| &texture.view);
            wgpu::BindGroupEntry {
                binding: binding as u32,
                resource: wgpu::BindingResource::TextureView(view),
            }
        })
        .collect();
    entries.push(wgpu::BindGroupEntry {
        binding: TEXTURE_SLOTS as u32,
        resource: wgpu::BindingResource::Sampler(sampler),
    });
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &entries,
        label: Some("texture_slots_bind_group"),
    })
}
