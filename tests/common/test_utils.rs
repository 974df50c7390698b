use std::{
    cell::RefCell,
    path::{Path, PathBuf},
    rc::Rc,
};

use cabin_scene::{
    data_structures::mesh::{MeshKind, MeshProvider},
    resources::texture::TextureBackend,
    shader::ShaderUniforms,
};
use cgmath::{Matrix4, Vector2, Vector3, Vector4};
use image::{DynamicImage, ImageBuffer, ImageFormat, Luma, LumaA, Rgb, Rgba};

/// Everything a [`RecordingTarget`] was asked to do, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Mat4(String, Matrix4<f32>),
    Vec4(String, Vector4<f32>),
    Vec3(String, Vector3<f32>),
    Vec2(String, Vector2<f32>),
    Float(String, f32),
    Int(String, i32),
    Bool(String, bool),
    Sampler(String, i32),
    Load(MeshKind),
    Draw(MeshKind),
}

impl Call {
    pub fn name(&self) -> Option<&str> {
        match self {
            Call::Mat4(name, _)
            | Call::Vec4(name, _)
            | Call::Vec3(name, _)
            | Call::Vec2(name, _)
            | Call::Float(name, _)
            | Call::Int(name, _)
            | Call::Bool(name, _)
            | Call::Sampler(name, _) => Some(name),
            Call::Load(_) | Call::Draw(_) => None,
        }
    }
}

/// Shader and mesh stand-in that only records calls.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub calls: Vec<Call>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn loads(&self) -> Vec<MeshKind> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Load(kind) => Some(*kind),
                _ => None,
            })
            .collect()
    }

    pub fn draws(&self) -> Vec<MeshKind> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Draw(kind) => Some(*kind),
                _ => None,
            })
            .collect()
    }

    /// Calls grouped per draw: each slice ends with its `Draw`.
    pub fn draw_segments(&self) -> Vec<&[Call]> {
        let mut segments = Vec::new();
        let mut start = 0;
        for (i, call) in self.calls.iter().enumerate() {
            if matches!(call, Call::Draw(_)) {
                segments.push(&self.calls[start..=i]);
                start = i + 1;
            }
        }
        segments
    }

    /// The last value written under `name`, if any.
    pub fn last(&self, name: &str) -> Option<&Call> {
        self.calls.iter().rev().find(|call| call.name() == Some(name))
    }
}

impl ShaderUniforms for RecordingTarget {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.calls.push(Call::Mat4(name.to_string(), value));
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.calls.push(Call::Vec4(name.to_string(), value));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.calls.push(Call::Vec3(name.to_string(), value));
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.calls.push(Call::Vec2(name.to_string(), value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.calls.push(Call::Float(name.to_string(), value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.calls.push(Call::Int(name.to_string(), value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.calls.push(Call::Bool(name.to_string(), value));
    }

    fn set_sampler(&mut self, name: &str, unit: i32) {
        self.calls.push(Call::Sampler(name.to_string(), unit));
    }
}

impl MeshProvider for RecordingTarget {
    fn load_mesh(&mut self, kind: MeshKind) {
        self.calls.push(Call::Load(kind));
    }

    fn draw_mesh(&mut self, kind: MeshKind) {
        self.calls.push(Call::Draw(kind));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Upload {
    pub label: String,
    pub width: u32,
    pub height: u32,
    /// RGBA of the top-left texel as the backend received it.
    pub first_texel: [u8; 4],
}

/// Texture backend handing out sequential ids.
///
/// Releases are shared through an `Rc` so they can be inspected after the
/// registry owning the backend is dropped.
#[derive(Debug, Default)]
pub struct FakeTextures {
    pub uploads: Vec<Upload>,
    pub binds: Vec<(usize, u32)>,
    pub released: Rc<RefCell<Vec<u32>>>,
    pub fail_uploads: bool,
    next: u32,
}

impl FakeTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn release_log(&self) -> Rc<RefCell<Vec<u32>>> {
        self.released.clone()
    }
}

impl TextureBackend for FakeTextures {
    type Handle = u32;

    fn upload(&mut self, image: &DynamicImage, label: &str) -> anyhow::Result<u32> {
        anyhow::ensure!(!self.fail_uploads, "upload of '{label}' refused");
        let rgba = image.to_rgba8();
        self.uploads.push(Upload {
            label: label.to_string(),
            width: image.width(),
            height: image.height(),
            first_texel: rgba.get_pixel(0, 0).0,
        });
        let handle = self.next;
        self.next += 1;
        Ok(handle)
    }

    fn bind(&mut self, slot: usize, handle: u32) {
        self.binds.push((slot, handle));
    }

    fn release(&mut self, handle: u32) {
        self.released.borrow_mut().push(handle);
    }
}

/// Write a `width`×`height` PNG with the given channel count (1 to 4).
pub fn write_image(dir: &Path, name: &str, channels: u8, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let image = match channels {
        1 => DynamicImage::ImageLuma8(ImageBuffer::from_pixel(width, height, Luma([128]))),
        2 => DynamicImage::ImageLumaA8(ImageBuffer::from_pixel(width, height, LumaA([128, 255]))),
        3 => DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb([200, 100, 50]))),
        4 => DynamicImage::ImageRgba8(ImageBuffer::from_pixel(
            width,
            height,
            Rgba([200, 100, 50, 255]),
        )),
        other => panic!("cannot build an image with {other} channels"),
    };
    image
        .save_with_format(&path, ImageFormat::Png)
        .expect("write test image");
    path
}

/// Write a 1×2 RGB image: red on top, blue at the bottom.
pub fn write_two_row_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut image = ImageBuffer::new(1, 2);
    image.put_pixel(0, 0, Rgb([255u8, 0, 0]));
    image.put_pixel(0, 1, Rgb([0u8, 0, 255]));
    DynamicImage::ImageRgb8(image)
        .save_with_format(&path, ImageFormat::Png)
        .expect("write test image");
    path
}

/// Create `<dir>/textures/<file>` for every file name given.
pub fn write_scene_textures<'a>(dir: &Path, files: impl IntoIterator<Item = &'a str>) {
    let textures = dir.join("textures");
    std::fs::create_dir_all(&textures).expect("create textures dir");
    for file in files {
        // PNG bytes under a .jpg name; decoding sniffs the format
        write_image(&textures, file, 3, 4, 4);
    }
}
