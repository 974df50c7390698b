//! The car-interior scene.
//!
//! Preparation defines the materials, loads and binds the textures, writes
//! the lights and uploads the primitive meshes. Rendering walks
//! [`CABIN_OBJECTS`] in order and issues one draw per entry.

use std::path::{Path, PathBuf};

use cgmath::Vector3;

use crate::{
    data_structures::{
        light::Lighting,
        mesh::MeshKind,
        transform::Transform,
    },
    render::{RenderContext, RenderTarget},
    resources::{
        material::MaterialRegistry,
        texture::{TextureBackend, TextureRegistry},
        texture_path,
    },
};

/// How an object's surface is coloured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Surface {
    /// Sample a registered texture, optionally changing the UV scale.
    Texture {
        tag: &'static str,
        uv_scale: Option<[f32; 2]>,
    },
    /// Solid RGBA colour.
    Color([f32; 4]),
    /// Keep whatever surface the previous draw left behind.
    Inherit,
}

/// One draw of the scene: pose, appearance and primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneObject {
    pub name: &'static str,
    pub mesh: MeshKind,
    pub scale: [f32; 3],
    /// Degrees around X, Y and Z.
    pub rotation: [f32; 3],
    pub position: [f32; 3],
    pub material: &'static str,
    pub surface: Surface,
}

impl SceneObject {
    pub fn transform(&self) -> Transform {
        Transform {
            scale: self.scale.into(),
            rotation_x: self.rotation[0],
            rotation_y: self.rotation[1],
            rotation_z: self.rotation[2],
            position: self.position.into(),
        }
    }

    /// transform → material → surface → draw
    pub fn draw<T, B>(&self, ctx: &mut RenderContext<'_, T, B>)
    where
        T: RenderTarget + ?Sized,
        B: TextureBackend,
    {
        let t = self.transform();
        ctx.set_transform(t.scale, t.rotation_x, t.rotation_y, t.rotation_z, t.position);
        ctx.set_material(self.material);
        match self.surface {
            Surface::Texture { tag, uv_scale } => {
                ctx.set_texture(tag);
                if let Some([u, v]) = uv_scale {
                    ctx.set_uv_scale(u, v);
                }
            }
            Surface::Color([r, g, b, a]) => ctx.set_flat_color(r, g, b, a),
            Surface::Inherit => {}
        }
        ctx.draw(self.mesh);
    }
}

/// (tag, diffuse, specular, shininess)
pub const CABIN_MATERIALS: [(&str, [f32; 3], [f32; 3], f32); 5] = [
    ("matteblack", [0.1, 0.1, 0.1], [0.1, 0.1, 0.1], 8.0),
    ("polishwhite", [0.95, 0.95, 0.95], [0.5, 0.5, 0.5], 32.0),
    ("glassscreen", [0.1, 0.1, 0.1], [0.9, 0.9, 0.9], 128.0),
    ("dashmat", [0.3, 0.3, 0.3], [0.1, 0.1, 0.1], 4.0),
    ("plastic", [0.15, 0.15, 0.15], [0.3, 0.3, 0.3], 16.0),
];

/// (file under `textures/`, tag)
pub const CABIN_TEXTURES: [(&str, &str); 7] = [
    ("leather1.jpg", "dash"),
    ("tesla_screen.jpg", "screen"),
    ("leatherwhite.jpg", "base"),
    ("metalgrid.jpg", "ground"),
    ("grayleather.jpg", "dashText"),
    ("black_plastic.jpg", "plastic"),
    ("steering_wheel.jpg", "wheel"),
];

const WHEEL_HUB: [f32; 3] = [-0.65, 0.85, -0.7];

pub const CABIN_OBJECTS: &[SceneObject] = &[
    SceneObject {
        name: "ground",
        mesh: MeshKind::Plane,
        scale: [20.0, 1.0, 10.0],
        rotation: [0.0, 0.0, 0.0],
        position: [0.0, 0.0, 0.0],
        material: "dashmat",
        surface: Surface::Texture {
            tag: "ground",
            uv_scale: None,
        },
    },
    SceneObject {
        name: "dashboard body",
        mesh: MeshKind::Cylinder,
        scale: [2.8, 0.12, 0.6],
        rotation: [20.0, 0.0, 0.0],
        position: [0.0, 0.8, -1.5],
        material: "dashmat",
        surface: Surface::Texture {
            tag: "dash",
            uv_scale: Some([3.0, 1.0]),
        },
    },
    // "metal" is never defined, so the dashmat material carries over
    SceneObject {
        name: "dashboard top",
        mesh: MeshKind::Box,
        scale: [2.8, 0.02, 0.2],
        rotation: [5.0, 0.0, 0.0],
        position: [0.0, 0.95, -1.4],
        material: "metal",
        surface: Surface::Color([0.15, 0.15, 0.15, 1.0]),
    },
    SceneObject {
        name: "screen bezel",
        mesh: MeshKind::Box,
        scale: [0.49, 0.65, 0.04],
        rotation: [5.0, 0.0, 0.0],
        position: [0.0, 0.9, -0.85],
        material: "plastic",
        surface: Surface::Color([0.05, 0.05, 0.05, 1.0]),
    },
    SceneObject {
        name: "display",
        mesh: MeshKind::Box,
        scale: [0.47, 0.63, 0.02],
        rotation: [5.0, 0.0, 0.0],
        position: [0.0, 0.9, -0.83],
        material: "glassscreen",
        surface: Surface::Texture {
            tag: "screen",
            uv_scale: Some([1.0, 1.0]),
        },
    },
    SceneObject {
        name: "steering wheel",
        mesh: MeshKind::Torus,
        scale: [0.26, 0.26, 0.05],
        rotation: [20.0, 0.0, 0.0],
        position: WHEEL_HUB,
        material: "plastic",
        surface: Surface::Texture {
            tag: "wheel",
            uv_scale: None,
        },
    },
    SceneObject {
        name: "steering column",
        mesh: MeshKind::Cylinder,
        scale: [0.04, 0.41, 0.04],
        rotation: [-90.0, 0.0, 0.0],
        position: WHEEL_HUB,
        material: "matteblack",
        surface: Surface::Inherit,
    },
    SceneObject {
        name: "airbag cover",
        mesh: MeshKind::Box,
        scale: [0.12, 0.12, 0.05],
        rotation: [20.0, 0.0, 0.0],
        position: WHEEL_HUB,
        material: "plastic",
        surface: Surface::Color([0.2, 0.2, 0.2, 1.0]),
    },
    SceneObject {
        name: "seat base",
        mesh: MeshKind::Box,
        scale: [0.5, 0.1, 0.5],
        rotation: [0.0, 0.0, 0.0],
        position: [-0.7, 0.1, 0.0],
        material: "dashmat",
        surface: Surface::Texture {
            tag: "dash",
            uv_scale: None,
        },
    },
    SceneObject {
        name: "seat back",
        mesh: MeshKind::Box,
        scale: [0.5, 0.7, 0.1],
        rotation: [15.0, 0.0, 0.0],
        position: [-0.699, 0.5, 0.35],
        material: "dashmat",
        surface: Surface::Texture {
            tag: "dash",
            uv_scale: None,
        },
    },
    SceneObject {
        name: "center console",
        mesh: MeshKind::Box,
        scale: [0.3, 0.25, 1.8],
        rotation: [0.0, 0.0, 0.0],
        position: [0.0, 0.2, -0.2],
        material: "plastic",
        surface: Surface::Color([0.1, 0.1, 0.1, 1.0]),
    },
    SceneObject {
        name: "cup holders",
        mesh: MeshKind::Box,
        scale: [0.2, 0.1, 0.2],
        rotation: [0.0, 0.0, 0.0],
        position: [0.0, 0.3, 0.4],
        material: "matteblack",
        surface: Surface::Inherit,
    },
];

pub struct CabinScene<B: TextureBackend> {
    asset_dir: PathBuf,
    lighting: Lighting,
    objects: &'static [SceneObject],
    textures: TextureRegistry<B>,
    materials: MaterialRegistry,
    prepared: bool,
}

impl<B: TextureBackend> CabinScene<B> {
    pub fn new(asset_dir: impl Into<PathBuf>, backend: B) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            lighting: Lighting::cabin(),
            objects: CABIN_OBJECTS,
            textures: TextureRegistry::new(backend),
            materials: MaterialRegistry::new(),
            prepared: false,
        }
    }

    /// Define materials, load textures, write lights and upload meshes.
    ///
    /// Only the first call does any work. Texture failures are logged and
    /// skipped; the affected objects render with the sentinel texture unit.
    pub fn prepare<T: RenderTarget + ?Sized>(&mut self, target: &mut T) {
        if self.prepared {
            log::warn!("Scene is already prepared");
            return;
        }
        self.define_materials();
        self.load_textures();
        self.lighting.apply(target);
        for kind in MeshKind::ALL {
            target.load_mesh(kind);
        }
        self.prepared = true;
    }

    fn define_materials(&mut self) {
        for (tag, diffuse, specular, shininess) in CABIN_MATERIALS {
            self.materials.define(
                tag,
                Vector3::from(diffuse),
                Vector3::from(specular),
                shininess,
            );
        }
    }

    fn load_textures(&mut self) {
        for (file_name, tag) in CABIN_TEXTURES {
            // failures are already logged by the registry
            let _ = self.textures.load(texture_path(&self.asset_dir, file_name), tag);
        }
        log::info!(
            "Loaded {} of {} scene textures",
            self.textures.len(),
            CABIN_TEXTURES.len()
        );
        self.textures.bind_all();
    }

    /// Issue every draw of the scene in order.
    pub fn render<T: RenderTarget + ?Sized>(&self, target: &mut T) {
        let mut ctx = self.context(Some(target));
        for object in self.objects {
            object.draw(&mut ctx);
        }
    }

    /// A state bridge over this scene's registries.
    pub fn context<'a, T: RenderTarget + ?Sized>(
        &'a self,
        target: Option<&'a mut T>,
    ) -> RenderContext<'a, T, B> {
        RenderContext::new(target, &self.textures, &self.materials)
    }

    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn objects(&self) -> &'static [SceneObject] {
        self.objects
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn textures(&self) -> &TextureRegistry<B> {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }
}
