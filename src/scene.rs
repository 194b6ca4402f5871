//! Scene root, meshes and shader materials.

use glam::{EulerRot, Mat4};

use crate::config::{SketchConfig, Variant};
use crate::frame::Rotation;
use crate::geometry::PlaneGeometry;
use crate::uniforms::{TextureRef, UniformSet, UniformValue};

pub const PLANE_VERTEX_SHADER: &str = include_str!("shaders/plane.vert");
pub const PLANE_FRAGMENT_SHADER: &str = include_str!("shaders/plane.frag");
pub const PROGRESS_VERTEX_SHADER: &str = include_str!("shaders/progress.vert");
pub const PROGRESS_FRAGMENT_SHADER: &str = include_str!("shaders/progress.frag");

pub const U_TIME: &str = "time";
pub const U_RESOLUTION: &str = "resolution";
pub const U_PROGRESS: &str = "uProgress";
pub const U_TEXTURE: &str = "uTexture";
pub const U_TEXTURE_SIZE: &str = "uTextureSize";
pub const U_RESOLUTION_FIXED: &str = "uResolution";

/// A vertex/fragment pair plus the uniforms pushed with every draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderMaterial {
    pub vertex_shader: &'static str,
    pub fragment_shader: &'static str,
    pub uniforms: UniformSet,
    pub wireframe: bool,
}

impl ShaderMaterial {
    /// Builds the material for `config.variant`.
    pub fn for_config(config: &SketchConfig) -> Self {
        match config.variant {
            Variant::Basic => Self {
                vertex_shader: PLANE_VERTEX_SHADER,
                fragment_shader: PLANE_FRAGMENT_SHADER,
                uniforms: UniformSet::new()
                    .with(U_TIME, UniformValue::Float(1.0))
                    .with(U_RESOLUTION, UniformValue::Vec2(config.resolution)),
                wireframe: config.wireframe,
            },
            Variant::Progress => Self {
                vertex_shader: PROGRESS_VERTEX_SHADER,
                fragment_shader: PROGRESS_FRAGMENT_SHADER,
                uniforms: UniformSet::new()
                    .with(U_TIME, UniformValue::Float(0.0))
                    .with(U_PROGRESS, UniformValue::Float(0.0))
                    .with(
                        U_TEXTURE,
                        UniformValue::Texture(TextureRef {
                            unit: 0,
                            url: config.texture_url.clone(),
                        }),
                    )
                    .with(U_TEXTURE_SIZE, UniformValue::Vec2(config.texture_size))
                    .with(U_RESOLUTION_FIXED, UniformValue::Vec2(config.resolution)),
                wireframe: config.wireframe,
            },
        }
    }
}

/// Handle the surface uses to find the GPU buffers of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub id: MeshId,
    pub geometry: PlaneGeometry,
    pub material: ShaderMaterial,
    pub rotation: Rotation,
}

impl Mesh {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(
            EulerRot::XYZ,
            self.rotation.x as f32,
            self.rotation.y as f32,
            self.rotation.z as f32,
        )
    }
}

/// Scene graph root. Flat: the sketch never nests objects.
#[derive(Debug, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> MeshId {
        let id = MeshId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.meshes.iter_mut().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
