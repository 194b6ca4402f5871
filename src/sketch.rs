//! The sketch controller: one camera, one scene, one mesh, one surface.

use std::rc::Rc;

use crate::camera::PerspectiveCamera;
use crate::config::SketchConfig;
use crate::controls::{OrbitControls, PointerInput};
use crate::error::Result;
use crate::frame::{FrameState, Viewport};
use crate::geometry::PlaneGeometry;
use crate::scene::{Mesh, MeshId, Scene, ShaderMaterial, U_PROGRESS, U_TIME};
use crate::settings::SettingsSource;

/// The element a sketch is mounted into.
pub trait Container {
    type Node;

    /// Current size of the layout box, in CSS pixels.
    fn layout_size(&self) -> Viewport;

    fn pixel_ratio(&self) -> f64 {
        1.0
    }

    fn append(&self, node: &Self::Node) -> Result<()>;

    fn remove(&self, node: &Self::Node) -> Result<()>;
}

/// Something that can draw a [`Scene`] through a camera.
pub trait Surface {
    type Node;

    /// The mountable drawable element.
    fn node(&self) -> &Self::Node;

    fn set_size(&mut self, width: f64, height: f64);

    fn set_pixel_ratio(&mut self, ratio: f64);

    /// Uploads the mesh geometry and compiles its material.
    fn prepare(&mut self, mesh: &Mesh) -> Result<()>;

    /// Issues the draw calls for one frame.
    fn draw(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<()>;

    /// Frees whatever `prepare` allocated. Safe to call more than once.
    fn release(&mut self) {}
}

pub struct Sketch<C, S>
where
    C: Container,
    S: Surface<Node = C::Node>,
{
    container: C,
    surface: S,
    config: SketchConfig,
    settings: Option<Rc<dyn SettingsSource>>,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    scene: Scene,
    viewport: Viewport,
    frame: FrameState,
    mesh: Option<MeshId>,
}

impl<C, S> Sketch<C, S>
where
    C: Container,
    S: Surface<Node = C::Node>,
{
    /// Mounts `surface` into `container`, sizes it and builds the scene.
    ///
    /// The container is expected to have a non-zero layout box.
    pub fn new(
        container: C,
        surface: S,
        config: SketchConfig,
        settings: Option<Rc<dyn SettingsSource>>,
    ) -> Result<Self> {
        let viewport = container.layout_size();
        let mut controls = OrbitControls::new();
        controls.enabled = config.controls;
        let mut sketch = Self {
            camera: PerspectiveCamera::new(viewport.aspect()),
            controls,
            container,
            surface,
            config,
            settings,
            scene: Scene::new(),
            viewport,
            frame: FrameState::new(),
            mesh: None,
        };

        sketch.container.append(sketch.surface.node())?;
        let ratio = sketch
            .config
            .pixel_ratio
            .unwrap_or_else(|| sketch.container.pixel_ratio());
        sketch.surface.set_pixel_ratio(ratio);

        sketch.resize();
        if let Err(err) = sketch.add_objects() {
            if let Err(detach) = sketch.unmount() {
                log::warn!("failed to detach surface after setup error: {}", detach);
            }
            return Err(err);
        }
        log::info!(
            "sketch ready: {:?} variant, {}x{} viewport, pixel ratio {}",
            sketch.config.variant,
            sketch.viewport.width,
            sketch.viewport.height,
            ratio
        );
        Ok(sketch)
    }

    /// Re-reads the container size and refits surface and camera.
    pub fn resize(&mut self) {
        let viewport = self.container.layout_size();
        if viewport.is_degenerate() {
            log::warn!(
                "container has a degenerate layout box ({}x{}); camera math will not be finite",
                viewport.width,
                viewport.height
            );
        }
        self.viewport = viewport;
        self.surface.set_size(viewport.width, viewport.height);
        self.camera.fit(viewport);
        log::debug!(
            "resized to {}x{}, aspect {:.4}, fov {:.4}",
            viewport.width,
            viewport.height,
            self.camera.aspect,
            self.camera.fov
        );
    }

    /// Builds the plane mesh and inserts it into the scene. Runs once.
    pub fn add_objects(&mut self) -> Result<()> {
        if self.mesh.is_some() {
            return Ok(());
        }
        let mesh = Mesh {
            id: self.scene.next_id(),
            geometry: PlaneGeometry::new(self.config.plane),
            material: ShaderMaterial::for_config(&self.config),
            rotation: self.frame.rotation(),
        };
        self.surface.prepare(&mesh)?;
        log::debug!(
            "added plane mesh {:?}: {} vertices, {} triangles, wireframe {}",
            mesh.id,
            mesh.geometry.vertex_count(),
            mesh.geometry.triangle_count(),
            mesh.material.wireframe
        );
        self.mesh = Some(mesh.id);
        self.scene.add(mesh);
        Ok(())
    }

    /// Advances the clock, pushes uniforms and draws one frame.
    pub fn render(&mut self) -> Result<()> {
        self.frame = self.frame.advance();
        let time = self.frame.time();
        let rotation = self.frame.rotation();
        let progress = self.settings.as_ref().map(|s| s.progress());

        if let Some(mesh) = self.mesh.and_then(|id| self.scene.mesh_mut(id)) {
            mesh.rotation = rotation;
            let uniforms = &mut mesh.material.uniforms;
            uniforms.set_float(U_TIME, time as f32);
            if let Some(progress) = progress {
                uniforms.set_float(U_PROGRESS, progress as f32);
            }
        }

        self.surface.draw(&self.scene, &self.camera)
    }

    /// Applies pointer input to the orbit controls. Returns whether the
    /// camera moved.
    pub fn handle_pointer(&mut self, input: PointerInput) -> bool {
        let moved = self.controls.handle(input, self.viewport.height);
        if moved {
            self.controls.update(&mut self.camera);
            log::trace!("camera orbit {:?}", self.controls.spherical());
        }
        moved
    }

    /// Releases GPU resources and detaches the surface from the container.
    pub fn unmount(&mut self) -> Result<()> {
        self.surface.release();
        self.container.remove(self.surface.node())
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frame(&self) -> FrameState {
        self.frame
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        let id = self.mesh?;
        self.scene.meshes().iter().find(|m| m.id == id)
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn container(&self) -> &C {
        &self.container
    }
}
