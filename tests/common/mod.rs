#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use plane_sketch::camera::PerspectiveCamera;
use plane_sketch::scene::{Mesh, MeshId, Scene, U_PROGRESS, U_TIME};
use plane_sketch::{Container, Result, Scheduler, SketchError, Surface, Viewport};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Append,
    Remove,
    PixelRatio(f64),
    Size(f64, f64),
    Prepare(MeshId),
    Draw(DrawRecord),
    Release,
}

/// What one draw call saw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub time: Option<f32>,
    pub progress: Option<f32>,
    pub rotation_x: f64,
    pub rotation_y: f64,
    pub aspect: f64,
    pub fov: f64,
}

pub type Log = Rc<RefCell<Vec<Event>>>;

/// Container whose layout box the test can resize at will.
pub struct FakeContainer {
    pub size: Rc<Cell<Viewport>>,
    pub log: Log,
}

impl Container for FakeContainer {
    type Node = ();

    fn layout_size(&self) -> Viewport {
        self.size.get()
    }

    fn pixel_ratio(&self) -> f64 {
        2.0
    }

    fn append(&self, _node: &()) -> Result<()> {
        self.log.borrow_mut().push(Event::Append);
        Ok(())
    }

    fn remove(&self, _node: &()) -> Result<()> {
        self.log.borrow_mut().push(Event::Remove);
        Ok(())
    }
}

pub struct RecordingSurface {
    pub log: Log,
    pub size: (f64, f64),
    pub pixel_ratio: f64,
    /// Makes every draw fail once set.
    pub fail_draws: Rc<Cell<bool>>,
    /// Makes `prepare` report a shader compile error.
    pub fail_prepare: Rc<Cell<bool>>,
}

impl Surface for RecordingSurface {
    type Node = ();

    fn node(&self) -> &() {
        &()
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.size = (width, height);
        self.log.borrow_mut().push(Event::Size(width, height));
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
        self.log.borrow_mut().push(Event::PixelRatio(ratio));
    }

    fn prepare(&mut self, mesh: &Mesh) -> Result<()> {
        if self.fail_prepare.get() {
            return Err(SketchError::ShaderCompile("0:1: syntax error".into()));
        }
        self.log.borrow_mut().push(Event::Prepare(mesh.id));
        Ok(())
    }

    fn draw(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<()> {
        if self.fail_draws.get() {
            return Err(SketchError::ContextLost);
        }
        for mesh in scene.meshes() {
            let uniforms = &mesh.material.uniforms;
            self.log.borrow_mut().push(Event::Draw(DrawRecord {
                time: uniforms.float(U_TIME),
                progress: uniforms.float(U_PROGRESS),
                rotation_x: mesh.rotation.x,
                rotation_y: mesh.rotation.y,
                aspect: camera.aspect,
                fov: camera.fov,
            }));
        }
        Ok(())
    }

    fn release(&mut self) {
        self.log.borrow_mut().push(Event::Release);
    }
}

/// Scheduler the test fires by hand.
#[derive(Default)]
pub struct ManualScheduler {
    pub pending: Rc<Cell<u32>>,
    pub requested: Rc<Cell<u32>>,
    pub cancelled: Rc<Cell<u32>>,
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self) -> Result<()> {
        self.pending.set(self.pending.get() + 1);
        self.requested.set(self.requested.get() + 1);
        Ok(())
    }

    fn cancel(&mut self) {
        self.pending.set(0);
        self.cancelled.set(self.cancelled.get() + 1);
    }
}

pub struct Harness {
    pub size: Rc<Cell<Viewport>>,
    pub log: Log,
    pub fail_draws: Rc<Cell<bool>>,
    pub fail_prepare: Rc<Cell<bool>>,
}

impl Harness {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Rc::new(Cell::new(Viewport::new(width, height))),
            log: Rc::new(RefCell::new(Vec::new())),
            fail_draws: Rc::new(Cell::new(false)),
            fail_prepare: Rc::new(Cell::new(false)),
        }
    }

    pub fn container(&self) -> FakeContainer {
        FakeContainer {
            size: self.size.clone(),
            log: self.log.clone(),
        }
    }

    pub fn surface(&self) -> RecordingSurface {
        RecordingSurface {
            log: self.log.clone(),
            size: (0.0, 0.0),
            pixel_ratio: 1.0,
            fail_draws: self.fail_draws.clone(),
            fail_prepare: self.fail_prepare.clone(),
        }
    }

    pub fn draws(&self) -> Vec<DrawRecord> {
        self.log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Draw(d) => Some(d.clone()),
                _ => None,
            })
            .collect()
    }
}

pub fn count(log: &Log, event: &Event) -> usize {
    log.borrow().iter().filter(|e| *e == event).count()
}

pub fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}
