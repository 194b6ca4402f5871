//! Couples a [`Sketch`] to a [`FrameLoop`].

use crate::controls::PointerInput;
use crate::error::Result;
use crate::frame_loop::{FrameLoop, LoopState, Scheduler};
use crate::sketch::{Container, Sketch, Surface};

pub struct SketchDriver<C, S, Sch>
where
    C: Container,
    S: Surface<Node = C::Node>,
{
    sketch: Sketch<C, S>,
    frame_loop: FrameLoop<Sch>,
}

impl<C, S, Sch> SketchDriver<C, S, Sch>
where
    C: Container,
    S: Surface<Node = C::Node>,
    Sch: Scheduler,
{
    pub fn new(sketch: Sketch<C, S>, scheduler: Sch) -> Self {
        Self {
            sketch,
            frame_loop: FrameLoop::new(scheduler),
        }
    }

    pub fn start(&mut self) -> Result<()> {
        self.frame_loop.start()
    }

    /// Renders one frame if a tick was pending. See [`FrameLoop::on_tick`].
    pub fn tick(&mut self) -> Result<bool> {
        let sketch = &mut self.sketch;
        let drawn = self.frame_loop.on_tick(|| sketch.render());
        if let Err(err) = &drawn {
            log::error!("frame {} failed, render loop halted: {}", self.frame_loop.frames() + 1, err);
        }
        drawn
    }

    pub fn resize(&mut self) {
        self.sketch.resize();
    }

    pub fn handle_pointer(&mut self, input: PointerInput) -> bool {
        self.sketch.handle_pointer(input)
    }

    pub fn stop(&mut self) {
        self.frame_loop.stop();
    }

    pub fn is_running(&self) -> bool {
        matches!(
            self.frame_loop.state(),
            LoopState::Scheduled | LoopState::Rendering
        )
    }

    pub fn state(&self) -> LoopState {
        self.frame_loop.state()
    }

    pub fn sketch(&self) -> &Sketch<C, S> {
        &self.sketch
    }

    pub fn sketch_mut(&mut self) -> &mut Sketch<C, S> {
        &mut self.sketch
    }

    pub fn scheduler(&self) -> &Sch {
        self.frame_loop.scheduler()
    }
}
