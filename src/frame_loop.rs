//! Self re-arming frame loop over an injectable scheduler.
//!
//! The browser drives ticks through `requestAnimationFrame`; tests drive them
//! by hand. Either way exactly one body runs per scheduled tick, and the next
//! tick is requested only after the body has returned.

use crate::error::Result;

/// Requests a future call to the loop's tick handler.
pub trait Scheduler {
    /// Asks for one tick. Called once per rendered frame.
    fn schedule(&mut self) -> Result<()>;

    /// Drops any outstanding request.
    fn cancel(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Not started yet.
    Idle,
    /// Waiting for the next tick.
    Scheduled,
    /// Inside a tick body.
    Rendering,
    /// Stopped by the owner or by a failed frame. Terminal.
    Stopped,
}

#[derive(Debug)]
pub struct FrameLoop<S> {
    scheduler: S,
    state: LoopState,
    frames: u64,
}

impl<S: Scheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            state: LoopState::Idle,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Requests the first tick. No-op unless idle.
    pub fn start(&mut self) -> Result<()> {
        if self.state != LoopState::Idle {
            return Ok(());
        }
        self.scheduler.schedule()?;
        self.state = LoopState::Scheduled;
        Ok(())
    }

    /// Handles one tick. Returns `Ok(false)` when the tick was ignored.
    ///
    /// On error the loop stops and does not re-arm.
    pub fn on_tick<F>(&mut self, body: F) -> Result<bool>
    where
        F: FnOnce() -> Result<()>,
    {
        if self.state != LoopState::Scheduled {
            log::trace!("ignoring tick in state {:?}", self.state);
            return Ok(false);
        }

        self.state = LoopState::Rendering;
        if let Err(err) = body() {
            self.state = LoopState::Stopped;
            return Err(err);
        }
        self.frames += 1;

        if let Err(err) = self.scheduler.schedule() {
            self.state = LoopState::Stopped;
            return Err(err);
        }
        self.state = LoopState::Scheduled;
        Ok(true)
    }

    /// Cancels the pending tick and stops for good.
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.scheduler.cancel();
        self.state = LoopState::Stopped;
        log::debug!("frame loop stopped after {} frames", self.frames);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SketchError;

    #[derive(Default)]
    struct Counting {
        scheduled: u32,
        cancelled: u32,
    }

    impl Scheduler for Counting {
        fn schedule(&mut self) -> Result<()> {
            self.scheduled += 1;
            Ok(())
        }

        fn cancel(&mut self) {
            self.cancelled += 1;
        }
    }

    #[test]
    fn ticks_before_start_are_ignored() {
        let mut fl = FrameLoop::new(Counting::default());
        let mut ran = false;
        assert_eq!(
            fl.on_tick(|| {
                ran = true;
                Ok(())
            }),
            Ok(false)
        );
        assert!(!ran);
        assert_eq!(fl.scheduler().scheduled, 0);
    }

    #[test]
    fn each_tick_rearms_once() {
        let mut fl = FrameLoop::new(Counting::default());
        fl.start().unwrap();
        fl.start().unwrap();
        assert_eq!(fl.scheduler().scheduled, 1);
        for _ in 0..3 {
            assert_eq!(fl.on_tick(|| Ok(())), Ok(true));
        }
        assert_eq!(fl.frames(), 3);
        assert_eq!(fl.scheduler().scheduled, 4);
        assert_eq!(fl.state(), LoopState::Scheduled);
    }

    #[test]
    fn failed_frame_stops_the_loop() {
        let mut fl = FrameLoop::new(Counting::default());
        fl.start().unwrap();
        assert_eq!(fl.on_tick(|| Err(SketchError::ContextLost)), Err(SketchError::ContextLost));
        assert_eq!(fl.state(), LoopState::Stopped);
        assert_eq!(fl.scheduler().scheduled, 1);
        assert_eq!(fl.on_tick(|| Ok(())), Ok(false));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut fl = FrameLoop::new(Counting::default());
        fl.start().unwrap();
        fl.stop();
        fl.stop();
        assert_eq!(fl.scheduler().cancelled, 1);
        assert_eq!(fl.state(), LoopState::Stopped);
    }
}
