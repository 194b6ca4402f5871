use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{HtmlElement, Node, Window};

use crate::error::{Result, SketchError};
use crate::frame::Viewport;
use crate::frame_loop::Scheduler;
use crate::sketch::Container;

/// Slot holding the animation-frame closure.
///
/// The closure needs a handle to itself to re-arm, so it is created first and
/// stored here afterwards.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| SketchError::Dom("no window".into()))
}

/// Host element whose layout box sizes the sketch.
pub struct DomContainer {
    element: HtmlElement,
    window: Window,
}

impl DomContainer {
    pub fn new(element: HtmlElement) -> Result<Self> {
        Ok(Self {
            element,
            window: window()?,
        })
    }
}

impl Container for DomContainer {
    type Node = Node;

    fn layout_size(&self) -> Viewport {
        Viewport::new(
            self.element.offset_width() as f64,
            self.element.offset_height() as f64,
        )
    }

    fn pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    fn append(&self, node: &Node) -> Result<()> {
        self.element.append_child(node)?;
        Ok(())
    }

    fn remove(&self, node: &Node) -> Result<()> {
        if self.element.contains(Some(node)) {
            self.element.remove_child(node)?;
        }
        Ok(())
    }
}

/// `requestAnimationFrame` backed scheduler.
///
/// Holds the callback weakly; the owning handle keeps it alive and drops it on
/// dispose.
pub struct AnimationFrameScheduler {
    window: Window,
    callback: Weak<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: Option<i32>,
}

impl AnimationFrameScheduler {
    pub fn new(callback: &FrameCallback) -> Result<Self> {
        Ok(Self {
            window: window()?,
            callback: Rc::downgrade(callback),
            pending: None,
        })
    }
}

impl Scheduler for AnimationFrameScheduler {
    fn schedule(&mut self) -> Result<()> {
        let slot = self
            .callback
            .upgrade()
            .ok_or_else(|| SketchError::Scheduler("frame callback dropped".into()))?;
        let slot = slot.borrow();
        let closure = slot
            .as_ref()
            .ok_or_else(|| SketchError::Scheduler("frame callback not installed".into()))?;
        let id = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())?;
        self.pending = Some(id);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame({}) failed: {:?}", id, err);
            }
        }
    }
}

/// Window `resize` subscription, removed on drop.
pub struct ResizeListener {
    window: Window,
    closure: Closure<dyn FnMut()>,
}

impl ResizeListener {
    pub fn new<F>(on_resize: F) -> Result<Self>
    where
        F: FnMut() + 'static,
    {
        let window = window()?;
        let closure = Closure::wrap(Box::new(on_resize) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        Ok(Self { window, closure })
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback("resize", self.closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove resize listener: {:?}", err);
        }
    }
}
