//! A shader-driven plane rendered in the browser.
//!
//! The render loop, resize contract and scene setup live in plain Rust
//! modules that compile on every target; the `wasm` module binds them to the
//! DOM and WebGL2 when targeting wasm32.

pub mod camera;
pub mod config;
pub mod controls;
pub mod driver;
pub mod error;
pub mod frame;
pub mod frame_loop;
pub mod geometry;
pub mod logging;
pub mod scene;
pub mod settings;
pub mod sketch;
pub mod uniforms;

pub use config::{SketchConfig, Variant};
pub use controls::{OrbitControls, PointerInput};
pub use driver::SketchDriver;
pub use error::{ConfigError, Result, SketchError};
pub use frame::{FrameState, Rotation, Viewport};
pub use frame_loop::{FrameLoop, LoopState, Scheduler};
pub use settings::{ProgressSettings, SettingsSource};
pub use sketch::{Container, Sketch, Surface};

#[cfg(target_arch = "wasm32")]
pub use wasm::SketchHandle;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::config::SketchConfig;

    mod controls;
    mod dom;
    mod gui;
    mod handle;
    mod render;
    mod texture;

    pub use handle::SketchHandle;

    thread_local! {
        static ACTIVE: RefCell<Option<SketchHandle>> = const { RefCell::new(None) };
    }

    /// Mounts a sketch into `#container` if the page has one.
    ///
    /// Pages that embed the sketch elsewhere call `SketchHandle.create`
    /// themselves.
    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let Some(element) = document.get_element_by_id("container") else {
            return Ok(());
        };
        let container = element.dyn_into::<web_sys::HtmlElement>()?;

        let config = SketchConfig::from_attributes(|key| {
            container.get_attribute(&format!("data-{}", key))
        })
        .map_err(crate::error::SketchError::from)?;
        let handle = SketchHandle::build(container, config)?;
        ACTIVE.with(|active| *active.borrow_mut() = Some(handle));
        Ok(())
    }
}
