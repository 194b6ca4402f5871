use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::controls::OrbitListeners;
use super::dom::{AnimationFrameScheduler, DomContainer, FrameCallback, ResizeListener};
use super::gui::ProgressSlider;
use super::render::WebGlSurface;
use crate::config::{SketchConfig, Variant};
use crate::driver::SketchDriver;
use crate::error::{Result, SketchError};
use crate::logging::{init_logging, LoggingConfig};
use crate::settings::{ProgressSettings, SettingsSource};
use crate::sketch::Sketch;

type WebDriver = SketchDriver<DomContainer, WebGlSurface, AnimationFrameScheduler>;

/// A running sketch mounted into a host element.
///
/// Dropping the handle (or calling `free()` from JavaScript) disposes it.
#[wasm_bindgen]
pub struct SketchHandle {
    driver: Rc<RefCell<WebDriver>>,
    frame_callback: FrameCallback,
    resize: Option<ResizeListener>,
    orbit: Option<OrbitListeners>,
    slider: Option<ProgressSlider>,
    settings: Option<Rc<ProgressSettings>>,
    disposed: bool,
}

#[wasm_bindgen]
impl SketchHandle {
    /// Mounts a sketch into `container` and starts its render loop.
    ///
    /// `options` may be `undefined` or an object with any of the keys
    /// `variant`, `wireframe`, `controls`, `texture`, `pixel-ratio`,
    /// `log-level`. Missing
    /// keys fall back to the container's `data-*` attributes.
    pub fn create(container: HtmlElement, options: JsValue) -> std::result::Result<SketchHandle, JsValue> {
        let config = SketchConfig::from_attributes(option_lookup(&container, &options))
            .map_err(SketchError::from)?;
        Ok(Self::build(container, config)?)
    }

    /// Stops the loop, removes listeners, frees GPU resources and detaches the
    /// canvas.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        match self.driver.try_borrow_mut() {
            Ok(mut driver) => {
                driver.stop();
                if let Err(err) = driver.sketch_mut().unmount() {
                    log::warn!("failed to detach canvas: {}", err);
                }
            }
            Err(_) => log::warn!("dispose called while a frame is in flight"),
        }
        self.resize.take();
        self.orbit.take();
        if let Some(slider) = self.slider.take() {
            slider.unmount();
        }
        self.frame_callback.borrow_mut().take();
        log::info!("sketch disposed");
    }

    #[wasm_bindgen(getter)]
    pub fn time(&self) -> f64 {
        self.driver.borrow().sketch().frame().time()
    }

    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.driver.borrow().is_running()
    }

    /// Current progress, or `undefined` for the basic variant.
    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> Option<f64> {
        self.settings.as_ref().map(|s| s.progress())
    }

    #[wasm_bindgen(js_name = setProgress)]
    pub fn set_progress(&self, value: f64) {
        if let Some(settings) = &self.settings {
            settings.set_progress(value);
        }
    }
}

impl SketchHandle {
    pub(crate) fn build(container: HtmlElement, config: SketchConfig) -> Result<Self> {
        init_logging(LoggingConfig {
            level: config.log_level,
        });

        let document = container
            .owner_document()
            .ok_or_else(|| SketchError::Dom("container has no owner document".into()))?;
        let settings =
            (config.variant == Variant::Progress).then(|| Rc::new(ProgressSettings::new(0.0)));
        let source = settings
            .clone()
            .map(|s| s as Rc<dyn SettingsSource>);

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = AnimationFrameScheduler::new(&frame_callback)?;
        let dom_container = DomContainer::new(container.clone())?;
        let surface = WebGlSurface::new(&document)?;
        // detaches itself again if scene setup fails
        let sketch = Sketch::new(dom_container, surface, config, source)?;
        let driver = Rc::new(RefCell::new(SketchDriver::new(sketch, scheduler)));

        {
            let driver = Rc::downgrade(&driver);
            *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                let Some(driver) = driver.upgrade() else {
                    return;
                };
                let Ok(mut driver) = driver.try_borrow_mut() else {
                    log::warn!("frame skipped: sketch busy");
                    return;
                };
                // failures are logged by the driver and halt the loop
                let _ = driver.tick();
            }) as Box<dyn FnMut()>));
        }

        // From here on a failure drops `handle`, which disposes whatever was
        // already mounted.
        let mut handle = Self {
            driver,
            frame_callback,
            resize: None,
            orbit: None,
            slider: None,
            settings,
            disposed: false,
        };

        handle.resize = Some({
            let driver = Rc::downgrade(&handle.driver);
            ResizeListener::new(move || {
                if let Some(driver) = driver.upgrade() {
                    match driver.try_borrow_mut() {
                        Ok(mut driver) => driver.resize(),
                        Err(_) => log::warn!("resize skipped: sketch busy"),
                    }
                }
            })?
        });

        handle.orbit = Some({
            let driver = Rc::downgrade(&handle.driver);
            let canvas = handle.driver.borrow().sketch().surface().canvas().clone();
            OrbitListeners::new(&canvas, move |input| {
                if let Some(driver) = driver.upgrade() {
                    match driver.try_borrow_mut() {
                        Ok(mut driver) => {
                            driver.handle_pointer(input);
                        }
                        Err(_) => log::warn!("pointer input skipped: sketch busy"),
                    }
                }
            })?
        });

        if let Some(settings) = &handle.settings {
            handle.slider = Some(ProgressSlider::mount(&document, &container, settings.clone())?);
        }

        handle.driver.borrow_mut().start()?;
        Ok(handle)
    }
}

impl Drop for SketchHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn option_lookup<'a>(
    container: &'a HtmlElement,
    options: &'a JsValue,
) -> impl Fn(&str) -> Option<String> + 'a {
    move |key: &str| {
        if options.is_object() {
            if let Ok(value) = js_sys::Reflect::get(options, &JsValue::from_str(key)) {
                if let Some(s) = value.as_string() {
                    return Some(s);
                }
                if let Some(b) = value.as_bool() {
                    return Some(b.to_string());
                }
                if let Some(n) = value.as_f64() {
                    return Some(n.to_string());
                }
            }
        }
        container.get_attribute(&format!("data-{}", key))
    }
}
