use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::error::{Result, SketchError};
use crate::settings::{ProgressSettings, SettingsSource, PROGRESS_MAX, PROGRESS_MIN, PROGRESS_STEP};

/// `<input type="range">` writing into [`ProgressSettings`].
pub struct ProgressSlider {
    panel: HtmlElement,
    input: HtmlInputElement,
    on_input: Closure<dyn FnMut()>,
}

impl ProgressSlider {
    /// Builds the slider and appends it to `parent`.
    pub fn mount(
        document: &Document,
        parent: &HtmlElement,
        settings: Rc<ProgressSettings>,
    ) -> Result<Self> {
        let panel = document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SketchError::Dom("div is not an HtmlElement".into()))?;
        panel.set_class_name("sketch-gui");

        let label = document.create_element("label")?;
        label.set_text_content(Some("progress"));

        let input = document
            .create_element("input")?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| SketchError::Dom("input is not an HtmlInputElement".into()))?;
        input.set_type("range");
        input.set_min(&PROGRESS_MIN.to_string());
        input.set_max(&PROGRESS_MAX.to_string());
        input.set_step(&PROGRESS_STEP.to_string());
        input.set_value(&settings.progress().to_string());

        let on_input = {
            let input = input.clone();
            let settings = settings.clone();
            Closure::wrap(Box::new(move || {
                settings.set_progress(input.value_as_number());
                log::trace!("progress = {}", settings.progress());
            }) as Box<dyn FnMut()>)
        };
        input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;

        label.append_child(&input)?;
        panel.append_child(&label)?;
        parent.append_child(&panel)?;

        Ok(Self {
            panel,
            input,
            on_input,
        })
    }

    /// Detaches the slider and its listener.
    pub fn unmount(&self) {
        if let Err(err) = self
            .input
            .remove_event_listener_with_callback("input", self.on_input.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove slider listener: {:?}", err);
        }
        self.panel.remove();
    }
}
