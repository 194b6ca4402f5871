use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{HtmlCanvasElement, PointerEvent, WheelEvent};

use crate::controls::PointerInput;
use crate::error::Result;

const POINTER_EVENTS: [&str; 4] = ["pointerdown", "pointermove", "pointerup", "pointercancel"];

/// Pointer and wheel listeners on the canvas, removed on drop.
pub struct OrbitListeners {
    canvas: HtmlCanvasElement,
    on_pointer: Closure<dyn FnMut(PointerEvent)>,
    on_wheel: Closure<dyn FnMut(WheelEvent)>,
}

impl OrbitListeners {
    pub fn new<F>(canvas: &HtmlCanvasElement, on_input: F) -> Result<Self>
    where
        F: FnMut(PointerInput) + 'static,
    {
        let on_input = Rc::new(RefCell::new(on_input));

        let on_pointer = {
            let canvas = canvas.clone();
            let on_input = on_input.clone();
            Closure::wrap(Box::new(move |event: PointerEvent| {
                let (x, y) = (event.client_x() as f64, event.client_y() as f64);
                let input = match event.type_().as_str() {
                    "pointerdown" if event.button() == 0 => {
                        // keep receiving moves when the pointer leaves the canvas
                        if let Err(err) = canvas.set_pointer_capture(event.pointer_id()) {
                            log::debug!("pointer capture refused: {:?}", err);
                        }
                        PointerInput::Down { x, y }
                    }
                    "pointermove" => PointerInput::Move { x, y },
                    "pointerup" | "pointercancel" => PointerInput::Up,
                    _ => return,
                };
                if let Ok(mut on_input) = on_input.try_borrow_mut() {
                    let on_input = &mut *on_input;
                    on_input(input);
                }
            }) as Box<dyn FnMut(PointerEvent)>)
        };

        let on_wheel = Closure::wrap(Box::new(move |event: WheelEvent| {
            event.prevent_default();
            if let Ok(mut on_input) = on_input.try_borrow_mut() {
                let on_input = &mut *on_input;
                on_input(PointerInput::Wheel {
                    delta_y: event.delta_y(),
                });
            }
        }) as Box<dyn FnMut(WheelEvent)>);

        for name in POINTER_EVENTS {
            canvas.add_event_listener_with_callback(name, on_pointer.as_ref().unchecked_ref())?;
        }
        canvas.add_event_listener_with_callback("wheel", on_wheel.as_ref().unchecked_ref())?;
        // touch drags would otherwise scroll the page
        if let Err(err) = canvas.style().set_property("touch-action", "none") {
            log::warn!("failed to set touch-action: {:?}", err);
        }

        Ok(Self {
            canvas: canvas.clone(),
            on_pointer,
            on_wheel,
        })
    }
}

impl Drop for OrbitListeners {
    fn drop(&mut self) {
        let mut removed = POINTER_EVENTS.iter().try_for_each(|name| {
            self.canvas
                .remove_event_listener_with_callback(name, self.on_pointer.as_ref().unchecked_ref())
        });
        removed = removed.and_then(|_| {
            self.canvas
                .remove_event_listener_with_callback("wheel", self.on_wheel.as_ref().unchecked_ref())
        });
        if let Err(err) = removed {
            log::warn!("failed to remove orbit listeners: {:?}", err);
        }
    }
}
