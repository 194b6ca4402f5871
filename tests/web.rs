#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

use plane_sketch::SketchHandle;

wasm_bindgen_test_configure!(run_in_browser);

fn host_element(variant: &str) -> web_sys::HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let element = document
        .create_element("div")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    element
        .set_attribute("style", "width: 320px; height: 240px")
        .unwrap();
    element.set_attribute("data-variant", variant).unwrap();
    document.body().unwrap().append_child(&element).unwrap();
    element
}

async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .request_animation_frame(&resolve)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn fire_resize() {
    let event = web_sys::Event::new("resize").unwrap();
    web_sys::window().unwrap().dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn create_mounts_a_sized_canvas() {
    let container = host_element("basic");
    let mut handle = SketchHandle::create(container.clone(), JsValue::UNDEFINED).unwrap();

    let canvas = container
        .query_selector("canvas")
        .unwrap()
        .expect("canvas not mounted");
    let rect = canvas.get_bounding_client_rect();
    assert!(rect.width() > 0.0 && rect.height() > 0.0);
    assert!(handle.is_running());
    assert_eq!(handle.progress(), None);

    handle.dispose();
    assert!(!handle.is_running());
    assert!(container.query_selector("canvas").unwrap().is_none());
}

#[wasm_bindgen_test]
fn progress_variant_mounts_slider() {
    let container = host_element("progress");
    let mut handle = SketchHandle::create(container.clone(), JsValue::UNDEFINED).unwrap();

    let slider = container
        .query_selector("input[type=range]")
        .unwrap()
        .expect("slider not mounted")
        .dyn_into::<web_sys::HtmlInputElement>()
        .unwrap();
    assert_eq!(slider.step(), "0.001");

    handle.set_progress(0.42);
    assert_eq!(handle.progress(), Some(0.42));

    handle.dispose();
    assert!(container.query_selector("input").unwrap().is_none());
}

#[wasm_bindgen_test]
async fn dispose_stops_frames_and_resize_handling() {
    let container = host_element("basic");
    let mut handle = SketchHandle::create(container.clone(), JsValue::UNDEFINED).unwrap();
    let canvas = container
        .query_selector("canvas")
        .unwrap()
        .expect("canvas not mounted")
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();

    next_frame().await;
    next_frame().await;
    assert!(handle.time() > 0.0);

    container
        .set_attribute("style", "width: 200px; height: 150px")
        .unwrap();
    fire_resize();
    assert_eq!(canvas.style().get_property_value("width").unwrap(), "200px");

    handle.dispose();
    let frozen = handle.time();

    container
        .set_attribute("style", "width: 100px; height: 80px")
        .unwrap();
    fire_resize();
    next_frame().await;
    next_frame().await;

    assert_eq!(handle.time(), frozen);
    assert!(!handle.is_running());
    assert_eq!(canvas.style().get_property_value("width").unwrap(), "200px");
}
