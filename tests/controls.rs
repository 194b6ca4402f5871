mod common;

use common::{approx, Harness, ManualScheduler};
use glam::{Vec3, Vec4};
use plane_sketch::camera::{PerspectiveCamera, CAMERA_DISTANCE};
use plane_sketch::controls::ZOOM_STEP;
use plane_sketch::{PointerInput, Sketch, SketchConfig, SketchDriver, Viewport};

fn sketch(h: &Harness, config: SketchConfig) -> Sketch<common::FakeContainer, common::RecordingSurface> {
    Sketch::new(h.container(), h.surface(), config, None).unwrap()
}

fn drag(sketch: &mut Sketch<common::FakeContainer, common::RecordingSurface>, dx: f64, dy: f64) -> bool {
    sketch.handle_pointer(PointerInput::Down { x: 100.0, y: 100.0 });
    let moved = sketch.handle_pointer(PointerInput::Move {
        x: 100.0 + dx,
        y: 100.0 + dy,
    });
    sketch.handle_pointer(PointerInput::Up);
    moved
}

fn origin_ndc(camera: &PerspectiveCamera) -> (f32, f32) {
    let clip = camera.projection_matrix() * camera.view_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    (clip.x / clip.w, clip.y / clip.w)
}

#[test]
fn drag_moves_the_view_but_not_the_projection() {
    let h = Harness::new(800.0, 600.0);
    let mut sketch = sketch(&h, SketchConfig::default());
    let view_before = sketch.camera().view_matrix();
    let projection_before = sketch.camera().projection_matrix();
    let (aspect, fov) = (sketch.camera().aspect, sketch.camera().fov);

    assert!(drag(&mut sketch, 120.0, -45.0));

    let camera = sketch.camera();
    assert!(!camera.view_matrix().abs_diff_eq(view_before, 1e-3));
    assert_eq!(camera.projection_matrix(), projection_before);
    assert_eq!(camera.aspect, aspect);
    assert_eq!(camera.fov, fov);
}

#[test]
fn orbiting_keeps_distance_and_aim() {
    let h = Harness::new(800.0, 600.0);
    let mut sketch = sketch(&h, SketchConfig::default());

    drag(&mut sketch, 150.0, 0.0);

    let camera = sketch.camera();
    assert!(approx(camera.position.length() as f64, CAMERA_DISTANCE, 1e-3));
    assert!(camera.position.x.abs() > 1.0);
    let (x, y) = origin_ndc(camera);
    assert!(x.abs() < 1e-5 && y.abs() < 1e-5, "origin drifted to ({x}, {y})");
}

#[test]
fn full_height_drag_turns_once_around() {
    let h = Harness::new(800.0, 600.0);
    let mut sketch = sketch(&h, SketchConfig::default());
    let start = sketch.camera().position;

    drag(&mut sketch, 600.0, 0.0);

    let theta = sketch.controls().spherical().theta;
    assert!(approx(theta, -2.0 * std::f64::consts::PI, 1e-9));
    assert!(sketch.camera().position.abs_diff_eq(start, 1e-2));
}

#[test]
fn moves_after_release_are_ignored() {
    let h = Harness::new(800.0, 600.0);
    let mut sketch = sketch(&h, SketchConfig::default());
    drag(&mut sketch, 10.0, 0.0);
    let position = sketch.camera().position;

    assert!(!sketch.handle_pointer(PointerInput::Move { x: 400.0, y: 400.0 }));
    assert_eq!(sketch.camera().position, position);
    assert!(!sketch.controls().is_dragging());
}

#[test]
fn wheel_steps_along_the_radius() {
    let h = Harness::new(800.0, 600.0);
    let mut sketch = sketch(&h, SketchConfig::default());
    let fov = sketch.camera().fov;

    assert!(sketch.handle_pointer(PointerInput::Wheel { delta_y: -100.0 }));
    assert!(approx(sketch.controls().distance(), CAMERA_DISTANCE * ZOOM_STEP, 1e-9));
    assert!(approx(sketch.camera().position.z as f64, CAMERA_DISTANCE * ZOOM_STEP, 1e-3));

    sketch.handle_pointer(PointerInput::Wheel { delta_y: 100.0 });
    assert!(approx(sketch.controls().distance(), CAMERA_DISTANCE, 1e-9));
    assert_eq!(sketch.camera().fov, fov);
}

#[test]
fn resize_keeps_the_orbit_pose() {
    let h = Harness::new(800.0, 600.0);
    let mut sketch = sketch(&h, SketchConfig::default());
    drag(&mut sketch, 80.0, 30.0);
    let position = sketch.camera().position;

    h.size.set(Viewport::new(400.0, 300.0));
    sketch.resize();

    assert_eq!(sketch.camera().position, position);
    assert!(approx(sketch.camera().aspect, 400.0 / 300.0, 1e-12));
}

#[test]
fn disabled_controls_leave_the_camera_alone() {
    let h = Harness::new(800.0, 600.0);
    let config = SketchConfig {
        controls: false,
        ..SketchConfig::default()
    };
    let mut sketch = sketch(&h, config);

    assert!(!drag(&mut sketch, 120.0, 40.0));
    assert!(!sketch.handle_pointer(PointerInput::Wheel { delta_y: -1.0 }));
    assert_eq!(sketch.camera().position, Vec3::new(0.0, 0.0, 600.0));
}

#[test]
fn driver_forwards_pointer_input() {
    let h = Harness::new(800.0, 600.0);
    let mut driver = SketchDriver::new(sketch(&h, SketchConfig::default()), ManualScheduler::default());
    driver.start().unwrap();

    assert!(driver.handle_pointer(PointerInput::Wheel { delta_y: 3.0 }));
    driver.tick().unwrap();

    let draws = h.draws();
    assert_eq!(draws.len(), 1);
    assert!(approx(draws[0].aspect, 800.0 / 600.0, 1e-12));
    assert!(driver.sketch().camera().position.z > 600.0);
}
