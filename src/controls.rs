//! Orbit camera controls.
//!
//! Dragging turns the camera around a target point on a sphere and the wheel
//! moves it along the radius. Only the camera pose changes; aspect and fov
//! stay owned by the resize path.

use std::f64::consts::PI;

use glam::Vec3;

use crate::camera::{PerspectiveCamera, CAMERA_DISTANCE, FAR, NEAR};

/// Radius multiplier for one wheel step towards the target.
pub const ZOOM_STEP: f64 = 0.95;

// Keeps the polar angle off the poles so the up vector stays defined.
const POLAR_EPSILON: f64 = 1e-6;

/// Pointer activity in client (CSS pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// Primary button pressed.
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    /// Button released or pointer cancelled.
    Up,
    /// Wheel scrolled. Negative `delta_y` moves towards the target.
    Wheel { delta_y: f64 },
}

/// Camera offset from the target in spherical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f64,
    /// Polar angle from +y, radians.
    pub phi: f64,
    /// Azimuth around +y, measured from +z, radians.
    pub theta: f64,
}

impl Spherical {
    pub fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            (self.radius * sin_phi * self.theta.sin()) as f32,
            (self.radius * self.phi.cos()) as f32,
            (self.radius * sin_phi * self.theta.cos()) as f32,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub rotate_speed: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub enabled: bool,
    spherical: Spherical,
    drag: Option<(f64, f64)>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitControls {
    /// Starts on +z at [`CAMERA_DISTANCE`], looking at the origin.
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            rotate_speed: 1.0,
            min_distance: NEAR,
            max_distance: FAR,
            enabled: true,
            spherical: Spherical {
                radius: CAMERA_DISTANCE,
                phi: PI / 2.0,
                theta: 0.0,
            },
            drag: None,
        }
    }

    pub fn spherical(&self) -> Spherical {
        self.spherical
    }

    pub fn distance(&self) -> f64 {
        self.spherical.radius
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Feeds one pointer event and returns whether the pose changed.
    ///
    /// A drag spanning `viewport_height` pixels turns the camera a full circle.
    pub fn handle(&mut self, input: PointerInput, viewport_height: f64) -> bool {
        if !self.enabled {
            return false;
        }
        match input {
            PointerInput::Down { x, y } => {
                self.drag = Some((x, y));
                false
            }
            PointerInput::Move { x, y } => {
                let Some((last_x, last_y)) = self.drag.replace((x, y)) else {
                    self.drag = None;
                    return false;
                };
                if !(viewport_height > 0.0) {
                    return false;
                }
                let per_pixel = 2.0 * PI * self.rotate_speed / viewport_height;
                self.rotate((x - last_x) * per_pixel, (y - last_y) * per_pixel)
            }
            PointerInput::Up => {
                self.drag = None;
                false
            }
            PointerInput::Wheel { delta_y } => self.zoom(delta_y),
        }
    }

    /// Turns the camera left and up by the given angles in radians.
    pub fn rotate(&mut self, left: f64, up: f64) -> bool {
        let before = self.spherical;
        self.spherical.theta -= left;
        self.spherical.phi = (self.spherical.phi - up).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.spherical != before
    }

    /// One wheel step: scales the radius by [`ZOOM_STEP`] or its inverse.
    pub fn zoom(&mut self, delta_y: f64) -> bool {
        let factor = if delta_y < 0.0 {
            ZOOM_STEP
        } else if delta_y > 0.0 {
            1.0 / ZOOM_STEP
        } else {
            return false;
        };
        let before = self.spherical.radius;
        self.spherical.radius = (before * factor).clamp(self.min_distance, self.max_distance);
        self.spherical.radius != before
    }

    /// Places `camera` on the sphere and aims it at the target.
    pub fn update(&self, camera: &mut PerspectiveCamera) {
        camera.target = self.target;
        camera.position = self.target + self.spherical.to_offset();
    }
}
