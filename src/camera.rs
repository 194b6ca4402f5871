//! Perspective camera fitted to the viewport.
//!
//! The field of view is recomputed from the viewport height on every fit so
//! that one world unit at the mesh distance maps to one CSS pixel vertically.

use glam::{Mat4, Vec3};

use crate::frame::Viewport;

/// Distance from the camera to the mesh plane along +z.
pub const CAMERA_DISTANCE: f64 = 600.0;
pub const NEAR: f64 = 10.0;
pub const FAR: f64 = 1000.0;
/// Field of view used before the first fit, in degrees.
pub const INITIAL_FOV: f64 = 70.0;

/// Vertical fov (degrees) that shows exactly `height` units at [`CAMERA_DISTANCE`].
pub fn fov_for_height(height: f64) -> f64 {
    2.0 * (height / 2.0 / CAMERA_DISTANCE).atan() * 180.0 / std::f64::consts::PI
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(aspect: f64) -> Self {
        let mut camera = Self {
            fov: INITIAL_FOV,
            aspect,
            near: NEAR,
            far: FAR,
            position: Vec3::new(0.0, 0.0, CAMERA_DISTANCE as f32),
            target: Vec3::ZERO,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Sets aspect and fov from `viewport`, then recomputes the projection.
    pub fn fit(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
        self.fov = fov_for_height(viewport.height);
        self.update_projection_matrix();
    }

    /// Must be called after any change to fov, aspect, near or far.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh_gl(
            (self.fov as f32).to_radians(),
            self.aspect as f32,
            self.near as f32,
            self.far as f32,
        );
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// World-space height visible at distance `d` in front of the camera.
    pub fn visible_height_at(&self, d: f64) -> f64 {
        2.0 * d * (self.fov.to_radians() / 2.0).tan()
    }
}
