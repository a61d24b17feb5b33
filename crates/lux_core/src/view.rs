//! Camera view: eye position, orthonormal basis, image-plane window and the
//! camera/world conversion matrices.

use lux_math::{Mat3, Mat4, Vec3};
use thiserror::Error;

/// Errors from building a view.
#[derive(Error, Debug, PartialEq)]
pub enum ViewError {
    #[error("Gaze vector has zero length")]
    ZeroGaze,

    #[error("Up vector is parallel to the gaze direction")]
    DegenerateUp,

    #[error("Image-plane window size must be positive, got {0}")]
    InvalidWindow(f32),
}

/// Camera basis and image-plane window.
///
/// Camera space has `u` pointing right, `v` up and `w` back along the gaze.
/// The image plane sits at z = `focal_length` in camera space (negative
/// values put it in front of the eye) and spans `size` units starting at
/// (`left`, `top`).
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    /// Eye position (world)
    pub eye: Vec3,
    /// Right
    pub u: Vec3,
    /// Up
    pub v: Vec3,
    /// Backwards along the gaze
    pub w: Vec3,
    pub focal_length: f32,
    /// Left edge of the window in camera coordinates
    pub left: f32,
    /// Top edge of the window in camera coordinates
    pub top: f32,
    /// Window side length in distance units (not pixels)
    pub size: f32,

    camera_to_world: Mat4,
    world_to_camera: Mat4,
}

impl View {
    /// Set up a view from eye point, gaze direction and up vector.
    pub fn new(
        eye: Vec3,
        gaze: Vec3,
        up: Vec3,
        focal_length: f32,
        left: f32,
        top: f32,
        size: f32,
    ) -> Result<Self, ViewError> {
        if !(size > 0.0) {
            return Err(ViewError::InvalidWindow(size));
        }

        let w = (-gaze).try_normalize().ok_or(ViewError::ZeroGaze)?;
        let u = w.cross(up).try_normalize().ok_or(ViewError::DegenerateUp)?;
        let v = u.cross(w);

        let camera_to_world = Mat4::from_cols(
            u.extend(0.0),
            v.extend(0.0),
            w.extend(0.0),
            eye.extend(1.0),
        );

        // Orthonormal basis: the inverse rotation is the transpose
        let rotation = Mat3::from_cols(u, v, w).transpose();
        let world_to_camera = Mat4::from_cols(
            rotation.x_axis.extend(0.0),
            rotation.y_axis.extend(0.0),
            rotation.z_axis.extend(0.0),
            Vec3::new(-u.dot(eye), -v.dot(eye), -w.dot(eye)).extend(1.0),
        );

        Ok(Self {
            eye,
            u,
            v,
            w,
            focal_length,
            left,
            top,
            size,
            camera_to_world,
            world_to_camera,
        })
    }

    /// Camera-to-world matrix.
    pub fn camera_to_world(&self) -> Mat4 {
        self.camera_to_world
    }

    /// World-to-camera matrix.
    pub fn world_to_camera(&self) -> Mat4 {
        self.world_to_camera
    }

    /// Per-pixel step along the window for a square image of `resolution`
    /// pixels: (du, dv). `dv` is negative since image rows grow downward
    /// while camera y grows upward.
    pub fn pixel_delta(&self, resolution: u32) -> (f32, f32) {
        let steps = resolution.saturating_sub(1).max(1) as f32;
        let du = self.size / steps;
        (du, -du)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_view() -> View {
        View::new(
            Vec3::new(0.0, 0.0, -6.0),
            Vec3::new(0.0, -0.1, 1.0),
            Vec3::Y,
            -2.0,
            -2.0,
            2.0,
            4.0,
        )
        .unwrap()
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let view = default_view();

        for axis in [view.u, view.v, view.w] {
            assert!((axis.length() - 1.0).abs() < 1e-5);
        }
        assert!(view.u.dot(view.v).abs() < 1e-5);
        assert!(view.u.dot(view.w).abs() < 1e-5);
        assert!(view.v.dot(view.w).abs() < 1e-5);

        // w points back along the gaze
        assert!(view.w.dot(Vec3::new(0.0, -0.1, 1.0)) < 0.0);
    }

    #[test]
    fn test_camera_matrices_are_inverses() {
        let view = default_view();
        let product = view.camera_to_world() * view.world_to_camera();
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn test_camera_origin_maps_to_eye() {
        let view = default_view();
        let eye = view.camera_to_world().transform_point3(Vec3::ZERO);
        assert!((eye - view.eye).length() < 1e-5);
    }

    #[test]
    fn test_pixel_delta() {
        let view = default_view();
        let (du, dv) = view.pixel_delta(5);

        assert!((du - 1.0).abs() < 1e-6);
        assert!((dv + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_inputs() {
        let err = View::new(Vec3::ZERO, Vec3::ZERO, Vec3::Y, -1.0, -1.0, 1.0, 2.0);
        assert_eq!(err.unwrap_err(), ViewError::ZeroGaze);

        let err = View::new(Vec3::ZERO, Vec3::Y, Vec3::Y, -1.0, -1.0, 1.0, 2.0);
        assert_eq!(err.unwrap_err(), ViewError::DegenerateUp);

        let err = View::new(Vec3::ZERO, Vec3::Z, Vec3::Y, -1.0, -1.0, 1.0, 0.0);
        assert_eq!(err.unwrap_err(), ViewError::InvalidWindow(0.0));
    }
}
