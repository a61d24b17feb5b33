use crate::{Mat4, Vec3};

/// A ray in 3D space with an origin point and a direction vector.
///
/// Rays live in world space at rest. Intersection routines move a copy into
/// an object's local frame with [`Ray::transformed`]; the direction is not
/// renormalized by the transform, so the ray parameter `t` means the same
/// point in both frames.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Apply an affine matrix to the ray.
    ///
    /// The origin is transformed as a point (w=1) and the direction as a
    /// vector (w=0).
    #[inline]
    pub fn transformed(&self, matrix: &Mat4) -> Ray {
        Ray {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_transformed_keeps_direction_free_of_translation() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 2.0));
        let m = Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0));
        let moved = ray.transformed(&m);

        assert_eq!(moved.origin, Vec3::new(1.0, 5.0, 0.0));
        assert_eq!(moved.direction, Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_ray_parameter_survives_transform() {
        // r(t) maps to the same world point whichever frame it is evaluated in
        let m = Mat4::from_scale(Vec3::new(2.0, 3.0, 0.5)) * Mat4::from_rotation_y(0.7);
        let ray = Ray::new(Vec3::new(0.3, -1.0, 4.0), Vec3::new(1.0, 2.0, -0.5));
        let t = 1.75;

        let local = ray.transformed(&m.inverse());
        let back = m.transform_point3(local.at(t));
        assert!((back - ray.at(t)).length() < 1e-4);
    }
}
