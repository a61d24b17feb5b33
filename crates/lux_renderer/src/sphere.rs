//! Unit sphere primitive.

use lux_math::{Ray, Vec2, Vec3};
use std::f32::consts::PI;

use crate::hittable::{nearest_root, LocalHit};

/// Intersect a local-frame ray with the unit sphere at the origin.
pub fn intersect(ray: &Ray) -> Option<LocalHit> {
    let origin = ray.origin();
    let direction = ray.direction();

    let a = direction.length_squared();
    let b = 2.0 * origin.dot(direction);
    let c = origin.length_squared() - 1.0;

    let t = nearest_root(a, b, c)?;
    let point = ray.at(t);

    Some(LocalHit::facing(ray, t, point, point, sphere_uv(point)))
}

/// Get the UV coordinates for a point on the sphere.
fn sphere_uv(p: Vec3) -> Vec2 {
    // theta: angle down from +Y
    // phi: angle around Y measured from +Z
    let radius = p.length();
    if radius == 0.0 {
        return Vec2::ZERO;
    }

    let theta = (p.y / radius).clamp(-1.0, 1.0).acos();
    let phi = p.x.atan2(p.z);

    Vec2::new(0.5 + phi / (2.0 * PI), 1.0 - theta / PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let hit = intersect(&ray).unwrap();

        assert!((hit.t - 4.0).abs() < 1e-5); // Should hit at t=4
        assert!((hit.point - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!(hit.front_face);
    }

    #[test]
    fn test_sphere_miss() {
        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(intersect(&ray).is_none());

        // Sphere behind the origin
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let hit = intersect(&ray).unwrap();

        assert!((hit.t - 1.0).abs() < 1e-5);
        assert!(!hit.front_face);
        // Normal opposes the ray
        assert!(hit.normal.dot(ray.direction()) < 0.0);
    }

    #[test]
    fn test_sphere_uv() {
        let top = sphere_uv(Vec3::Y);
        assert!((top.y - 1.0).abs() < 1e-5);

        let bottom = sphere_uv(-Vec3::Y);
        assert!(bottom.y.abs() < 1e-5);

        let front = sphere_uv(Vec3::Z);
        assert!((front - Vec2::new(0.5, 0.5)).length() < 1e-5);

        let side = sphere_uv(Vec3::X);
        assert!((side.x - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_tangent_ray() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, -5.0), Vec3::Z);
        let hit = intersect(&ray).unwrap();
        assert!((hit.t - 5.0).abs() < 1e-4);
    }
}
