//! Open cone x² + z² = y², cut to y in [-1, 0].

use lux_math::{Ray, Vec2, Vec3};
use std::f32::consts::PI;

use crate::hittable::{nearest_root, LocalHit};

/// Intersect a local-frame ray with the unit cone (apex at the origin,
/// opening downward).
pub fn intersect(ray: &Ray) -> Option<LocalHit> {
    let p = ray.origin();
    let d = ray.direction();

    let a = d.x * d.x - d.y * d.y + d.z * d.z;
    let b = 2.0 * (p.x * d.x - p.y * d.y + p.z * d.z);
    let c = p.x * p.x - p.y * p.y + p.z * p.z;

    let t = nearest_root(a, b, c)?;
    let point = ray.at(t);

    // Only the lower nappe, one unit deep
    if !(-1.0..=0.0).contains(&point.y) {
        return None;
    }

    let normal = Vec3::new(point.x, -point.y, point.z);
    Some(LocalHit::facing(ray, t, point, normal, revolution_uv(point)))
}

/// UV for surfaces of revolution around Y spanning y in [-1, 0].
pub(crate) fn revolution_uv(p: Vec3) -> Vec2 {
    Vec2::new(0.5 + p.x.atan2(p.z) / (2.0 * PI), 1.0 + p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cone_hit() {
        let ray = Ray::new(Vec3::new(0.0, -0.5, -5.0), Vec3::Z);
        let hit = intersect(&ray).unwrap();

        assert!((hit.t - 4.5).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.0, -0.5, -0.5)).length() < 1e-5);
        assert!(hit.front_face);
        assert!(hit.normal.dot(ray.direction()) < 0.0);
        assert!((hit.uv.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_cone_miss_outside_height() {
        // Upper nappe is cut away
        let ray = Ray::new(Vec3::new(0.0, 0.5, -5.0), Vec3::Z);
        assert!(intersect(&ray).is_none());

        // Below the base
        let ray = Ray::new(Vec3::new(0.0, -1.5, -5.0), Vec3::Z);
        assert!(intersect(&ray).is_none());
    }

    #[test]
    fn test_far_root_not_retried() {
        // Roots at y = 0.5 (upper nappe, cut away) and y = -0.5 (valid);
        // only the nearer one is tested against the height bounds.
        let ray = Ray::new(Vec3::new(0.5, 2.0, 0.0), -Vec3::Y);
        assert!(intersect(&ray).is_none());

        // Starting past the cut, the valid root is the nearest one
        let ray = Ray::new(Vec3::new(0.5, 0.0, 0.0), -Vec3::Y);
        let hit = intersect(&ray).unwrap();
        assert!((hit.point - Vec3::new(0.5, -0.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_cone_from_inside() {
        let ray = Ray::new(Vec3::new(0.0, -0.5, 0.0), Vec3::X);
        let hit = intersect(&ray).unwrap();

        assert!((hit.t - 0.5).abs() < 1e-5);
        assert!(!hit.front_face);
        assert!(hit.normal.dot(ray.direction()) < 0.0);
    }

    #[test]
    fn test_revolution_uv() {
        let uv = revolution_uv(Vec3::new(0.0, -1.0, 1.0));
        assert!((uv - Vec2::new(0.5, 0.0)).length() < 1e-5);

        let uv = revolution_uv(Vec3::new(1.0, 0.0, 0.0));
        assert!((uv - Vec2::new(0.75, 1.0)).length() < 1e-5);
    }
}
