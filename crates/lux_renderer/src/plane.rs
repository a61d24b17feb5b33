//! Unit square in the local z = 0 plane.

use lux_math::{Interval, Ray, Vec2, Vec3};

use crate::hittable::LocalHit;

/// Local normal of the plane. It is not flipped toward the ray; two-sided
/// lighting handles the back face.
pub const PLANE_NORMAL: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Intersect a local-frame ray with the square [-1, 1]² at z = 0.
pub fn intersect(ray: &Ray) -> Option<LocalHit> {
    let origin = ray.origin();
    let direction = ray.direction();

    // Parallel to the plane
    if direction.z == 0.0 {
        return None;
    }

    let t = -origin.z / direction.z;
    if t <= 0.0 {
        return None;
    }

    let point = ray.at(t);
    let square = Interval::SYMMETRIC_UNIT;
    if !square.contains(point.x) || !square.contains(point.y) {
        return None;
    }

    Some(LocalHit {
        t,
        point,
        normal: PLANE_NORMAL,
        uv: Vec2::new((point.x + 1.0) / 2.0, (point.y + 1.0) / 2.0),
        front_face: direction.dot(PLANE_NORMAL) < 0.0,
    })
}
