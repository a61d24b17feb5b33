//! Axis-aligned box [-1, 1]³.

use lux_math::{Interval, Ray, Vec2, Vec3};

use crate::hittable::LocalHit;

/// Intersect a local-frame ray with the box.
///
/// Each axis contributes its nearest face crossing that lands inside the
/// face square; the overall nearest crossing wins.
pub fn intersect(ray: &Ray) -> Option<LocalHit> {
    let origin = ray.origin();
    let direction = ray.direction();

    let mut nearest: Option<(f32, usize)> = None;

    for axis in 0..3 {
        if direction[axis] == 0.0 {
            continue;
        }

        for face in [-1.0, 1.0] {
            let t = (face - origin[axis]) / direction[axis];
            if t <= 0.0 {
                continue;
            }

            let point = ray.at(t);
            let on_face = (0..3)
                .filter(|&other| other != axis)
                .all(|other| Interval::SYMMETRIC_UNIT.contains(point[other]));

            let closer = nearest.map_or(true, |(best, _)| t < best);
            if on_face && closer {
                nearest = Some((t, axis));
            }
        }
    }

    let (t, axis) = nearest?;
    let point = ray.at(t);

    let mut outward_normal = Vec3::ZERO;
    outward_normal[axis] = if point[axis] > 0.0 { 1.0 } else { -1.0 };

    Some(LocalHit::facing(ray, t, point, outward_normal, face_uv(point, axis)))
}

/// Planar UV on the face perpendicular to `axis`.
fn face_uv(p: Vec3, axis: usize) -> Vec2 {
    let (u, v) = match axis {
        0 => (p.z, p.y),
        1 => (p.x, p.z),
        _ => (p.x, p.y),
    };
    Vec2::new(u / 2.0 + 0.5, v / 2.0 + 0.5)
}
