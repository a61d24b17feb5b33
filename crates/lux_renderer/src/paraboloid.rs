//! Paraboloid x² + z² = -y, cut to y in [-1, 0].

use lux_math::{Ray, Vec3};

use crate::cone::revolution_uv;
use crate::hittable::{nearest_root, LocalHit};

/// Intersect a local-frame ray with the unit paraboloid (vertex at the
/// origin, opening downward).
///
/// Rays with no x or z motion have no quadratic term and are reported as
/// misses.
pub fn intersect(ray: &Ray) -> Option<LocalHit> {
    let p = ray.origin();
    let d = ray.direction();

    let a = d.x * d.x + d.z * d.z;
    let b = 2.0 * (p.x * d.x + p.z * d.z) + d.y;
    let c = p.x * p.x + p.z * p.z + p.y;

    let t = nearest_root(a, b, c)?;
    let point = ray.at(t);

    if !(-1.0..=0.0).contains(&point.y) {
        return None;
    }

    let normal = Vec3::new(2.0 * point.x, 1.0, 2.0 * point.z);
    Some(LocalHit::facing(ray, t, point, normal, revolution_uv(point)))
}
