//! Hittable trait, hit records and the closest-hit scene query.

use lux_core::{Primitive, Scene, SceneObject};
use lux_math::{Ray, Vec2, Vec3};

use crate::{cone, cube, paraboloid, plane, sphere};

/// Intersection of a ray with a primitive, in the primitive's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalHit {
    /// Ray parameter at the hit; always positive
    pub t: f32,
    /// Local hit point
    pub point: Vec3,
    /// Local surface normal (not necessarily unit length)
    pub normal: Vec3,
    /// Surface coordinates in [0, 1]²
    pub uv: Vec2,
    /// False when the ray is leaving the solid through this surface
    pub front_face: bool,
}

impl LocalHit {
    /// Build a hit whose normal is flipped to oppose the ray.
    ///
    /// A normal pointing along the ray means the ray started inside the
    /// solid; that is recorded as `front_face = false`.
    pub fn facing(ray: &Ray, t: f32, point: Vec3, outward_normal: Vec3, uv: Vec2) -> Self {
        let front_face = ray.direction().dot(outward_normal) <= 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            t,
            point,
            normal,
            uv,
            front_face,
        }
    }
}

/// Record of a ray-object intersection in world space.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal
    pub normal: Vec3,
    /// UV texture coordinates
    pub uv: Vec2,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// The object that was hit
    pub object: &'a SceneObject,
    /// Index of the object in the scene, used to exclude it from
    /// rays spawned at this hit
    pub index: usize,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Intersect a world-space ray with this object.
    ///
    /// Returns the closest valid hit in front of the ray origin, expressed
    /// in the object's local frame. The caller's ray is never modified.
    fn hit_local(&self, ray: &Ray) -> Option<LocalHit>;
}

impl Hittable for SceneObject {
    fn hit_local(&self, ray: &Ray) -> Option<LocalHit> {
        let local = self.transform.ray_to_local(ray);

        match self.primitive {
            Primitive::Plane => plane::intersect(&local),
            Primitive::Sphere => sphere::intersect(&local),
            Primitive::Cone => cone::intersect(&local),
            Primitive::Paraboloid => paraboloid::intersect(&local),
            Primitive::Cube => cube::intersect(&local),
        }
    }
}

/// Find the closest object hit by a world-space ray.
///
/// Every object except `source` is tested. `source` is the object a
/// secondary ray starts on; skipping it avoids self-intersection from
/// rounding error. The smallest positive `t` wins and ties keep the object
/// found first. The winning local point and normal are moved to world
/// space, the normal via transpose(Tinv).
pub fn find_first_hit<'a>(
    scene: &'a Scene,
    ray: &Ray,
    source: Option<usize>,
) -> Option<HitRecord<'a>> {
    let mut closest: Option<(usize, LocalHit)> = None;

    for (index, object) in scene.objects.iter().enumerate() {
        if Some(index) == source {
            continue;
        }

        if let Some(hit) = object.hit_local(ray) {
            let closer = match &closest {
                Some((_, best)) => hit.t < best.t,
                None => true,
            };
            if hit.t > 0.0 && closer {
                closest = Some((index, hit));
            }
        }
    }

    closest.map(|(index, hit)| {
        let object = &scene.objects[index];
        HitRecord {
            t: hit.t,
            point: object.transform.point_to_world(hit.point),
            normal: object.transform.normal_to_world(hit.normal),
            uv: hit.uv,
            front_face: hit.front_face,
            object,
            index,
        }
    })
}

/// Solve `a·t² + b·t + c = 0` for the hit parameter of a quadric.
///
/// Takes the smaller root when it is positive, otherwise the larger one if
/// that is positive, so a ray starting inside the surface still finds its
/// exit. Returns `None` for a negative discriminant or a degenerate `a`.
pub(crate) fn nearest_root(a: f32, b: f32, c: f32) -> Option<f32> {
    if a == 0.0 {
        return None;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = if discriminant == 0.0 {
        -b / (2.0 * a)
    } else {
        let sqrtd = discriminant.sqrt();
        let t1 = (-b - sqrtd) / (2.0 * a);
        let t2 = (-b + sqrtd) / (2.0 * a);
        let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        if near > 0.0 {
            near
        } else {
            far
        }
    };

    (t > 0.0).then_some(t)
}
