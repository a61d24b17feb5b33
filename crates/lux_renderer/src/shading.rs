//! Recursive Whitted-style shading.
//!
//! Local Phong illumination with soft shadows from spherical area lights,
//! plus mirror reflection and refraction spawned as secondary rays.

use lux_core::{Color, Scene};
use lux_math::{Interval, Ray, Vec3};
use rand::RngCore;

use crate::hittable::{find_first_hit, HitRecord};
use crate::renderer::RenderConfig;
use crate::sampling::random_in_sphere;

/// Shadow rays per light when antialiasing is enabled.
pub const SOFT_SHADOW_SAMPLES: u32 = 10;

/// Compute the color seen along a ray.
///
/// `depth` counts the bounces so far (0 for primary rays). Past
/// `config.max_depth` the ray contributes nothing. `source` is the object
/// the ray leaves from and is skipped during intersection.
pub fn trace_ray(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    source: Option<usize>,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    if depth > config.max_depth {
        return Color::ZERO;
    }

    match find_first_hit(scene, ray, source) {
        Some(hit) => shade(&hit, ray, scene, depth, config, rng),
        None => config.background,
    }
}

/// Color at a hit: local illumination plus reflected and refracted light.
pub fn shade(
    hit: &HitRecord,
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let material = &hit.object.material;
    let base = hit.object.surface_color(hit.uv.x, hit.uv.y);
    let direction = ray.direction().normalize();

    let mut color = Color::ZERO;

    if !material.is_mirror {
        color = local_illumination(hit, base, -direction, scene, config, rng);
        if color == Color::ONE {
            return color;
        }
    }

    if depth < config.max_depth {
        let reflection_weight = material.albedos.global * material.opacity;
        if reflection_weight > 0.0 {
            let reflected = Ray::new(hit.point, reflect(direction, hit.normal));
            let incoming = trace_ray(&reflected, scene, depth + 1, Some(hit.index), config, rng);
            color += incoming * base * reflection_weight;
        }

        if material.is_transparent() {
            // Total internal reflection leaves only the reflected term
            if let Some(refracted) = refract(
                direction,
                hit.normal,
                hit.front_face,
                material.refractive_index,
            ) {
                let refracted = Ray::new(hit.point, refracted);
                let incoming =
                    trace_ray(&refracted, scene, depth + 1, Some(hit.index), config, rng);
                color += incoming * base * (1.0 - material.opacity);
            }
        }
    }

    clamp_color(color)
}

/// Phong terms summed over all lights.
///
/// Ambient is always added. Diffuse and specular are averaged over a set
/// of shadow rays aimed at random points in each light's sphere; a sample
/// counts only if nothing blocks the segment between the hit and the
/// sampled point.
fn local_illumination(
    hit: &HitRecord,
    base: Color,
    to_eye: Vec3,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let material = &hit.object.material;
    let albedos = material.albedos;
    let normal = hit.normal;

    let samples = if config.antialiasing {
        SOFT_SHADOW_SAMPLES
    } else {
        1
    };

    let mut color = Color::ZERO;

    for light in &scene.lights {
        let light_color = light.color();
        let center = light.position();

        let to_light = (center - hit.point).normalize_or_zero();
        let mirrored = (2.0 * normal.dot(to_light) * normal - to_light).normalize_or_zero();

        let mut n_dot_l = normal.dot(to_light);
        if n_dot_l < 0.0 {
            n_dot_l = if hit.object.is_double_sided() { -n_dot_l } else { 0.0 };
        }
        let specular = mirrored.dot(to_eye).max(0.0).powf(material.shininess);

        color += albedos.ambient * light_color * base;

        let mut direct = Color::ZERO;
        for _ in 0..samples {
            let target = center + random_in_sphere(light.radius, rng);
            let shadow_ray = Ray::new(hit.point, target - hit.point);

            if is_lit(scene, &shadow_ray, hit.index) {
                direct += albedos.diffuse * light_color * base * n_dot_l;
                direct += albedos.specular * light_color * specular;
            }
        }
        color += direct / samples as f32;

        color = clamp_color(color);
        if color == Color::ONE {
            break;
        }
    }

    color
}

/// True if nothing blocks a shadow ray before it reaches its target.
///
/// The ray direction spans the whole segment, so only hits with t in
/// (0, 1) lie between the surface and the light sample.
fn is_lit(scene: &Scene, shadow_ray: &Ray, source: usize) -> bool {
    match find_first_hit(scene, shadow_ray, Some(source)) {
        Some(blocker) => !Interval::UNIT.surrounds(blocker.t),
        None => true,
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    (v - 2.0 * v.dot(n) * n).normalize()
}

/// Refract a direction through a surface with Snell's law.
///
/// `entering` selects the ratio: 1/`index` going into the object, `index`
/// coming out. The normal may face either way. Returns `None` on total
/// internal reflection.
pub fn refract(direction: Vec3, normal: Vec3, entering: bool, index: f32) -> Option<Vec3> {
    let d = direction.normalize();
    let n = if normal.dot(d) < 0.0 { normal } else { -normal };
    let eta = if entering { 1.0 / index } else { index };

    let cos_i = -n.dot(d);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }

    Some((eta * d + (eta * cos_i - k.sqrt()) * n).normalize())
}

/// Clamp each channel to [0, 1].
#[inline]
pub fn clamp_color(color: Color) -> Color {
    color.clamp(Color::ZERO, Color::ONE)
}
