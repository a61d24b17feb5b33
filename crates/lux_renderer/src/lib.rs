//! Lux renderer - recursive Whitted-style CPU ray tracing
//!
//! Traces primary rays through a square image window, finds the closest
//! primitive hit and shades it with the Phong model. Spherical area lights
//! give soft shadows; mirrors and transparent objects spawn reflected and
//! refracted rays up to a fixed depth.

mod bucket;
mod camera;
mod cone;
mod cube;
mod hittable;
mod paraboloid;
mod plane;
mod renderer;
mod sampling;
mod shading;
mod sphere;

pub use bucket::{
    generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::{Camera, Subsample, SUPERSAMPLE_RADIUS};
pub use hittable::{find_first_hit, HitRecord, Hittable, LocalHit};
pub use plane::PLANE_NORMAL;
pub use renderer::{
    color_to_rgb, quantize, render, render_pixel, ImageBuffer, RenderConfig, RenderError,
    RenderResult,
};
pub use sampling::{gaussian, gaussian_kernel, gen_f32, random_in_sphere};
pub use shading::{clamp_color, reflect, refract, shade, trace_ray, SOFT_SHADOW_SAMPLES};

/// Re-export the math and scene types the renderer API is expressed in
pub use lux_core::{Color, Scene, SceneObject, View};
pub use lux_math::{Interval, Ray, Vec3};
