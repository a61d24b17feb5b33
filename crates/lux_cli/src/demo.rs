//! Built-in demo scene: a reflective floor, two ellipsoids, a mirror, a
//! refractive sphere and a glass lens under one soft area light.

use std::f32::consts::PI;

use lux_core::{Albedos, Color, Light, Material, Scene, SceneObject, View, ViewError};
use lux_math::{TransformOp, Vec3};

use TransformOp::{RotateX, RotateY, RotateZ, Scale, Translate};

/// Phong material from the classic parameter order:
/// ra, rd, rs, rg, colour, opacity, refraction index, shininess.
#[allow(clippy::too_many_arguments)]
fn phong(
    ra: f32,
    rd: f32,
    rs: f32,
    rg: f32,
    color: [f32; 3],
    opacity: f32,
    refractive_index: f32,
    shininess: f32,
) -> Material {
    Material::phong(
        Albedos::new(ra, rd, rs, rg),
        Color::from(color),
        opacity,
        refractive_index,
        shininess,
    )
}

pub fn demo_scene() -> Scene {
    let mut scene = Scene::new("demo");

    // Highly reflective cyan floor
    scene.add_object(
        SceneObject::plane(phong(0.1, 0.75, 0.05, 0.35, [0.55, 0.8, 0.75], 1.0, 1.0, 2.0))
            .with_name("floor")
            .with_ops([
                Scale(Vec3::new(16.0, 16.0, 1.0)),
                RotateZ(PI / 1.20),
                RotateX(PI / 2.25),
                Translate(Vec3::new(0.0, -3.0, 10.0)),
            ]),
    );

    scene.add_object(
        SceneObject::sphere(phong(0.05, 0.95, 0.35, 0.35, [0.5, 1.0, 0.83], 1.0, 1.0, 10.0))
            .with_name("opaque ellipsoid")
            .with_ops([
                Scale(Vec3::new(0.75, 0.5, 1.5)),
                RotateY(PI / 3.0),
                Translate(Vec3::new(-4.0, 1.1, 5.0)),
            ]),
    );

    scene.add_object(
        SceneObject::sphere(phong(0.05, 0.95, 0.95, 1.0, [0.8, 0.5, 0.3], 0.8, 1.52, 10.0))
            .with_name("transparent ellipsoid")
            .with_ops([
                Scale(Vec3::new(0.5, 2.0, 1.0)),
                RotateZ(PI / 1.5),
                Translate(Vec3::new(-4.5, -2.0, 1.5)),
            ]),
    );

    scene.add_object(
        SceneObject::plane(phong(0.05, 0.75, 0.05, 1.0, [1.0, 1.0, 1.0], 1.0, 1.0, 2.0).mirror())
            .with_name("mirror")
            .with_ops([
                Scale(Vec3::new(2.2, 1.1, 1.0)),
                RotateX(-PI / 12.0),
                RotateY(PI / 4.0),
                Translate(Vec3::new(2.0, 0.5, 2.8)),
            ]),
    );

    scene.add_object(
        SceneObject::sphere(phong(0.3, 0.95, 0.95, 1.0, [0.94, 0.5, 0.5], 1.0, 1.52, 10.0))
            .with_name("refractive sphere")
            .with_ops([Translate(Vec3::new(0.5, 1.7, 0.75))]),
    );

    scene.add_object(
        SceneObject::sphere(phong(0.1, 0.0, 0.95, 0.5, [0.94, 1.0, 0.5], 0.0, 1.42, 10.0))
            .with_name("lens")
            .with_ops([
                Scale(Vec3::new(1.0, 1.0, 0.5)),
                Translate(Vec3::new(-1.0, -3.0, 0.0)),
            ]),
    );

    scene.add_light(Light::new(
        Color::splat(0.95),
        3.0,
        [Translate(Vec3::new(0.0, 14.5, -9.5))],
    ));

    scene
}

/// Camera looking slightly down from z = -6 through a 4×4 window.
pub fn demo_view() -> Result<View, ViewError> {
    View::new(
        Vec3::new(0.0, 0.0, -6.0),
        Vec3::new(0.0, -0.1, 1.0).normalize(),
        Vec3::Y,
        -2.0,
        -2.0,
        2.0,
        4.0,
    )
}
