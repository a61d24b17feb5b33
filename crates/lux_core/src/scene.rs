//! Scene graph types for Lux.
//!
//! A scene is two disjoint collections: renderable objects (which also
//! occlude) and spherical area lights. Every object is one of a fixed set of
//! canonical primitives placed by its own transform.

use std::sync::Arc;

use lux_math::{Transform, TransformOp, Vec3};
use serde::Deserialize;

use crate::texture::Texture;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Phong albedos for the four illumination components.
///
/// These are independent weights and need not sum to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Albedos {
    /// Ambient (ra)
    pub ambient: f32,
    /// Diffuse (rd)
    pub diffuse: f32,
    /// Specular (rs)
    pub specular: f32,
    /// Global: reflection weight (rg)
    pub global: f32,
}

impl Albedos {
    pub fn new(ambient: f32, diffuse: f32, specular: f32, global: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            global,
        }
    }
}

/// Surface description for the Phong shading model.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Phong albedos
    pub albedos: Albedos,

    /// Base RGB colour, used when the object carries no texture
    pub color: Color,

    /// Opacity (1=opaque, below 1 the object refracts)
    pub opacity: f32,

    /// Index of refraction
    pub refractive_index: f32,

    /// Phong specular exponent
    pub shininess: f32,

    /// Mirrors skip local shading and only reflect
    pub is_mirror: bool,

    /// Set on the geometry of area lights
    pub is_light_source: bool,

    /// Light both sides of the surface; `None` uses the primitive's default
    pub double_sided: Option<bool>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            albedos: Albedos::new(0.1, 0.8, 0.1, 0.0),
            color: Color::new(0.5, 0.5, 0.5), // Grey default
            opacity: 1.0,
            refractive_index: 1.0,
            shininess: 10.0,
            is_mirror: false,
            is_light_source: false,
            double_sided: None,
        }
    }
}

impl Material {
    /// Create a default material with the given base colour.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Create a material from the classic parameter list:
    /// albedos, colour, opacity, refraction index and shininess.
    pub fn phong(
        albedos: Albedos,
        color: Color,
        opacity: f32,
        refractive_index: f32,
        shininess: f32,
    ) -> Self {
        Self {
            albedos,
            color,
            opacity,
            refractive_index,
            shininess,
            ..Default::default()
        }
    }

    /// Mark this material as a mirror.
    pub fn mirror(mut self) -> Self {
        self.is_mirror = true;
        self
    }

    /// Override two-sided lighting.
    pub fn with_double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = Some(double_sided);
        self
    }

    /// True if the surface lets light through.
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// Canonical primitive shapes, each defined in its own unit-scale local frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    /// Unit square [-1,1]² at z=0
    Plane,
    /// Unit sphere at the origin
    Sphere,
    /// x² + z² = y², for y in [-1, 0]
    Cone,
    /// x² + z² = -y, for y in [-1, 0]
    Paraboloid,
    /// Axis-aligned box [-1,1]³
    #[serde(alias = "box")]
    Cube,
}

impl Primitive {
    /// Whether surfaces of this kind are lit on both sides by default.
    pub fn default_double_sided(&self) -> bool {
        matches!(
            self,
            Primitive::Plane | Primitive::Cone | Primitive::Paraboloid
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Plane => "plane",
            Primitive::Sphere => "sphere",
            Primitive::Cone => "cone",
            Primitive::Paraboloid => "paraboloid",
            Primitive::Cube => "box",
        }
    }
}

/// A primitive instance with its material, placement and optional texture.
#[derive(Clone, Debug)]
pub struct SceneObject {
    /// Object name (for logging)
    pub name: String,

    /// Canonical shape
    pub primitive: Primitive,

    /// Surface properties
    pub material: Material,

    /// Local-to-world placement
    pub transform: Transform,

    /// Texture replacing the base colour (shared between objects)
    pub texture: Option<Arc<Texture>>,
}

impl SceneObject {
    /// Create an untransformed object.
    pub fn new(primitive: Primitive, material: Material) -> Self {
        Self {
            name: primitive.name().to_string(),
            primitive,
            material,
            transform: Transform::IDENTITY,
            texture: None,
        }
    }

    pub fn plane(material: Material) -> Self {
        Self::new(Primitive::Plane, material)
    }

    pub fn sphere(material: Material) -> Self {
        Self::new(Primitive::Sphere, material)
    }

    pub fn cone(material: Material) -> Self {
        Self::new(Primitive::Cone, material)
    }

    pub fn paraboloid(material: Material) -> Self {
        Self::new(Primitive::Paraboloid, material)
    }

    pub fn cube(material: Material) -> Self {
        Self::new(Primitive::Cube, material)
    }

    /// Set the object name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Apply a sequence of transform operations in order.
    pub fn with_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = TransformOp>,
    {
        for op in ops {
            self.transform.apply(op);
        }
        self
    }

    /// Attach a texture.
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Whether both sides of the surface are lit, falling back to the
    /// primitive's default when the material leaves it unset.
    pub fn is_double_sided(&self) -> bool {
        self.material
            .double_sided
            .unwrap_or_else(|| self.primitive.default_double_sided())
    }

    /// Surface colour at texture coordinates (u, v).
    pub fn surface_color(&self, u: f32, v: f32) -> Color {
        match &self.texture {
            Some(texture) => texture.sample(u, v),
            None => self.material.color,
        }
    }
}

/// A spherical area light.
///
/// The light is stored as an object (a unit sphere flagged as a light
/// source) so it shares the transform machinery; it is never part of the
/// occluder list.
#[derive(Clone, Debug)]
pub struct Light {
    /// Light geometry and colour (material colour is the emitted colour)
    pub object: SceneObject,

    /// Radius of the emission volume sampled for soft shadows
    pub radius: f32,
}

impl Light {
    /// Create a light of the given colour and emission radius.
    ///
    /// `ops` place the light; the radius only sizes the sampled volume, so a
    /// zero radius gives a point light with hard shadows.
    pub fn new<I>(color: Color, radius: f32, ops: I) -> Self
    where
        I: IntoIterator<Item = TransformOp>,
    {
        let mut material = Material::phong(Albedos::new(0.0, 0.0, 0.0, 0.0), color, 1.0, 0.0, 0.0);
        material.is_light_source = true;

        let object = SceneObject::sphere(material)
            .with_name("light")
            .with_ops(ops);

        Self { object, radius }
    }

    /// Create a light at a world position.
    pub fn at(position: Vec3, color: Color, radius: f32) -> Self {
        Self::new(color, radius, [TransformOp::Translate(position)])
    }

    /// Emitted colour.
    pub fn color(&self) -> Color {
        self.object.material.color
    }

    /// World-space centre of the emission volume.
    pub fn position(&self) -> Vec3 {
        self.object.transform.origin()
    }
}

/// A complete scene: occluding objects and light sources.
///
/// Objects keep insertion order; it only decides which of two equally
/// distant hits is reported.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Renderable, occluding objects
    pub objects: Vec<SceneObject>,

    /// Light sources
    pub lights: Vec<Light>,

    /// Scene name (usually from filename)
    pub name: String,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an object to the scene and return its index.
    pub fn add_object(&mut self, object: SceneObject) -> usize {
        let id = self.objects.len();
        self.objects.push(object);
        id
    }

    /// Add a light source to the scene.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Get an object by index.
    pub fn object(&self, id: usize) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    /// Get object count.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}
