//! JSON scene descriptions and scene loading.
//!
//! A description lists objects (primitive kind, Phong material, optional
//! texture and an ordered list of transform operations), spherical lights
//! and the view. Loading validates the values, resolves textures relative to
//! the description file and builds a ready-to-render [`Scene`] and [`View`].
//!
//! ```json
//! {
//!   "view": { "eye": [0, 0, -6], "gaze": [0, -0.1, 1], "up": [0, 1, 0],
//!             "focal_length": -2, "left": -2, "top": 2, "size": 4 },
//!   "objects": [
//!     { "kind": "sphere", "albedos": [0.05, 0.95, 0.35, 0.35],
//!       "color": [1, 0.25, 0.25], "shininess": 10,
//!       "transforms": [ { "scale": [0.75, 0.5, 1.5] },
//!                       { "rotate_y": 1.047 },
//!                       { "translate": [-4, 1.1, 5] } ] }
//!   ],
//!   "lights": [ { "color": [0.95, 0.95, 0.95], "radius": 3,
//!                 "transforms": [ { "translate": [0, 14.5, -9.5] } ] } ]
//! }
//! ```

use std::path::Path;

use lux_math::{TransformOp, Vec3};
use serde::Deserialize;
use thiserror::Error;

use crate::scene::{Albedos, Color, Light, Material, Primitive, Scene, SceneObject};
use crate::texture::{TextureCache, TextureError};
use crate::view::{View, ViewError};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene description parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Invalid view: {0}")]
    View(#[from] ViewError),

    #[error("Invalid value for {field} of {owner}: {reason}")]
    InvalidValue {
        owner: String,
        field: &'static str,
        reason: String,
    },
}

/// Result type for loading operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// A scene together with the view it should be rendered from.
#[derive(Clone, Debug)]
pub struct LoadedScene {
    pub scene: Scene,
    pub view: View,
}

/// Top-level scene description file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    #[serde(default)]
    pub name: String,
    pub view: ViewDescription,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewDescription {
    pub eye: [f32; 3],
    pub gaze: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    pub focal_length: f32,
    pub left: f32,
    pub top: f32,
    pub size: f32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectDescription {
    pub kind: Primitive,
    #[serde(default)]
    pub name: Option<String>,
    /// ra, rd, rs, rg
    pub albedos: [f32; 4],
    pub color: [f32; 3],
    #[serde(default = "one")]
    pub opacity: f32,
    #[serde(default = "one")]
    pub refractive_index: f32,
    #[serde(default = "one")]
    pub shininess: f32,
    #[serde(default)]
    pub mirror: bool,
    /// Defaults to the primitive's own setting
    #[serde(default)]
    pub double_sided: Option<bool>,
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub transforms: Vec<TransformDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightDescription {
    pub color: [f32; 3],
    pub radius: f32,
    #[serde(default)]
    pub transforms: Vec<TransformDescription>,
}

/// One transform operation; angles are in radians.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformDescription {
    Scale([f32; 3]),
    RotateX(f32),
    RotateY(f32),
    RotateZ(f32),
    Translate([f32; 3]),
}

impl From<TransformDescription> for TransformOp {
    fn from(desc: TransformDescription) -> Self {
        match desc {
            TransformDescription::Scale(s) => TransformOp::Scale(Vec3::from(s)),
            TransformDescription::RotateX(theta) => TransformOp::RotateX(theta),
            TransformDescription::RotateY(theta) => TransformOp::RotateY(theta),
            TransformDescription::RotateZ(theta) => TransformOp::RotateZ(theta),
            TransformDescription::Translate(t) => TransformOp::Translate(Vec3::from(t)),
        }
    }
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn one() -> f32 {
    1.0
}

/// Load a scene description file.
///
/// Texture paths are resolved relative to the file's directory.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<LoadedScene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut loaded = load_scene_from_str(&content, base_dir)?;
    if loaded.scene.name.is_empty() {
        loaded.scene.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
    }

    Ok(loaded)
}

/// Load a scene description from a JSON string.
pub fn load_scene_from_str(json: &str, base_dir: impl AsRef<Path>) -> SceneResult<LoadedScene> {
    let description: SceneDescription = serde_json::from_str(json)?;
    description.build(&mut TextureCache::with_base_dir(base_dir.as_ref()))
}

impl SceneDescription {
    /// Validate the description and build the scene and view.
    pub fn build(&self, textures: &mut TextureCache) -> SceneResult<LoadedScene> {
        let view = self.view.build()?;
        let mut scene = Scene::new(self.name.clone());

        for (index, desc) in self.objects.iter().enumerate() {
            let object = desc.build(index, textures)?;
            log::debug!(
                "Object {} '{}': {}",
                index,
                object.name,
                object.primitive.name()
            );
            scene.add_object(object);
        }

        for (index, desc) in self.lights.iter().enumerate() {
            scene.add_light(desc.build(index)?);
        }

        log::info!(
            "Loaded scene '{}': {} objects, {} lights, {} textures",
            scene.name,
            scene.object_count(),
            scene.light_count(),
            textures.len()
        );

        Ok(LoadedScene { scene, view })
    }
}

impl ViewDescription {
    fn build(&self) -> SceneResult<View> {
        Ok(View::new(
            Vec3::from(self.eye),
            Vec3::from(self.gaze),
            Vec3::from(self.up),
            self.focal_length,
            self.left,
            self.top,
            self.size,
        )?)
    }
}

impl ObjectDescription {
    fn build(&self, index: usize, textures: &mut TextureCache) -> SceneResult<SceneObject> {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| format!("{}{}", self.kind.name(), index));

        let invalid = |field: &'static str, reason: String| SceneError::InvalidValue {
            owner: name.clone(),
            field,
            reason,
        };

        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(invalid("opacity", format!("{} is outside [0, 1]", self.opacity)));
        }
        if self.opacity < 1.0 && self.refractive_index <= 0.0 {
            return Err(invalid(
                "refractive_index",
                format!("{} must be positive for a transparent object", self.refractive_index),
            ));
        }
        if self.shininess < 0.0 {
            return Err(invalid("shininess", format!("{} is negative", self.shininess)));
        }

        let [ra, rd, rs, rg] = self.albedos;
        let mut material = Material::phong(
            Albedos::new(ra, rd, rs, rg),
            Color::from(self.color),
            self.opacity,
            self.refractive_index,
            self.shininess,
        );
        material.is_mirror = self.mirror;
        material.double_sided = self.double_sided;

        let mut object = SceneObject::new(self.kind, material)
            .with_name(name.clone())
            .with_ops(self.transforms.iter().copied().map(TransformOp::from));

        if let Some(path) = &self.texture {
            object = object.with_texture(textures.load(path)?);
        }

        Ok(object)
    }
}

impl LightDescription {
    fn build(&self, index: usize) -> SceneResult<Light> {
        if !(self.radius >= 0.0) {
            return Err(SceneError::InvalidValue {
                owner: format!("light{}", index),
                field: "radius",
                reason: format!("{} is negative", self.radius),
            });
        }

        Ok(Light::new(
            Color::from(self.color),
            self.radius,
            self.transforms.iter().copied().map(TransformOp::from),
        ))
    }
}
