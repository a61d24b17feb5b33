//! Lux Core - Scene graph types for the Lux ray tracer.
//!
//! This crate provides:
//!
//! - **Scene graph types**: `Scene`, `SceneObject`, `Light`, `Material`, `Primitive`
//! - **View**: camera basis and camera/world matrices
//! - **Textures**: image loading, caching and bilinear sampling
//! - **Scene descriptions**: JSON scene files and scene loading
//!
//! # Example
//!
//! ```ignore
//! use lux_core::load_scene;
//!
//! // Load a JSON scene description
//! let loaded = load_scene("scene.json")?;
//! println!("Loaded {} objects, {} lights",
//!     loaded.scene.object_count(),
//!     loaded.scene.light_count());
//! ```

pub mod description;
pub mod scene;
pub mod texture;
pub mod view;

// Re-export commonly used types
pub use description::{load_scene, load_scene_from_str, LoadedScene, SceneError, SceneResult};
pub use scene::{Albedos, Color, Light, Material, Primitive, Scene, SceneObject};
pub use texture::{Texture, TextureCache, TextureError, TextureResult};
pub use view::{View, ViewError};
