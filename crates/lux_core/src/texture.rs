//! Texture loading and caching for object surfaces.
//!
//! Textures are decoded with the `image` crate into normalized float RGB and
//! sampled bilinearly at the surface coordinates reported by intersection.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lux_math::Vec3;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {0} has no pixels")]
    Empty(String),

    #[error("Pixel buffer holds {actual} samples, expected {expected} for {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with pixel data.
///
/// Stores pixels as RGB floats in [0, 1], row-major, first row at the top.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data, one [R, G, B] per pixel
    pub pixels: Vec<[f32; 3]>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<[f32; 3]>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        let path = path.into();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty(path));
        }

        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
            path,
        })
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Vec3) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![[color.x, color.y, color.z]],
            path: "<solid>".to_string(),
        }
    }

    /// Load a texture from an image file.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        load_texture_file(path.as_ref())
    }

    /// Sample the texture at UV coordinates (bilinear filtering).
    ///
    /// UV coordinates are clamped to [0, 1], with (0, 0) at bottom-left.
    pub fn sample(&self, u: f32, v: f32) -> Vec3 {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        // Convert to pixel coordinates
        let x = u * (self.width as f32 - 1.0);
        let y = (1.0 - v) * (self.height as f32 - 1.0); // Flip V for image coordinates

        // Bilinear interpolation
        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x.fract();
        let fy = y.fract();

        let p00 = Vec3::from(self.get_pixel(x0, y0));
        let p10 = Vec3::from(self.get_pixel(x1, y0));
        let p01 = Vec3::from(self.get_pixel(x0, y1));
        let p11 = Vec3::from(self.get_pixel(x1, y1));

        let top = p00.lerp(p10, fx);
        let bottom = p01.lerp(p11, fx);
        top.lerp(bottom, fy)
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> [f32; 3] {
        let idx = (y * self.width + x) as usize;
        self.pixels.get(idx).copied().unwrap_or([0.0, 0.0, 0.0])
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<[f32; 3]>()
    }
}

/// Cache for loaded textures.
///
/// Objects that name the same file share one decoded texture.
pub struct TextureCache {
    /// Cached textures by file path
    textures: HashMap<String, Arc<Texture>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load a texture from file, using cache if available.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<Texture>> {
        // Check cache first
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let full_path = self.resolve_path(path);
        let texture = Arc::new(load_texture_file(&full_path)?);

        self.textures.insert(path.to_string(), texture.clone());

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            path,
            texture.width,
            texture.height,
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a texture from a file path.
fn load_texture_file(path: &Path) -> TextureResult<Texture> {
    let display = path.to_string_lossy().to_string();

    let img = image::open(path).map_err(|source| TextureError::Load {
        path: display.clone(),
        source,
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    // Plain normalization: the renderer works in display space
    let pixels: Vec<[f32; 3]> = rgb
        .pixels()
        .map(|p| {
            [
                p[0] as f32 / 255.0,
                p[1] as f32 / 255.0,
                p[2] as f32 / 255.0,
            ]
        })
        .collect();

    Texture::new(width, height, pixels, display)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_2x2() -> Texture {
        // Top row: black, white. Bottom row: red, blue.
        Texture::new(
            2,
            2,
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 1.0, 1.0],
                [1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
            ],
            "checker",
        )
        .unwrap()
    }

    #[test]
    fn test_solid_color_texture() {
        let tex = Texture::solid_color(Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(tex.width, 1);
        assert_eq!(tex.height, 1);

        let sample = tex.sample(0.5, 0.5);
        assert!((sample.x - 1.0).abs() < 0.001);
        assert!((sample.y - 0.5).abs() < 0.001);
        assert!((sample.z - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_sample_corners() {
        let tex = checker_2x2();

        // (0, 0) is bottom-left, (1, 1) top-right
        assert!((tex.sample(0.0, 0.0) - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
        assert!((tex.sample(1.0, 0.0) - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert!((tex.sample(0.0, 1.0) - Vec3::ZERO).length() < 1e-5);
        assert!((tex.sample(1.0, 1.0) - Vec3::ONE).length() < 1e-5);
    }

    #[test]
    fn test_sample_bilinear_center() {
        let tex = checker_2x2();
        let c = tex.sample(0.5, 0.5);

        // Average of the four texels
        assert!((c - Vec3::new(0.5, 0.25, 0.5)).length() < 1e-5);
    }

    #[test]
    fn test_sample_clamps_out_of_range_uv() {
        let tex = checker_2x2();
        assert_eq!(tex.sample(-0.5, 2.0), tex.sample(0.0, 1.0));
    }

    #[test]
    fn test_new_rejects_bad_sizes() {
        assert!(matches!(
            Texture::new(0, 4, vec![], "empty"),
            Err(TextureError::Empty(_))
        ));
        assert!(matches!(
            Texture::new(2, 2, vec![[0.0; 3]; 3], "short"),
            Err(TextureError::SizeMismatch { expected: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn test_load_round_trips_through_image_file() {
        let path = std::env::temp_dir().join("lux_core_texture_test.png");
        let img = image::RgbImage::from_fn(3, 2, |x, y| {
            image::Rgb([(x * 100) as u8, (y * 255) as u8, 51])
        });
        img.save(&path).unwrap();

        let tex = Texture::load(&path).unwrap();
        assert_eq!((tex.width, tex.height), (3, 2));
        assert!((tex.pixels[1][0] - 100.0 / 255.0).abs() < 1e-6);
        assert!((tex.pixels[3][1] - 1.0).abs() < 1e-6);
        assert!((tex.pixels[0][2] - 0.2).abs() < 1e-6);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Texture::load("/nonexistent/lux/texture.ppm");
        assert!(matches!(result, Err(TextureError::Load { .. })));
    }

    #[test]
    fn test_texture_cache_shares_textures() {
        let path = std::env::temp_dir().join("lux_core_cache_test.png");
        image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let mut cache = TextureCache::new();
        assert!(cache.is_empty());

        let key = path.to_string_lossy().to_string();
        let a = cache.load(&key).unwrap();
        let b = cache.load(&key).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        let _ = std::fs::remove_file(&path);
    }
}
