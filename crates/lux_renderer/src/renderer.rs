//! Render configuration, per-pixel sampling and the output raster.

use std::path::Path;

use lux_core::{Color, Scene};
use lux_math::Interval;
use rand::RngCore;
use thiserror::Error;

use crate::bucket::DEFAULT_BUCKET_SIZE;
use crate::camera::Camera;
use crate::shading::{clamp_color, trace_ray};

/// Errors from rendering or writing the image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image size must be at least 1 pixel")]
    ZeroImageSize,

    #[error("Raster of {actual} bytes does not match a {size}x{size} RGB image")]
    RasterSize { size: u32, actual: usize },

    #[error("Failed to write image: {0}")]
    Output(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Side length of the square output image in pixels
    pub image_size: u32,
    /// Maximum recursion depth for reflection and refraction
    pub max_depth: u32,
    /// Supersample pixels and soften shadows
    pub antialiasing: bool,
    /// Color returned when a ray hits nothing
    pub background: Color,
    /// Root seed for shadow sampling
    pub seed: u64,
    /// Side length of a render bucket in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_size: 512,
            max_depth: 3,
            antialiasing: false,
            background: Color::ZERO,
            seed: 1522,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Render a single pixel: the weighted sum of its subsamples, clamped.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for subsample in camera.subsamples() {
        let ray = camera.get_ray(i, j, subsample);
        pixel_color += subsample.weight * trace_ray(&ray, scene, 0, None, config, rng);
    }

    clamp_color(pixel_color)
}

/// Reject cameras that cannot produce an image.
pub(crate) fn check_image_size(camera: &Camera) -> RenderResult<()> {
    if camera.image_size == 0 {
        return Err(RenderError::ZeroImageSize);
    }
    Ok(())
}

/// Quantize a color channel to 8 bits.
#[inline]
pub fn quantize(x: f32) -> u8 {
    (Interval::UNIT.clamp(x) * 255.0) as u8
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Square image buffer for render output.
pub struct ImageBuffer {
    pub size: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(size: u32) -> Self {
        Self {
            size,
            pixels: vec![Color::ZERO; size as usize * size as usize],
        }
    }

    /// Get the pixel at column `i`, row `j`.
    pub fn get(&self, i: u32, j: u32) -> Color {
        self.pixels[(j * self.size + i) as usize]
    }

    /// Set the pixel at column `i`, row `j`.
    pub fn set(&mut self, i: u32, j: u32, color: Color) {
        self.pixels[(j * self.size + i) as usize] = color;
    }

    /// Row-major 8-bit RGB raster.
    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        self.pixels.iter().map(|c| color_to_rgb(*c)).collect()
    }

    /// Encode the raster to `path`; the format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let raster = self.to_rgb8();
        let bytes: &[u8] = bytemuck::cast_slice(&raster);

        let image = image::RgbImage::from_raw(self.size, self.size, bytes.to_vec()).ok_or(
            RenderError::RasterSize {
                size: self.size,
                actual: bytes.len(),
            },
        )?;
        image.save(path.as_ref())?;

        log::info!("Wrote {}", path.as_ref().display());
        Ok(())
    }
}

/// Render the entire scene on the calling thread.
///
/// Shadow samples draw from `rng` in scanline order.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> RenderResult<ImageBuffer> {
    check_image_size(camera)?;

    let mut image = ImageBuffer::new(camera.image_size);

    for j in 0..camera.image_size {
        for i in 0..camera.image_size {
            let color = render_pixel(camera, scene, i, j, config, rng);
            image.set(i, j, color);
        }
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_core::{Light, Material, SceneObject, View};
    use lux_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_view() -> View {
        View::new(
            Vec3::new(0.0, 0.0, -6.0),
            Vec3::Z,
            Vec3::Y,
            -2.0,
            -2.0,
            2.0,
            4.0,
        )
        .unwrap()
    }

    fn test_scene() -> Scene {
        let mut scene = Scene::new("test");
        scene.add_object(SceneObject::sphere(Material::new(Color::new(1.0, 0.2, 0.2))));
        scene.add_light(Light::at(Vec3::new(0.0, 0.0, -10.0), Color::ONE, 1.0));
        scene
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(0.5), 127);
        assert_eq!(quantize(-3.0), 0);
        assert_eq!(quantize(7.0), 255);
        assert_eq!(color_to_rgb(Color::new(1.0, 0.0, 0.5)), [255, 0, 127]);
    }

    #[test]
    fn test_render_pixel() {
        let config = RenderConfig {
            image_size: 9,
            ..Default::default()
        };
        let camera = Camera::new(test_view(), config.image_size);
        let scene = test_scene();
        let mut rng = StdRng::seed_from_u64(42);

        // Centre pixel hits the sphere, the corner sees the background
        let centre = render_pixel(&camera, &scene, 4, 4, &config, &mut rng);
        assert!(centre.x > 0.0);
        assert!(centre.x > centre.y);

        let corner = render_pixel(&camera, &scene, 0, 0, &config, &mut rng);
        assert_eq!(corner, Color::ZERO);
    }

    #[test]
    fn test_antialiased_pixel_stays_in_range() {
        let config = RenderConfig {
            image_size: 9,
            antialiasing: true,
            ..Default::default()
        };
        let camera = Camera::from_config(test_view(), &config);
        let scene = test_scene();
        let mut rng = StdRng::seed_from_u64(42);

        for (i, j) in [(4, 4), (2, 3), (0, 0)] {
            let c = render_pixel(&camera, &scene, i, j, &config, &mut rng);
            assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
        }
    }

    #[test]
    fn test_render_is_deterministic_per_seed() {
        let config = RenderConfig {
            image_size: 8,
            antialiasing: true,
            ..Default::default()
        };
        let camera = Camera::from_config(test_view(), &config);
        let scene = test_scene();

        let a = render(&camera, &scene, &config, &mut StdRng::seed_from_u64(1522)).unwrap();
        let b = render(&camera, &scene, &config, &mut StdRng::seed_from_u64(1522)).unwrap();
        assert_eq!(a.to_rgb8(), b.to_rgb8());
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let config = RenderConfig {
            image_size: 0,
            ..Default::default()
        };
        let camera = Camera::from_config(test_view(), &config);
        let result = render(&camera, &test_scene(), &config, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(RenderError::ZeroImageSize)));
    }

    #[test]
    fn test_save_writes_readable_image() {
        let mut image = ImageBuffer::new(2);
        image.set(1, 0, Color::new(1.0, 0.0, 0.0));

        let path = std::env::temp_dir().join("lux_renderer_save_test.ppm");
        image.save(&path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(1, 0).0, [255, 0, 0]);
        assert_eq!(decoded.get_pixel(0, 1).0, [0, 0, 0]);

        let _ = std::fs::remove_file(&path);
    }
}
