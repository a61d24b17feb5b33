//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Each bucket draws its shadow samples from its
//! own generator seeded from the render seed and the bucket's position, so a
//! given seed always produces the same image.

use std::time::Instant;

use lux_core::{Color, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::renderer::{check_image_size, render_pixel, ImageBuffer, RenderConfig, RenderResult};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Row-major index of this bucket in the grid
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Seed for this bucket's sample generator.
    ///
    /// Depends only on the root seed and the bucket's grid position.
    pub fn seed(&self, root: u64) -> u64 {
        let position = ((self.y as u64) << 32) | self.x as u64;
        root ^ position.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image in row-major order.
///
/// Results are gathered before being written out, so the order only
/// affects scheduling, never the image.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    // Generate grid of buckets
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> Vec<Color> {
    let mut rng = StdRng::seed_from_u64(bucket.seed(config.seed));
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let i = bucket.x + local_x;
            let j = bucket.y + local_y;
            pixels.push(render_pixel(camera, scene, i, j, config, &mut rng));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy the bucket's pixels into the full image.
    pub fn write_to(&self, image: &mut ImageBuffer) {
        let mut colors = self.pixels.iter();
        for local_y in 0..self.bucket.height {
            for local_x in 0..self.bucket.width {
                if let Some(color) = colors.next() {
                    image.set(self.bucket.x + local_x, self.bucket.y + local_y, *color);
                }
            }
        }
    }
}

/// Render the whole image in parallel on the current rayon pool.
pub fn render_parallel(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> RenderResult<ImageBuffer> {
    check_image_size(camera)?;

    let size = camera.image_size;
    let buckets = generate_buckets(size, size, config.bucket_size);

    log::info!(
        "Rendering {}x{} in {} buckets on {} threads ({} objects, {} lights)",
        size,
        size,
        buckets.len(),
        rayon::current_num_threads(),
        scene.object_count(),
        scene.light_count()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, camera, scene, config)))
        .collect();

    let mut image = ImageBuffer::new(size);
    for result in &results {
        result.write_to(&mut image);
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_core::{Light, Material, SceneObject, View};
    use lux_math::{TransformOp, Vec3};

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        // Total pixels should equal image size
        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 100, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 100);
    }

    #[test]
    fn test_row_major_order() {
        let buckets = generate_buckets(192, 128, 64);
        assert_eq!(buckets.len(), 6); // 3x2 grid

        let corners: Vec<_> = buckets.iter().map(|b| (b.x, b.y)).collect();
        assert_eq!(
            corners,
            [(0, 0), (64, 0), (128, 0), (0, 64), (64, 64), (128, 64)]
        );
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_bucket_seeds_differ() {
        let a = Bucket::new(0, 0, 8, 8, 0);
        let b = Bucket::new(8, 0, 8, 8, 1);
        let c = Bucket::new(0, 8, 8, 8, 2);

        assert_ne!(a.seed(1522), b.seed(1522));
        assert_ne!(b.seed(1522), c.seed(1522));
        assert_eq!(b.seed(1522), Bucket::new(8, 0, 8, 8, 5).seed(1522));
    }

    fn soft_shadow_scene() -> (View, Scene) {
        let view = View::new(
            Vec3::new(0.0, 0.0, -6.0),
            Vec3::new(0.0, -0.1, 1.0),
            Vec3::Y,
            -2.0,
            -2.0,
            2.0,
            4.0,
        )
        .unwrap();

        let mut scene = Scene::new("shadows");
        scene.add_object(SceneObject::plane(Material::default()).with_ops([
            TransformOp::Scale(Vec3::splat(10.0)),
            TransformOp::RotateX(std::f32::consts::FRAC_PI_2),
            TransformOp::Translate(Vec3::new(0.0, -1.0, 0.0)),
        ]));
        scene.add_object(SceneObject::sphere(Material::default()));
        scene.add_light(Light::at(Vec3::new(0.0, 5.0, -3.0), Color::ONE, 2.0));

        (view, scene)
    }

    fn soft_shadow_config() -> RenderConfig {
        RenderConfig {
            image_size: 12,
            antialiasing: true,
            bucket_size: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_parallel_render_is_deterministic() {
        let (view, scene) = soft_shadow_scene();
        let config = soft_shadow_config();
        let camera = Camera::from_config(view, &config);

        let a = render_parallel(&camera, &scene, &config).unwrap();

        let single = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap();
        let b = single
            .install(|| render_parallel(&camera, &scene, &config))
            .unwrap();

        assert_eq!(a.to_rgb8(), b.to_rgb8());
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let (view, scene) = soft_shadow_scene();
        let config = RenderConfig {
            image_size: 0,
            ..soft_shadow_config()
        };
        let camera = Camera::from_config(view, &config);

        assert!(matches!(
            render_parallel(&camera, &scene, &config),
            Err(crate::RenderError::ZeroImageSize)
        ));
    }

    #[test]
    fn test_parallel_render_covers_every_pixel() {
        let (view, scene) = soft_shadow_scene();
        let config = soft_shadow_config();
        let camera = Camera::from_config(view, &config);

        let image = render_parallel(&camera, &scene, &config).unwrap();
        assert_eq!(image.pixels.len(), 144);

        // Centre of the frame looks at the lit sphere
        assert!(image.get(6, 6).length() > 0.0);
    }
}
