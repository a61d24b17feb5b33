//! Camera for primary ray generation.

use lux_core::View;
use lux_math::{Ray, Vec2, Vec3};

use crate::renderer::RenderConfig;
use crate::sampling::gaussian_kernel;

/// Half-width of the supersampling grid: radius 1 gives 3×3 subsamples.
pub const SUPERSAMPLE_RADIUS: usize = 1;

/// One sub-pixel sample: offset from the pixel centre in camera units and
/// its weight in the pixel average.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Subsample {
    pub offset: Vec2,
    pub weight: f32,
}

/// Generates primary rays for a square image seen through a [`View`].
#[derive(Clone, Debug)]
pub struct Camera {
    /// Image side length in pixels
    pub image_size: u32,

    view: View,

    // Cached from the view and resolution
    pixel_delta: Vec2,
    subsamples: Vec<Subsample>,
}

impl Camera {
    /// Create a camera taking one centred sample per pixel.
    pub fn new(view: View, image_size: u32) -> Self {
        let (du, dv) = view.pixel_delta(image_size);
        Self {
            image_size,
            view,
            pixel_delta: Vec2::new(du, dv),
            subsamples: vec![Subsample {
                offset: Vec2::ZERO,
                weight: 1.0,
            }],
        }
    }

    /// Create a camera with the resolution and sampling of `config`.
    pub fn from_config(view: View, config: &RenderConfig) -> Self {
        Self::new(view, config.image_size).with_antialiasing(config.antialiasing)
    }

    /// Enable or disable Gaussian-weighted supersampling.
    pub fn with_antialiasing(mut self, enabled: bool) -> Self {
        self.subsamples = if enabled {
            supersample_grid(SUPERSAMPLE_RADIUS, self.pixel_delta)
        } else {
            vec![Subsample {
                offset: Vec2::ZERO,
                weight: 1.0,
            }]
        };
        self
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Step between neighbouring pixel centres (du, dv), dv negative.
    pub fn pixel_delta(&self) -> Vec2 {
        self.pixel_delta
    }

    /// Subsamples taken for every pixel; weights sum to 1.
    pub fn subsamples(&self) -> &[Subsample] {
        &self.subsamples
    }

    /// Camera-space centre of pixel (i, j) on the image plane.
    ///
    /// Column `i` grows right from the window's left edge and row `j` grows
    /// down from its top edge.
    pub fn pixel_center(&self, i: u32, j: u32) -> Vec3 {
        Vec3::new(
            self.view.left + i as f32 * self.pixel_delta.x,
            self.view.top + j as f32 * self.pixel_delta.y,
            self.view.focal_length,
        )
    }

    /// World-space ray from the eye through a camera-space image-plane point.
    ///
    /// The direction keeps the length of the camera-space vector.
    pub fn ray_through(&self, target: Vec3) -> Ray {
        Ray::new(Vec3::ZERO, target).transformed(&self.view.camera_to_world())
    }

    /// Ray through one subsample of pixel (i, j).
    pub fn get_ray(&self, i: u32, j: u32, subsample: &Subsample) -> Ray {
        let center = self.pixel_center(i, j);
        self.ray_through(center + subsample.offset.extend(0.0))
    }
}

/// Regular (2r+1)² grid of offsets spread across one pixel, weighted by a
/// normalized Gaussian in subcell units.
fn supersample_grid(radius: usize, pixel_delta: Vec2) -> Vec<Subsample> {
    let side = 2 * radius + 1;
    let step = pixel_delta / side as f32;
    let centre = radius as f32;

    gaussian_kernel(radius)
        .into_iter()
        .enumerate()
        .map(|(index, weight)| {
            let cell = Vec2::new((index % side) as f32, (index / side) as f32);
            Subsample {
                offset: (cell - Vec2::splat(centre)) * step,
                weight,
            }
        })
        .collect()
}
