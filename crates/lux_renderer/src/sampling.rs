//! Random sampling helpers and the supersampling kernel.

use lux_math::Vec3;
use rand::{Rng, RngCore};
use std::f32::consts::PI;

/// Uniform float in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Random offset within a sphere of `radius` around the origin.
///
/// Both angles are drawn uniformly in [0, 2π) and the distance is a uniform
/// fraction of the radius, so samples cluster toward the centre.
pub fn random_in_sphere(radius: f32, rng: &mut dyn RngCore) -> Vec3 {
    let theta = 2.0 * PI * gen_f32(rng);
    let phi = 2.0 * PI * gen_f32(rng);
    let r = radius * gen_f32(rng);

    let planar = r * theta.sin();
    Vec3::new(planar * phi.cos(), planar * phi.sin(), r * theta.cos())
}

/// Standard 2D Gaussian density at (x, y).
#[inline]
pub fn gaussian(x: f32, y: f32) -> f32 {
    (-(x * x + y * y) / 2.0).exp() / (2.0 * PI)
}

/// Gaussian weights for a (2·`radius` + 1)² grid of subsamples, row-major,
/// normalized to sum to 1.
pub fn gaussian_kernel(radius: usize) -> Vec<f32> {
    let side = 2 * radius + 1;
    let centre = radius as f32;

    let mut weights: Vec<f32> = (0..side * side)
        .map(|index| {
            let x = (index % side) as f32 - centre;
            let y = (index / side) as f32 - centre;
            gaussian(x, y)
        })
        .collect();

    let total: f32 = weights.iter().sum();
    for weight in &mut weights {
        *weight /= total;
    }

    weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gen_f32_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let x = gen_f32(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_random_in_sphere_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let p = random_in_sphere(3.0, &mut rng);
            assert!(p.length() <= 3.0 + 1e-4);
        }
    }

    #[test]
    fn test_zero_radius_is_a_point() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_in_sphere(0.0, &mut rng), Vec3::ZERO);
    }

    #[test]
    fn test_gaussian_kernel() {
        let kernel = gaussian_kernel(1);
        assert_eq!(kernel.len(), 9);

        let total: f32 = kernel.iter().sum();
        assert!((total - 1.0).abs() < 1e-5);

        // Centre weighs most, corners least, symmetric
        assert!(kernel[4] > kernel[1]);
        assert!(kernel[1] > kernel[0]);
        assert!((kernel[0] - kernel[8]).abs() < 1e-7);
        assert!((kernel[1] - kernel[3]).abs() < 1e-7);
    }

    #[test]
    fn test_single_sample_kernel() {
        assert_eq!(gaussian_kernel(0), vec![1.0]);
    }
}
