// Re-export glam for convenience
pub use glam::*;

// Lux math types
mod interval;
mod ray;
pub mod transform;

pub use interval::Interval;
pub use ray::Ray;
pub use transform::{invert3x3, invert_affine, Mat4Ext, Transform, TransformOp};
