// Transform pipeline between object-local ("model") space and world space.
//
// glam::Mat4 already provides transform_point3() (w=1) and transform_vector3()
// (w=0). This module adds the affine inverse every object needs, the normal
// transform, and the incremental scale/rotate/translate builder.

use glam::{Mat3, Mat4, Vec3};

use crate::Ray;

/// Smallest |det| / (|c0| |c1| |c2|) a 3x3 linear part may have.
///
/// The ratio is the volume of the parallelepiped spanned by the columns
/// relative to a box with the same edge lengths, so it does not depend on
/// the overall scale of the matrix.
const SINGULAR_EPSILON: f32 = 1e-6;

/// Invert a 3x3 matrix, or `None` if it is singular or not finite.
pub fn invert3x3(m: Mat3) -> Option<Mat3> {
    let det = m.determinant();
    let extent = m.x_axis.length() * m.y_axis.length() * m.z_axis.length();
    if !det.is_finite() || extent == 0.0 || (det / extent).abs() < SINGULAR_EPSILON {
        return None;
    }

    let inverse = m.inverse();
    inverse.is_finite().then_some(inverse)
}

/// Invert an affine 4x4 matrix.
///
/// Only the upper-left 3x3 block is inverted; the translation of the inverse
/// is `-(A⁻¹ · t)`. Inverting the full 4x4 is avoided so the bottom row stays
/// exactly (0, 0, 0, 1).
pub fn invert_affine(matrix: &Mat4) -> Option<Mat4> {
    let linear = invert3x3(Mat3::from_mat4(*matrix))?;
    let translation = -(linear * matrix.w_axis.truncate());

    Some(Mat4::from_cols(
        linear.x_axis.extend(0.0),
        linear.y_axis.extend(0.0),
        linear.z_axis.extend(0.0),
        translation.extend(1.0),
    ))
}

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform a surface normal, treating `self` as the *inverse* of the
    /// point transform (Tinv).
    ///
    /// Normals go through transpose(Tinv) rather than T so they stay
    /// perpendicular to the surface under non-uniform scale. The result is
    /// renormalized.
    fn transform_normal3(&self, normal: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn transform_normal3(&self, normal: Vec3) -> Vec3 {
        self.transpose().transform_vector3(normal).normalize()
    }
}

/// A single affine operation in an object's transform sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Scale(Vec3),
    /// Rotation about +X, in radians.
    RotateX(f32),
    /// Rotation about +Y, in radians.
    RotateY(f32),
    /// Rotation about +Z, in radians.
    RotateZ(f32),
    Translate(Vec3),
}

impl TransformOp {
    /// The 4x4 matrix for this operation.
    pub fn matrix(&self) -> Mat4 {
        match *self {
            TransformOp::Scale(s) => Mat4::from_scale(s),
            TransformOp::RotateX(theta) => Mat4::from_rotation_x(theta),
            TransformOp::RotateY(theta) => Mat4::from_rotation_y(theta),
            TransformOp::RotateZ(theta) => Mat4::from_rotation_z(theta),
            TransformOp::Translate(t) => Mat4::from_translation(t),
        }
    }
}

/// Local-to-world matrix of an object together with its inverse.
///
/// Operations are left-multiplied onto the current matrix, so they compose
/// in call order: the first operation issued is the first one applied to
/// local coordinates. The inverse is recomputed from scratch after every
/// operation, keeping `matrix * inverse ≈ I` at all times.
///
/// Once an operation makes the matrix singular the transform becomes the
/// identity and ignores every later operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Mat4,
    inverse: Mat4,
    singular: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        matrix: Mat4::IDENTITY,
        inverse: Mat4::IDENTITY,
        singular: false,
    };

    /// Build a transform from an ordered sequence of operations.
    pub fn from_ops<I>(ops: I) -> Self
    where
        I: IntoIterator<Item = TransformOp>,
    {
        let mut transform = Self::IDENTITY;
        for op in ops {
            transform.apply(op);
        }
        transform
    }

    /// Left-multiply an operation onto the matrix and refresh the inverse.
    ///
    /// A singular result falls back to the identity transform with a warning.
    pub fn apply(&mut self, op: TransformOp) -> &mut Self {
        if self.singular {
            log::debug!("Ignoring {:?} on a singular transform", op);
            return self;
        }

        self.matrix = op.matrix() * self.matrix;
        match invert_affine(&self.matrix) {
            Some(inverse) => self.inverse = inverse,
            None => {
                log::warn!(
                    "Transform became singular after {:?}, falling back to identity",
                    op
                );
                *self = Self {
                    singular: true,
                    ..Self::IDENTITY
                };
            }
        }
        self
    }

    /// True if an operation made the matrix singular.
    #[inline]
    pub fn is_singular(&self) -> bool {
        self.singular
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) -> &mut Self {
        self.apply(TransformOp::Scale(Vec3::new(sx, sy, sz)))
    }

    pub fn rotate_x(&mut self, theta: f32) -> &mut Self {
        self.apply(TransformOp::RotateX(theta))
    }

    pub fn rotate_y(&mut self, theta: f32) -> &mut Self {
        self.apply(TransformOp::RotateY(theta))
    }

    pub fn rotate_z(&mut self, theta: f32) -> &mut Self {
        self.apply(TransformOp::RotateZ(theta))
    }

    pub fn translate(&mut self, tx: f32, ty: f32, tz: f32) -> &mut Self {
        self.apply(TransformOp::Translate(Vec3::new(tx, ty, tz)))
    }

    /// Local-to-world matrix (T).
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// World-to-local matrix (Tinv).
    #[inline]
    pub fn inverse(&self) -> Mat4 {
        self.inverse
    }

    /// World-space position of the local origin.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    #[inline]
    pub fn point_to_world(&self, point: Vec3) -> Vec3 {
        self.matrix.transform_point3(point)
    }

    #[inline]
    pub fn vector_to_world(&self, vector: Vec3) -> Vec3 {
        self.matrix.transform_vector3(vector)
    }

    /// Local normal to a unit world normal via transpose(Tinv).
    #[inline]
    pub fn normal_to_world(&self, normal: Vec3) -> Vec3 {
        self.inverse.transform_normal3(normal)
    }

    /// Copy of a world-space ray expressed in local space.
    #[inline]
    pub fn ray_to_local(&self, ray: &Ray) -> Ray {
        ray.transformed(&self.inverse)
    }
}
