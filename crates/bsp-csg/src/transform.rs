//! Affine transforms applied to solids.

use nalgebra::{Matrix3, Point3, UnitQuaternion, Vector3};

use crate::error::{GeometryError, Result};
use crate::plane::Plane;

/// An invertible affine map `p -> linear * p + translation`.
///
/// Besides points, the transform knows how to carry the two kinds of
/// normals a polygon owns:
/// - shading normals use the normalized inverse transpose;
/// - plane normals use the cofactor matrix (`det * inverse transpose`), which
///   is exactly how `(b - a) × (c - a)` transforms, so a mirrored polygon
///   keeps a plane consistent with its (now reversed) winding.
#[derive(Debug, Clone, PartialEq)]
pub struct AffineTransform {
    linear: Matrix3<f32>,
    translation: Vector3<f32>,
    normal_matrix: Matrix3<f32>,
    cofactor: Matrix3<f32>,
}

impl AffineTransform {
    /// Builds a transform from its linear part and translation.
    ///
    /// Fails with [`GeometryError::SingularTransform`] if `linear` cannot be
    /// inverted (it would flatten the geometry).
    pub fn new(linear: Matrix3<f32>, translation: Vector3<f32>) -> Result<Self> {
        if linear.iter().chain(translation.iter()).any(|c| !c.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate);
        }
        let inverse = linear
            .try_inverse()
            .ok_or(GeometryError::SingularTransform)?;
        let normal_matrix = inverse.transpose();
        let cofactor = normal_matrix * linear.determinant();
        if normal_matrix.iter().chain(cofactor.iter()).any(|c| !c.is_finite()) {
            return Err(GeometryError::SingularTransform);
        }
        Ok(Self {
            linear,
            translation,
            normal_matrix,
            cofactor,
        })
    }

    /// A pure translation.
    pub fn translation(offset: Vector3<f32>) -> Self {
        Self {
            linear: Matrix3::identity(),
            translation: offset,
            normal_matrix: Matrix3::identity(),
            cofactor: Matrix3::identity(),
        }
    }

    /// Per-axis scaling about the origin. Negative factors mirror.
    pub fn scaling(factors: Vector3<f32>) -> Result<Self> {
        Self::new(Matrix3::from_diagonal(&factors), Vector3::zeros())
    }

    /// Rotation about the origin by a unit quaternion.
    pub fn rotation(rotation: &UnitQuaternion<f32>) -> Self {
        let matrix = rotation.to_rotation_matrix().into_inner();
        Self {
            linear: matrix,
            translation: Vector3::zeros(),
            normal_matrix: matrix,
            cofactor: matrix,
        }
    }

    /// Returns `true` if the transform reverses orientation (negative determinant).
    #[inline]
    pub fn is_mirror(&self) -> bool {
        self.linear.determinant() < 0.0
    }

    #[inline]
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        Point3::from(self.linear * point.coords + self.translation)
    }

    /// Maps a shading normal. Zero normals stay zero.
    pub fn transform_normal(&self, normal: &Vector3<f32>) -> Vector3<f32> {
        let mapped = self.normal_matrix * normal;
        mapped.try_normalize(0.0).unwrap_or(mapped)
    }

    /// Maps a polygon plane, given the already transformed position of one
    /// point on it.
    pub fn transform_plane(&self, plane: &Plane, anchor: &Point3<f32>) -> Plane {
        let normal = self.cofactor * plane.normal();
        match normal.try_normalize(0.0) {
            Some(unit) => Plane::from_unit_normal(unit, unit.dot(&anchor.coords)),
            None => *plane,
        }
    }
}
