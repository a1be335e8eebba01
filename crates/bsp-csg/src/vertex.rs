//! Polygon vertices.
//!
//! The BSP algorithms only ever read a vertex's position. Everything else a
//! vertex carries (normals here, texture coordinates or colors in custom
//! vertex types) just has to survive cloning, flipping and interpolation
//! when polygons are split.

use nalgebra::{Point3, Vector3};

use crate::transform::AffineTransform;

/// Capabilities a vertex type needs to take part in CSG operations.
///
/// Implement this for your own vertex type to carry extra attributes
/// through boolean operations; [`Vertex`] is the default implementation.
pub trait CsgVertex: Clone {
    /// Position used for all plane classification.
    fn position(&self) -> Point3<f32>;

    /// Shading normal. Never used for classification.
    fn normal(&self) -> Vector3<f32>;

    /// Inverts orientation-specific data. Called when the owning polygon is flipped.
    fn flip(&mut self);

    /// Creates a vertex between `self` (`t = 0`) and `other` (`t = 1`).
    fn interpolate(&self, other: &Self, t: f32) -> Self;

    /// Moves the vertex by an affine transform.
    fn transform(&mut self, transform: &AffineTransform);
}

/// A vertex with a position and a shading normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    /// Creates a new vertex.
    #[inline]
    pub fn new(pos: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { pos, normal }
    }
}

impl CsgVertex for Vertex {
    #[inline]
    fn position(&self) -> Point3<f32> {
        self.pos
    }

    #[inline]
    fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    #[inline]
    fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Linearly interpolates both position and normal.
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        Self {
            pos: self.pos + (other.pos - self.pos) * t,
            normal: self.normal.lerp(&other.normal, t),
        }
    }

    fn transform(&mut self, transform: &AffineTransform) {
        self.pos = transform.transform_point(&self.pos);
        self.normal = transform.transform_normal(&self.normal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;

    #[test]
    fn interpolate_midpoint() {
        let a = Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let b = Vertex::new(Point3::new(2.0, 4.0, -6.0), Vector3::new(0.0, 1.0, 0.0));

        let mid = a.interpolate(&b, 0.5);
        assert_relative_eq!(mid.pos, Point3::new(1.0, 2.0, -3.0));
        assert_relative_eq!(mid.normal, Vector3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn interpolate_endpoints() {
        let a = Vertex::new(Point3::new(1.0, 1.0, 1.0), Vector3::z());
        let b = Vertex::new(Point3::new(3.0, 1.0, 1.0), Vector3::x());

        assert_eq!(a.interpolate(&b, 0.0), a);
        assert_relative_eq!(a.interpolate(&b, 1.0).pos, b.pos);
    }

    #[test]
    fn flip_negates_normal_only() {
        let mut v = Vertex::new(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 0.0, 1.0));
        v.flip();
        assert_eq!(v.pos, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(v.normal, Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn transform_rotates_position_and_normal() {
        let mut v = Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::x());
        let quarter = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f32::consts::FRAC_PI_2);
        v.transform(&AffineTransform::rotation(&quarter));

        assert_relative_eq!(v.pos, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(v.normal, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }
}
