//! Plane representation and classification for BSP trees.

use std::ops::BitOr;

use nalgebra::{Point3, Vector3};

use crate::error::{GeometryError, Result};

/// Tolerance for plane classification.
/// Points within this distance of the plane are considered "on" the plane.
pub const PLANE_EPSILON: f32 = 1e-5;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// Classification of a polygon relative to a plane.
///
/// Classifications combine with `|` the way per-vertex sides accumulate:
/// `Coplanar` is the identity, and `Front | Back` is `Spanning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// All vertices lie on the plane
    Coplanar,
    /// No vertex is behind the plane and at least one is in front
    Front,
    /// No vertex is in front of the plane and at least one is behind
    Back,
    /// Vertices lie strictly on both sides
    Spanning,
}

impl From<PlaneSide> for Classification {
    fn from(side: PlaneSide) -> Self {
        match side {
            PlaneSide::Front => Classification::Front,
            PlaneSide::Back => Classification::Back,
            PlaneSide::OnPlane => Classification::Coplanar,
        }
    }
}

impl BitOr for Classification {
    type Output = Classification;

    fn bitor(self, rhs: Self) -> Self::Output {
        use Classification::*;
        match (self, rhs) {
            (Coplanar, other) | (other, Coplanar) => other,
            (Front, Front) => Front,
            (Back, Back) => Back,
            _ => Spanning,
        }
    }
}

impl BitOr<PlaneSide> for Classification {
    type Output = Classification;

    fn bitor(self, rhs: PlaneSide) -> Self::Output {
        self | Classification::from(rhs)
    }
}

/// A plane in 3D space, represented as `normal · point = offset`.
///
/// The normal is always unit length, so `offset` is the signed distance of
/// the plane from the origin and [`PLANE_EPSILON`] is a distance in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3<f32>,
    offset: f32,
}

impl Plane {
    /// Creates a new plane from a normal vector and offset.
    /// The normal (and offset) are rescaled so the normal has unit length.
    ///
    /// Fails with [`GeometryError::DegeneratePlane`] if the normal is zero or non-finite.
    pub fn new(normal: Vector3<f32>, offset: f32) -> Result<Self> {
        let norm = normal.norm();
        if !(norm > 0.0) || !norm.is_finite() || !offset.is_finite() {
            return Err(GeometryError::DegeneratePlane);
        }
        Ok(Self {
            normal: normal / norm,
            offset: offset / norm,
        })
    }

    /// Creates a plane from an already normalized normal.
    #[inline]
    pub(crate) fn from_unit_normal(normal: Vector3<f32>, offset: f32) -> Self {
        Self { normal, offset }
    }

    /// Creates a plane from three non-collinear points.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    ///
    /// Collinearity is judged relative to the edge lengths, so tiny but
    /// well-shaped triangles still define a plane.
    pub fn from_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Result<Self> {
        let ab = b - a;
        let ac = c - a;
        let normal = ab.cross(&ac);
        let norm = normal.norm();
        if !(norm > f32::EPSILON * ab.norm() * ac.norm()) || !norm.is_finite() {
            return Err(GeometryError::DegeneratePlane);
        }
        let unit_normal = normal / norm;
        let offset = unit_normal.dot(&a.coords);
        if !offset.is_finite() {
            return Err(GeometryError::NonFiniteCoordinate);
        }
        Ok(Self {
            normal: unit_normal,
            offset,
        })
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: &Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies which side of the plane a point lies on.
    /// Uses the fixed `PLANE_EPSILON` tolerance.
    #[inline]
    pub fn classify_point(&self, point: &Point3<f32>) -> PlaneSide {
        self.classify_point_with_epsilon(point, PLANE_EPSILON)
    }

    /// Classifies which side of the plane a point lies on, with a custom epsilon.
    pub fn classify_point_with_epsilon(&self, point: &Point3<f32>, epsilon: f32) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > epsilon {
            PlaneSide::Front
        } else if dist < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Flips the plane in place (negates normal and offset).
    #[inline]
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.offset = -self.offset;
    }

    /// Returns a new plane with the normal flipped (facing the opposite direction).
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Returns `true` if the two planes' normals point into the same half-space.
    #[inline]
    pub fn faces_same_direction(&self, other: &Plane) -> bool {
        self.normal.dot(&other.normal) > 0.0
    }

    /// Interpolation parameter where the segment `start -> end` crosses the plane.
    ///
    /// Only meaningful when the endpoints lie strictly on opposite sides.
    #[inline]
    pub fn edge_parameter(&self, start: &Point3<f32>, end: &Point3<f32>) -> f32 {
        (self.offset - self.normal.dot(&start.coords)) / self.normal.dot(&(end - start))
    }
}
