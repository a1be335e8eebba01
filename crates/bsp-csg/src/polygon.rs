//! Convex polygon representation for BSP trees.

use nalgebra::{Point3, Vector3};

use crate::error::{GeometryError, Result};
use crate::plane::{Classification, PLANE_EPSILON, Plane};
use crate::transform::AffineTransform;
use crate::vertex::{CsgVertex, Vertex};

/// A convex polygon in 3D space, defined by an ordered list of vertices.
///
/// Vertices must be coplanar and in counter-clockwise winding order
/// when viewed from the front (the direction the normal points).
///
/// Every polygon carries a `shared` tag. Clones and split fragments inherit
/// it unchanged, so fragments can be traced back to the surface they came
/// from (e.g. for per-surface material lookup).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<V = Vertex, S = ()> {
    vertices: Vec<V>,
    shared: S,
    plane: Plane,
}

impl<V: CsgVertex> Polygon<V, ()> {
    /// Creates an untagged polygon.
    pub fn from_vertices(vertices: Vec<V>) -> Result<Self> {
        Self::new(vertices, ())
    }
}

impl<V: CsgVertex, S: Clone> Polygon<V, S> {
    /// Creates a new polygon from a list of vertices and a shared tag.
    ///
    /// The plane is derived from the first three vertices. Fails if:
    /// - fewer than 3 vertices are provided,
    /// - a coordinate is NaN or infinite,
    /// - the first three vertices are collinear,
    /// - a later vertex is off the plane by more than [`PLANE_EPSILON`],
    ///   scaled up by the polygon size or the coordinate magnitude when
    ///   either exceeds 1.
    pub fn new(vertices: Vec<V>, shared: S) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        if vertices
            .iter()
            .any(|v| v.position().iter().any(|c| !c.is_finite()))
        {
            return Err(GeometryError::NonFiniteCoordinate);
        }

        let plane = Plane::from_points(
            vertices[0].position(),
            vertices[1].position(),
            vertices[2].position(),
        )?;
        Self::check_coplanar(&vertices, &plane)?;

        Ok(Self {
            vertices,
            shared,
            plane,
        })
    }

    /// Creates a polygon whose plane is already known (split fragments).
    #[inline]
    pub(crate) fn with_plane(vertices: Vec<V>, shared: S, plane: Plane) -> Self {
        Self {
            vertices,
            shared,
            plane,
        }
    }

    fn check_coplanar(vertices: &[V], plane: &Plane) -> Result<()> {
        let origin = vertices[0].position();
        // f32 rounding grows with distance from the origin.
        let scale = vertices
            .iter()
            .map(|v| {
                let pos = v.position();
                (pos - origin).norm().max(pos.coords.amax())
            })
            .fold(1.0_f32, f32::max);
        let tolerance = PLANE_EPSILON * scale;

        for (index, vertex) in vertices.iter().enumerate().skip(3) {
            let distance = plane.signed_distance(&vertex.position()).abs();
            if distance > tolerance {
                return Err(GeometryError::NonCoplanarVertex { index, distance });
            }
        }
        Ok(())
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Consumes the polygon, returning its vertices.
    #[inline]
    pub fn into_vertices(self) -> Vec<V> {
        self.vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the polygon has no vertices (always false for valid polygons).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the shared tag.
    #[inline]
    pub fn shared(&self) -> &S {
        &self.shared
    }

    /// Returns the plane that this polygon lies on.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the unit normal of the polygon's plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.plane.normal()
    }

    /// Computes the centroid (average of the vertices) of the polygon.
    pub fn centroid(&self) -> Point3<f32> {
        let sum: Vector3<f32> = self.vertices.iter().map(|v| v.position().coords).sum();
        Point3::from(sum / self.vertices.len() as f32)
    }

    /// Classifies this polygon relative to a plane.
    ///
    /// Returns:
    /// - `Coplanar` if all vertices lie on the plane
    /// - `Front` if no vertex is behind the plane
    /// - `Back` if no vertex is in front of the plane
    /// - `Spanning` if vertices are on both sides
    pub fn classify(&self, plane: &Plane) -> Classification {
        self.vertices
            .iter()
            .fold(Classification::Coplanar, |acc, v| {
                acc | plane.classify_point(&v.position())
            })
    }

    /// Reverses the winding order in place: vertex order is reversed, every
    /// vertex is flipped and the plane is negated.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.vertices.iter_mut().for_each(CsgVertex::flip);
        self.plane.flip();
    }

    /// Returns a flipped copy of the polygon.
    pub fn flipped(&self) -> Self {
        let mut polygon = self.clone();
        polygon.flip();
        polygon
    }

    /// Applies an affine transform to every vertex, keeping the plane
    /// consistent with the transformed vertex order.
    ///
    /// A mirroring transform turns the winding around; the vertex order is
    /// reversed afterwards so the polygon keeps facing away from the side it
    /// faced before.
    pub fn transform(&mut self, transform: &AffineTransform) {
        self.vertices
            .iter_mut()
            .for_each(|v| v.transform(transform));
        let anchor = self.vertices[0].position();
        self.plane = transform.transform_plane(&self.plane, &anchor);
        if transform.is_mirror() {
            self.vertices.reverse();
            self.plane.flip();
        }
    }

    /// Returns a transformed copy of the polygon.
    pub fn transformed(&self, transform: &AffineTransform) -> Self {
        let mut polygon = self.clone();
        polygon.transform(transform);
        polygon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vertex(p: [f32; 3]) -> Vertex {
        Vertex::new(Point3::new(p[0], p[1], p[2]), Vector3::z())
    }

    fn make_square(z: f32) -> Polygon {
        Polygon::from_vertices(vec![
            vertex([0.0, 0.0, z]),
            vertex([1.0, 0.0, z]),
            vertex([1.0, 1.0, z]),
            vertex([0.0, 1.0, z]),
        ])
        .unwrap()
    }

    #[test]
    fn new_derives_plane_from_first_three() {
        let square = make_square(2.0);
        assert_relative_eq!(square.normal(), Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(square.plane().offset(), 2.0);
        assert_eq!(square.len(), 4);
    }

    #[test]
    fn new_rejects_too_few_vertices() {
        let result = Polygon::from_vertices(vec![vertex([0.0, 0.0, 0.0]), vertex([1.0, 0.0, 0.0])]);
        assert_eq!(result, Err(GeometryError::TooFewVertices(2)));
    }

    #[test]
    fn new_rejects_collinear_start() {
        let result = Polygon::from_vertices(vec![
            vertex([0.0, 0.0, 0.0]),
            vertex([1.0, 0.0, 0.0]),
            vertex([2.0, 0.0, 0.0]),
            vertex([0.0, 1.0, 0.0]),
        ]);
        assert_eq!(result, Err(GeometryError::DegeneratePlane));
    }

    #[test]
    fn new_rejects_non_coplanar() {
        let result = Polygon::from_vertices(vec![
            vertex([0.0, 0.0, 0.0]),
            vertex([1.0, 0.0, 0.0]),
            vertex([1.0, 1.0, 0.0]),
            vertex([0.0, 1.0, 0.5]),
        ]);
        assert!(matches!(
            result,
            Err(GeometryError::NonCoplanarVertex { index: 3, .. })
        ));
    }

    #[test]
    fn far_from_origin_tolerance_follows_coordinates() {
        // Off the plane by about two f32 steps at x = 1000.
        let far = Polygon::from_vertices(vec![
            vertex([1000.0, 0.0, 0.0]),
            vertex([1000.0, 1.0, 0.0]),
            vertex([1000.0, 1.0, 1.0]),
            vertex([1000.0001, 0.0, 1.0]),
        ]);
        assert!(far.is_ok());

        let near = Polygon::from_vertices(vec![
            vertex([0.0, 0.0, 0.0]),
            vertex([0.0, 1.0, 0.0]),
            vertex([0.0, 1.0, 1.0]),
            vertex([0.0001, 0.0, 1.0]),
        ]);
        assert!(matches!(
            near,
            Err(GeometryError::NonCoplanarVertex { index: 3, .. })
        ));
    }

    #[test]
    fn new_rejects_infinite_coordinates() {
        let result = Polygon::from_vertices(vec![
            vertex([0.0, 0.0, 0.0]),
            vertex([f32::INFINITY, 0.0, 0.0]),
            vertex([0.0, 1.0, 0.0]),
        ]);
        assert_eq!(result, Err(GeometryError::NonFiniteCoordinate));
    }

    #[test]
    fn flip_reverses_order_and_plane() {
        let square = make_square(0.0);
        let flipped = square.flipped();

        assert_eq!(flipped.vertices()[0].pos, square.vertices()[3].pos);
        assert_eq!(flipped.vertices()[3].pos, square.vertices()[0].pos);
        assert_relative_eq!(flipped.normal(), Vector3::new(0.0, 0.0, -1.0));
        assert!(flipped.vertices().iter().all(|v| v.normal == -Vector3::z()));

        // The cached plane still agrees with the reversed winding.
        let v = flipped.vertices();
        let recomputed = Plane::from_points(v[0].pos, v[1].pos, v[2].pos).unwrap();
        assert_relative_eq!(recomputed.normal(), flipped.normal());
    }

    #[test]
    fn double_flip_is_identity() {
        let square = make_square(1.0);
        assert_eq!(square.flipped().flipped(), square);
    }

    #[test]
    fn clone_keeps_shared_tag() {
        let tagged = Polygon::new(make_square(0.0).into_vertices(), 7_u32).unwrap();
        assert_eq!(*tagged.clone().shared(), 7);
        assert_eq!(*tagged.flipped().shared(), 7);
    }

    #[test]
    fn classify_against_planes() {
        let square = make_square(0.0);
        let below = Plane::new(Vector3::z(), -1.0).unwrap();
        let above = Plane::new(Vector3::z(), 1.0).unwrap();
        let same = Plane::new(Vector3::z(), 0.0).unwrap();
        let across = Plane::new(Vector3::x(), 0.5).unwrap();

        assert_eq!(square.classify(&below), Classification::Front);
        assert_eq!(square.classify(&above), Classification::Back);
        assert_eq!(square.classify(&same), Classification::Coplanar);
        assert_eq!(square.classify(&across), Classification::Spanning);
    }

    #[test]
    fn classify_touching_plane_is_one_sided() {
        // One edge lies on the plane, the rest in front.
        let square = make_square(0.0);
        let edge_plane = Plane::new(Vector3::x(), 0.0).unwrap();
        assert_eq!(square.classify(&edge_plane), Classification::Front);
    }

    #[test]
    fn centroid_of_square() {
        let square = make_square(3.0);
        assert_relative_eq!(square.centroid(), Point3::new(0.5, 0.5, 3.0));
    }

    #[test]
    fn transform_translates_plane() {
        let square = make_square(0.0);
        let moved = square.transformed(&AffineTransform::translation(Vector3::new(0.0, 0.0, 2.0)));
        assert_relative_eq!(moved.plane().offset(), 2.0);
        assert_relative_eq!(moved.vertices()[2].pos, Point3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn mirror_keeps_facing() {
        let square = make_square(1.0);
        let mirrored = square.transformed(&AffineTransform::scaling(Vector3::new(-1.0, 1.0, 1.0)).unwrap());

        assert_relative_eq!(mirrored.normal(), Vector3::z(), epsilon = 1e-6);
        assert_relative_eq!(mirrored.plane().offset(), 1.0, epsilon = 1e-6);
        assert!(mirrored.vertices().iter().all(|v| v.normal.z > 0.0));

        // The stored plane agrees with the reversed winding.
        let v = mirrored.vertices();
        let recomputed = Plane::from_points(v[0].pos, v[1].pos, v[2].pos).unwrap();
        assert_relative_eq!(recomputed.normal(), mirrored.normal(), epsilon = 1e-6);
    }
}
