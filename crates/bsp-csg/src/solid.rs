//! Solids and their boolean algebra.

use log::debug;
use nalgebra::{Point3, Quaternion, UnitQuaternion, Vector3};

use crate::bounds::Aabb;
use crate::bsp::{BspNode, FirstPolygon, PlaneSelector, RandomPolygon};
use crate::error::{GeometryError, Result};
use crate::mesh::TriangleMesh;
use crate::polygon::Polygon;
use crate::transform::AffineTransform;
use crate::vertex::{CsgVertex, Vertex};

/// A solid bounded by a list of convex polygons.
///
/// The polygons are expected to form a closed surface with outward-facing
/// planes; nothing checks this, and open or self-intersecting input yields
/// whatever the BSP algebra makes of it.
///
/// Every operation takes `&self` and returns a new solid built from cloned
/// polygons, so operands can be reused freely. Results of boolean
/// operations and transforms keep the material and translation of `self`.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid<V = Vertex, S = ()> {
    polygons: Vec<Polygon<V, S>>,
    material: u32,
    translation: Vector3<f32>,
}

impl<V, S> Default for Solid<V, S> {
    fn default() -> Self {
        Self {
            polygons: Vec::new(),
            material: 0,
            translation: Vector3::zeros(),
        }
    }
}

impl<V: CsgVertex, S: Clone> Solid<V, S> {
    /// Creates a solid from its boundary polygons.
    pub fn from_polygons(polygons: Vec<Polygon<V, S>>) -> Self {
        Self {
            polygons,
            ..Self::default()
        }
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon<V, S>] {
        &self.polygons
    }

    #[inline]
    pub fn into_polygons(self) -> Vec<Polygon<V, S>> {
        self.polygons
    }

    /// Number of boundary polygons.
    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Material tag handed to the renderer with the mesh. Defaults to 0.
    #[inline]
    pub fn material(&self) -> u32 {
        self.material
    }

    /// Returns the solid with its material tag replaced.
    pub fn with_material(mut self, material: u32) -> Self {
        self.material = material;
        self
    }

    /// The offset of the last [`translate`](Self::translate), zero if never
    /// translated. Only recorded for the renderer; it does not move anything.
    #[inline]
    pub fn translation(&self) -> Vector3<f32> {
        self.translation
    }

    /// Everything inside either solid.
    ///
    /// ```text
    /// +-------+            +-------+
    /// |       |            |       |
    /// |   A   |            |       |
    /// |    +--+----+   =   |       +----+
    /// +----+--+    |       +----+       |
    ///      |   B   |            |       |
    ///      |       |            |       |
    ///      +-------+            +-------+
    /// ```
    pub fn union(&self, other: &Self) -> Self {
        self.union_with(other, &mut RandomPolygon::from_os_rng())
    }

    /// [`union`](Self::union) with an explicit split-plane strategy.
    pub fn union_with<P: PlaneSelector>(&self, other: &Self, selector: &mut P) -> Self {
        let mut a = BspNode::from_polygons(self.polygons.clone(), selector);
        let mut b = BspNode::from_polygons(other.polygons.clone(), selector);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.into_polygons(), selector);

        self.boolean_result("union", other, a)
    }

    /// Everything inside `self` but not inside `other`.
    ///
    /// ```text
    /// +-------+            +-------+
    /// |       |            |       |
    /// |   A   |            |       |
    /// |    +--+----+   =   |    +--+
    /// +----+--+    |       +----+
    ///      |   B   |
    ///      |       |
    ///      +-------+
    /// ```
    pub fn subtract(&self, other: &Self) -> Self {
        self.subtract_with(other, &mut RandomPolygon::from_os_rng())
    }

    /// [`subtract`](Self::subtract) with an explicit split-plane strategy.
    pub fn subtract_with<P: PlaneSelector>(&self, other: &Self, selector: &mut P) -> Self {
        let mut a = BspNode::from_polygons(self.polygons.clone(), selector);
        let mut b = BspNode::from_polygons(other.polygons.clone(), selector);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.into_polygons(), selector);
        a.invert();

        self.boolean_result("subtract", other, a)
    }

    /// Everything inside both solids.
    ///
    /// ```text
    /// +-------+
    /// |       |
    /// |   A   |
    /// |    +--+----+   =   +--+
    /// +----+--+    |       +--+
    ///      |   B   |
    ///      |       |
    ///      +-------+
    /// ```
    pub fn intersect(&self, other: &Self) -> Self {
        self.intersect_with(other, &mut RandomPolygon::from_os_rng())
    }

    /// [`intersect`](Self::intersect) with an explicit split-plane strategy.
    pub fn intersect_with<P: PlaneSelector>(&self, other: &Self, selector: &mut P) -> Self {
        let mut a = BspNode::from_polygons(self.polygons.clone(), selector);
        let mut b = BspNode::from_polygons(other.polygons.clone(), selector);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(b.into_polygons(), selector);
        a.invert();

        self.boolean_result("intersect", other, a)
    }

    fn boolean_result(&self, operation: &str, other: &Self, tree: BspNode<V, S>) -> Self {
        let polygons = tree.into_polygons();
        debug!(
            "{operation}: {} and {} polygons -> {}",
            self.polygons.len(),
            other.polygons.len(),
            polygons.len()
        );
        Self {
            polygons,
            material: self.material,
            translation: self.translation,
        }
    }

    /// The complement: solid and empty space swapped.
    pub fn inverse(&self) -> Self {
        Self {
            polygons: self.polygons.iter().map(Polygon::flipped).collect(),
            material: self.material,
            translation: self.translation,
        }
    }

    /// Scales about the origin, per axis.
    ///
    /// Negative factors mirror the solid; it stays outward facing. Fails with
    /// [`GeometryError::SingularTransform`] if a factor is zero.
    pub fn scale(&self, factors: Vector3<f32>) -> Result<Self> {
        let transform = AffineTransform::scaling(factors)?;
        Ok(self.transform(&transform))
    }

    /// Moves the solid by `offset` and records `offset` as its translation.
    pub fn translate(&self, offset: Vector3<f32>) -> Self {
        let mut solid = self.transform(&AffineTransform::translation(offset));
        solid.translation = offset;
        solid
    }

    /// Rotates about the origin.
    pub fn rotate(&self, rotation: &UnitQuaternion<f32>) -> Self {
        self.transform(&AffineTransform::rotation(rotation))
    }

    /// Rotates about the origin by the quaternion `x i + y j + z k + w`,
    /// normalized first.
    pub fn rotate_quaternion(&self, x: f32, y: f32, z: f32, w: f32) -> Result<Self> {
        let quaternion = Quaternion::new(w, x, y, z);
        if quaternion.coords.iter().any(|c| !c.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate);
        }
        let rotation = UnitQuaternion::try_new(quaternion, 0.0).ok_or(GeometryError::SingularTransform)?;
        Ok(self.rotate(&rotation))
    }

    /// Applies an arbitrary invertible affine transform.
    pub fn transform(&self, transform: &AffineTransform) -> Self {
        Self {
            polygons: self.polygons.iter().map(|p| p.transformed(transform)).collect(),
            material: self.material,
            translation: self.translation,
        }
    }

    /// Lays out `count` copies of the solid, copy `j` moved by `j * step`.
    ///
    /// Copy 0 is the solid itself, so a count of 0 or 1 returns an unchanged
    /// copy. Copies are concatenated, not unioned: overlapping copies
    /// produce overlapping polygons.
    pub fn repeat(&self, step: Vector3<f32>, count: usize) -> Self {
        let count = count.max(1);
        let mut polygons = Vec::with_capacity(self.polygons.len() * count);
        polygons.extend(self.polygons.iter().cloned());
        for j in 1..count {
            let offset = AffineTransform::translation(step * j as f32);
            polygons.extend(self.polygons.iter().map(|p| p.transformed(&offset)));
        }
        Self {
            polygons,
            material: self.material,
            translation: self.translation,
        }
    }

    /// Builds a BSP tree of the boundary.
    pub fn to_bsp<P: PlaneSelector>(&self, selector: &mut P) -> BspNode<V, S> {
        BspNode::from_polygons(self.polygons.clone(), selector)
    }

    /// Returns `true` if `point` is inside the solid.
    ///
    /// Builds a tree on every call; build one with [`to_bsp`](Self::to_bsp)
    /// to classify many points. Points on the surface may go either way.
    pub fn contains_point(&self, point: &Point3<f32>) -> bool {
        self.to_bsp(&mut FirstPolygon).contains_point(point)
    }

    /// Bounding box of all vertices, `None` for an empty solid.
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(
            self.polygons
                .iter()
                .flat_map(|p| p.vertices().iter().map(CsgVertex::position)),
        )
    }

    /// Fan-triangulates the boundary into a renderable mesh carrying the
    /// material tag and translation.
    pub fn to_triangle_mesh(&self) -> TriangleMesh {
        let mut mesh = TriangleMesh::from_polygons(&self.polygons);
        mesh.material = self.material;
        mesh.translation = self.translation.into();
        mesh
    }
}
