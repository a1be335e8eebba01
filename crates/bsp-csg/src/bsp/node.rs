//! BSP tree node implementation.

use crate::plane::Plane;
use crate::polygon::Polygon;
use crate::vertex::{CsgVertex, Vertex};

use super::selector::PlaneSelector;
use super::visitor::{BspVisitor, CollectingVisitor};

/// A node in a solid BSP tree.
///
/// Each node partitions space using a splitting plane and stores the
/// polygons that are coplanar with that plane, whichever way they face.
/// Polygons in front of or behind the plane live in the respective child
/// subtrees. There is no distinction between internal and leaf nodes: any
/// node can hold polygons.
///
/// Space classification follows from the children: a point behind a plane
/// with no back child is inside the solid, a point in front of a plane with
/// no front child is outside.
///
/// A node without a plane is an empty tree. Each node exclusively owns its
/// children, so [`invert`](Self::invert) is a plain swap.
#[derive(Debug, Clone, PartialEq)]
pub struct BspNode<V = Vertex, S = ()> {
    /// The splitting plane for this node, `None` until something is built.
    pub(super) plane: Option<Plane>,

    /// Polygons lying on the plane, both facing with and against it.
    pub(super) polygons: Vec<Polygon<V, S>>,

    /// Subtree containing polygons in FRONT of the splitting plane.
    pub(super) front: Option<Box<BspNode<V, S>>>,

    /// Subtree containing polygons BEHIND the splitting plane.
    pub(super) back: Option<Box<BspNode<V, S>>>,
}

impl<V, S> Default for BspNode<V, S> {
    fn default() -> Self {
        Self {
            plane: None,
            polygons: Vec::new(),
            front: None,
            back: None,
        }
    }
}

impl<V: CsgVertex, S: Clone> BspNode<V, S> {
    /// Creates an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from a collection of polygons.
    ///
    /// Uses the provided [`PlaneSelector`] to choose splitting planes during
    /// construction. Returns an empty tree if the input is empty.
    pub fn from_polygons<P: PlaneSelector>(polygons: Vec<Polygon<V, S>>, selector: &mut P) -> Self {
        let mut node = Self::new();
        node.build(polygons, selector);
        node
    }

    /// Returns the splitting plane, if the node has been built.
    #[inline]
    pub fn plane(&self) -> Option<&Plane> {
        self.plane.as_ref()
    }

    /// Returns the polygons stored at this node.
    #[inline]
    pub fn polygons(&self) -> &[Polygon<V, S>] {
        &self.polygons
    }

    /// Returns a reference to the front child subtree.
    #[inline]
    pub fn front(&self) -> Option<&BspNode<V, S>> {
        self.front.as_deref()
    }

    /// Returns a reference to the back child subtree.
    #[inline]
    pub fn back(&self) -> Option<&BspNode<V, S>> {
        self.back.as_deref()
    }

    /// Returns `true` if nothing has been built into this node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.plane.is_none()
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    /// Returns the total number of polygons in this subtree (including all descendants).
    pub fn polygon_count(&self) -> usize {
        let mut count = self.polygons.len();

        if let Some(ref front) = self.front {
            count += front.polygon_count();
        }
        if let Some(ref back) = self.back {
            count += back.polygon_count();
        }

        count
    }

    /// Returns the depth of this subtree (0 for an empty tree, 1 for a leaf node).
    pub fn depth(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let front_depth = self.front.as_ref().map_or(0, |n| n.depth());
        let back_depth = self.back.as_ref().map_or(0, |n| n.depth());
        1 + front_depth.max(back_depth)
    }

    /// Converts solid space to empty space and empty space to solid space.
    ///
    /// Every polygon and every plane in the subtree is flipped and the
    /// front/back children of every node are swapped. Inverting twice
    /// restores the original tree.
    pub fn invert(&mut self) {
        self.polygons.iter_mut().for_each(Polygon::flip);
        if let Some(ref mut plane) = self.plane {
            plane.flip();
        }
        if let Some(ref mut front) = self.front {
            front.invert();
        }
        if let Some(ref mut back) = self.back {
            back.invert();
        }
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Walks the tree pre-order (node, front subtree, back subtree),
    /// handing each node's polygons to the visitor.
    pub fn visit<B: BspVisitor<V, S>>(&self, visitor: &mut B) {
        if !self.polygons.is_empty() {
            visitor.visit(&self.polygons);
        }
        if let Some(ref front) = self.front {
            front.visit(visitor);
        }
        if let Some(ref back) = self.back {
            back.visit(visitor);
        }
    }

    /// Collects all polygons in the tree, pre-order. The tree is left untouched.
    pub fn all_polygons(&self) -> Vec<Polygon<V, S>> {
        let mut visitor = CollectingVisitor::with_capacity(self.polygon_count());
        self.visit(&mut visitor);
        visitor.into_polygons()
    }

    /// Consumes the tree, returning its polygons in the same order as
    /// [`all_polygons`](Self::all_polygons) without cloning them.
    pub fn into_polygons(self) -> Vec<Polygon<V, S>> {
        let mut result = Vec::with_capacity(self.polygon_count());
        self.drain_into(&mut result);
        result
    }

    fn drain_into(self, result: &mut Vec<Polygon<V, S>>) {
        result.extend(self.polygons);
        if let Some(front) = self.front {
            front.drain_into(result);
        }
        if let Some(back) = self.back {
            back.drain_into(result);
        }
    }
}
