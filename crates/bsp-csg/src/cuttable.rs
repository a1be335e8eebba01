//! Polygon cutting/splitting operations for BSP trees.

use log::trace;

use crate::plane::{Classification, Plane, PlaneSide};
use crate::polygon::Polygon;
use crate::vertex::CsgVertex;

/// Where a polygon ended up after being split by a plane.
#[derive(Debug, Clone, PartialEq)]
pub enum Split<V, S> {
    /// On the plane, facing the same way as the plane normal.
    CoplanarFront(Polygon<V, S>),
    /// On the plane, facing against the plane normal.
    CoplanarBack(Polygon<V, S>),
    /// Entirely in front of the plane (possibly touching it).
    Front(Polygon<V, S>),
    /// Entirely behind the plane (possibly touching it).
    Back(Polygon<V, S>),
    /// Crossed the plane and was cut in two. A side is `None` when its
    /// fragment collapsed to fewer than 3 vertices.
    Spanning {
        front: Option<Polygon<V, S>>,
        back: Option<Polygon<V, S>>,
    },
}

/// Trait for geometry that can be cut by a plane.
pub trait Cuttable<V, S> {
    /// Cuts the geometry by a plane.
    ///
    /// # Return values by classification
    ///
    /// - **Coplanar**: `CoplanarFront(self)` or `CoplanarBack(self)` depending
    ///   on whether the polygon faces the same way as the plane
    /// - **Front**: `Front(self)`
    /// - **Back**: `Back(self)`
    /// - **Spanning**: `Spanning { front, back }` with the two pieces
    fn cut(self, plane: &Plane) -> Split<V, S>;
}

impl<V: CsgVertex, S: Clone> Cuttable<V, S> for Polygon<V, S> {
    fn cut(self, plane: &Plane) -> Split<V, S> {
        plane.split_polygon(self)
    }
}

impl Plane {
    /// Splits `polygon` by this plane.
    ///
    /// Coplanar polygons are told apart by facing, which keeps two coincident
    /// surfaces from different solids distinguishable. Spanning polygons are
    /// cut Sutherland-Hodgman style: walk the edges, keep each vertex on its
    /// side (on-plane vertices go to both), and insert an interpolated vertex
    /// into both pieces wherever an edge crosses from strictly front to
    /// strictly back or vice versa. Both pieces keep the original plane and
    /// shared tag.
    pub fn split_polygon<V: CsgVertex, S: Clone>(&self, polygon: Polygon<V, S>) -> Split<V, S> {
        let sides: Vec<PlaneSide> = polygon
            .vertices()
            .iter()
            .map(|v| self.classify_point(&v.position()))
            .collect();
        let classification = sides
            .iter()
            .fold(Classification::Coplanar, |acc, side| acc | *side);

        match classification {
            Classification::Coplanar => {
                if self.faces_same_direction(polygon.plane()) {
                    Split::CoplanarFront(polygon)
                } else {
                    Split::CoplanarBack(polygon)
                }
            }
            Classification::Front => Split::Front(polygon),
            Classification::Back => Split::Back(polygon),
            Classification::Spanning => self.split_spanning(&polygon, &sides),
        }
    }

    fn split_spanning<V: CsgVertex, S: Clone>(
        &self,
        polygon: &Polygon<V, S>,
        sides: &[PlaneSide],
    ) -> Split<V, S> {
        let vertices = polygon.vertices();
        let n = vertices.len();

        let mut front_verts = Vec::with_capacity(n + 1);
        let mut back_verts = Vec::with_capacity(n + 1);

        for i in 0..n {
            let j = (i + 1) % n;
            let (current, next) = (&vertices[i], &vertices[j]);
            let (current_side, next_side) = (sides[i], sides[j]);

            if current_side != PlaneSide::Back {
                front_verts.push(current.clone());
            }
            if current_side != PlaneSide::Front {
                back_verts.push(current.clone());
            }

            let crosses = matches!(
                (current_side, next_side),
                (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
            );
            if crosses {
                let t = self.edge_parameter(&current.position(), &next.position());
                let intersection = current.interpolate(next, t);
                front_verts.push(intersection.clone());
                back_verts.push(intersection);
            }
        }

        let front = piece(front_verts, polygon);
        let back = piece(back_verts, polygon);
        Split::Spanning { front, back }
    }
}

/// Builds a fragment of `source`, dropping slivers with fewer than 3 vertices.
fn piece<V: CsgVertex, S: Clone>(vertices: Vec<V>, source: &Polygon<V, S>) -> Option<Polygon<V, S>> {
    if vertices.len() >= 3 {
        Some(Polygon::with_plane(
            vertices,
            source.shared().clone(),
            *source.plane(),
        ))
    } else {
        trace!("dropping degenerate fragment with {} vertices", vertices.len());
        None
    }
}
