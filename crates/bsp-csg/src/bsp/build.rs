//! BSP tree construction.

use log::trace;

use crate::cuttable::{Cuttable, Split};
use crate::polygon::Polygon;
use crate::vertex::CsgVertex;

use super::node::BspNode;
use super::selector::PlaneSelector;

impl<V: CsgVertex, S: Clone> BspNode<V, S> {
    /// Builds (or extends) the tree from a list of polygons.
    ///
    /// If this node has no plane yet, the [`PlaneSelector`] picks one of the
    /// input polygons and its plane becomes the splitting plane. Every input
    /// polygon is then split against the plane: coplanar polygons (either
    /// facing) stay at this node, front and back pieces are built into
    /// lazily created children.
    ///
    /// Calling `build` on an already built tree filters the new polygons
    /// down through the existing planes; they land beside existing coplanar
    /// polygons or become new nodes at the bottom.
    pub fn build<P: PlaneSelector>(&mut self, polygons: Vec<Polygon<V, S>>, selector: &mut P) {
        if polygons.is_empty() {
            return;
        }

        let plane = match self.plane {
            Some(plane) => plane,
            None => {
                let index = selector
                    .select(&polygons)
                    .filter(|&index| index < polygons.len())
                    .unwrap_or(0);
                let plane = *polygons[index].plane();
                self.plane = Some(plane);
                plane
            }
        };

        let mut front_list = Vec::new();
        let mut back_list = Vec::new();

        for polygon in polygons {
            match polygon.cut(&plane) {
                Split::CoplanarFront(polygon) | Split::CoplanarBack(polygon) => {
                    self.polygons.push(polygon);
                }
                Split::Front(polygon) => front_list.push(polygon),
                Split::Back(polygon) => back_list.push(polygon),
                Split::Spanning { front, back } => {
                    front_list.extend(front);
                    back_list.extend(back);
                }
            }
        }

        trace!(
            "node holds {} coplanar polygons, passing {} front and {} back",
            self.polygons.len(),
            front_list.len(),
            back_list.len()
        );

        if !front_list.is_empty() {
            self.front
                .get_or_insert_with(Default::default)
                .build(front_list, selector);
        }
        if !back_list.is_empty() {
            self.back
                .get_or_insert_with(Default::default)
                .build(back_list, selector);
        }
    }
}
