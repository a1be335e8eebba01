//! Clipping polygons against a solid BSP tree.

use nalgebra::Point3;

use crate::cuttable::{Cuttable, Split};
use crate::plane::PlaneSide;
use crate::polygon::Polygon;
use crate::vertex::CsgVertex;

use super::node::BspNode;

impl<V: CsgVertex, S: Clone> BspNode<V, S> {
    /// Removes the parts of `polygons` that lie inside this tree's solid.
    ///
    /// An empty tree clips nothing. Otherwise polygons are split against the
    /// node's plane; coplanar pieces go with the front list when they face
    /// the plane's way and with the back list when they face against it.
    /// Each list then descends into its child. A back list with no back
    /// child is inside the solid and is dropped.
    pub fn clip_polygons(&self, polygons: Vec<Polygon<V, S>>) -> Vec<Polygon<V, S>> {
        let Some(plane) = self.plane else {
            return polygons;
        };

        let mut front_list = Vec::with_capacity(polygons.len());
        let mut back_list = Vec::with_capacity(polygons.len());

        for polygon in polygons {
            match polygon.cut(&plane) {
                Split::CoplanarFront(polygon) | Split::Front(polygon) => front_list.push(polygon),
                Split::CoplanarBack(polygon) | Split::Back(polygon) => back_list.push(polygon),
                Split::Spanning { front, back } => {
                    front_list.extend(front);
                    back_list.extend(back);
                }
            }
        }

        let mut result = match self.front {
            Some(ref front) => front.clip_polygons(front_list),
            None => front_list,
        };
        if let Some(ref back) = self.back {
            result.extend(back.clip_polygons(back_list));
        }
        result
    }

    /// Removes every polygon of this tree that lies inside `other`'s solid.
    pub fn clip_to(&mut self, other: &BspNode<V, S>) {
        let polygons = std::mem::take(&mut self.polygons);
        self.polygons = other.clip_polygons(polygons);

        if let Some(ref mut front) = self.front {
            front.clip_to(other);
        }
        if let Some(ref mut back) = self.back {
            back.clip_to(other);
        }
    }

    /// Returns `true` if `point` lies inside the solid this tree bounds.
    ///
    /// Points within epsilon of a splitting plane are treated as in front of
    /// it, so results on the surface itself are unspecified.
    pub fn contains_point(&self, point: &Point3<f32>) -> bool {
        let Some(ref plane) = self.plane else {
            return false;
        };
        match plane.classify_point(point) {
            PlaneSide::Back => self.back.as_ref().is_none_or(|back| back.contains_point(point)),
            PlaneSide::Front | PlaneSide::OnPlane => self
                .front
                .as_ref()
                .is_some_and(|front| front.contains_point(point)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::selector::FirstPolygon;
    use crate::vertex::Vertex;
    use nalgebra::Vector3;

    fn quad(points: [[f32; 3]; 4]) -> Polygon {
        Polygon::from_vertices(
            points
                .iter()
                .map(|p| Vertex::new(Point3::new(p[0], p[1], p[2]), Vector3::zeros()))
                .collect(),
        )
        .unwrap()
    }

    /// Outward-facing faces of the axis-aligned box `[lo, hi]^3`.
    fn box_faces(lo: f32, hi: f32) -> Vec<Polygon> {
        vec![
            quad([[lo, lo, lo], [lo, lo, hi], [lo, hi, hi], [lo, hi, lo]]),
            quad([[hi, lo, lo], [hi, hi, lo], [hi, hi, hi], [hi, lo, hi]]),
            quad([[lo, lo, lo], [hi, lo, lo], [hi, lo, hi], [lo, lo, hi]]),
            quad([[lo, hi, lo], [lo, hi, hi], [hi, hi, hi], [hi, hi, lo]]),
            quad([[lo, lo, lo], [lo, hi, lo], [hi, hi, lo], [hi, lo, lo]]),
            quad([[lo, lo, hi], [hi, lo, hi], [hi, hi, hi], [lo, hi, hi]]),
        ]
    }

    #[test]
    fn box_faces_point_outward() {
        for face in box_faces(-1.0, 1.0) {
            assert!(face.normal().dot(&face.centroid().coords) > 0.0);
        }
    }

    #[test]
    fn empty_tree_clips_nothing() {
        let tree: BspNode = BspNode::new();
        let polygons = box_faces(0.0, 1.0);
        assert_eq!(tree.clip_polygons(polygons.clone()), polygons);
    }

    #[test]
    fn clip_removes_inside_polygons() {
        let tree = BspNode::from_polygons(box_faces(-1.0, 1.0), &mut FirstPolygon);
        let inner = box_faces(-0.5, 0.5);
        assert!(tree.clip_polygons(inner).is_empty());
    }

    #[test]
    fn clip_keeps_outside_polygons() {
        let tree = BspNode::from_polygons(box_faces(-1.0, 1.0), &mut FirstPolygon);
        let outer = box_faces(2.0, 3.0);
        assert_eq!(tree.clip_polygons(outer.clone()).len(), outer.len());
    }

    #[test]
    fn clip_cuts_straddling_polygon() {
        let tree = BspNode::from_polygons(box_faces(-1.0, 1.0), &mut FirstPolygon);
        // A square in the z=0 plane reaching from x=0 to x=2.
        let straddling = quad([
            [0.0, -0.5, 0.0],
            [2.0, -0.5, 0.0],
            [2.0, 0.5, 0.0],
            [0.0, 0.5, 0.0],
        ]);

        let kept = tree.clip_polygons(vec![straddling]);
        assert_eq!(kept.len(), 1);
        assert!(kept[0].vertices().iter().all(|v| v.pos.x >= 1.0 - 1e-5));
    }

    #[test]
    fn coplanar_same_facing_survives_clip() {
        let tree = BspNode::from_polygons(box_faces(-1.0, 1.0), &mut FirstPolygon);
        // A patch on the +x face, facing outward like the face.
        let patch = quad([
            [1.0, -0.5, -0.5],
            [1.0, 0.5, -0.5],
            [1.0, 0.5, 0.5],
            [1.0, -0.5, 0.5],
        ]);
        assert_eq!(tree.clip_polygons(vec![patch]).len(), 1);
    }

    #[test]
    fn coplanar_opposite_facing_is_clipped() {
        let tree = BspNode::from_polygons(box_faces(-1.0, 1.0), &mut FirstPolygon);
        // Same patch with reversed winding faces into the box.
        let patch = quad([
            [1.0, -0.5, 0.5],
            [1.0, 0.5, 0.5],
            [1.0, 0.5, -0.5],
            [1.0, -0.5, -0.5],
        ]);
        assert!(tree.clip_polygons(vec![patch]).is_empty());
    }

    #[test]
    fn clip_to_removes_contained_tree() {
        let outer = BspNode::from_polygons(box_faces(-1.0, 1.0), &mut FirstPolygon);
        let mut inner = BspNode::from_polygons(box_faces(-0.5, 0.5), &mut FirstPolygon);

        inner.clip_to(&outer);
        assert_eq!(inner.polygon_count(), 0);
        // Structure survives even though every polygon was removed.
        assert!(!inner.is_empty());
    }

    #[test]
    fn contains_point_classifies_box() {
        let tree = BspNode::from_polygons(box_faces(-1.0, 1.0), &mut FirstPolygon);

        assert!(tree.contains_point(&Point3::new(0.0, 0.0, 0.0)));
        assert!(tree.contains_point(&Point3::new(0.9, -0.9, 0.5)));
        assert!(!tree.contains_point(&Point3::new(1.5, 0.0, 0.0)));
        assert!(!tree.contains_point(&Point3::new(0.0, -3.0, 0.0)));
        assert!(!tree.contains_point(&Point3::new(2.0, 2.0, 2.0)));
    }

    #[test]
    fn inverted_tree_contains_complement() {
        let mut tree = BspNode::from_polygons(box_faces(-1.0, 1.0), &mut FirstPolygon);
        tree.invert();

        assert!(!tree.contains_point(&Point3::new(0.0, 0.0, 0.0)));
        assert!(tree.contains_point(&Point3::new(1.5, 0.0, 0.0)));
    }

    #[test]
    fn empty_tree_contains_nothing() {
        let tree: BspNode = BspNode::new();
        assert!(!tree.contains_point(&Point3::origin()));
    }
}
