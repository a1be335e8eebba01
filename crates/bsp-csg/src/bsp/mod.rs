//! Solid BSP trees for constructive solid geometry.
//!
//! A tree recursively partitions space with planes taken from its polygons.
//! Together the polygons bound a solid: each leaf region behind a plane is
//! inside, each region in front is outside. That classification is what the
//! boolean operations on [`Solid`](crate::Solid) are built from:
//!
//! - [`BspNode::build`] inserts polygons, splitting them where needed
//! - [`BspNode::clip_polygons`] removes the parts of a polygon list inside the solid
//! - [`BspNode::clip_to`] removes the parts of one tree inside another
//! - [`BspNode::invert`] swaps solid and empty space
//!
//! # Example
//!
//! ```ignore
//! use bsp_csg::bsp::{BspNode, FirstPolygon};
//! use bsp_csg::Solid;
//! use nalgebra::Point3;
//!
//! let cube: Solid = Solid::unit_cube()?;
//! let tree = BspNode::from_polygons(cube.into_polygons(), &mut FirstPolygon);
//!
//! assert!(tree.contains_point(&Point3::origin()));
//! assert_eq!(tree.polygon_count(), 6);
//! ```
//!
//! # Architecture
//!
//! - [`BspNode`]: A splitting plane, its coplanar polygons and two optional subtrees
//! - [`PlaneSelector`]: Strategy trait for choosing splitting planes
//! - [`BspVisitor`]: Visitor trait for walking the stored polygons

mod build;
mod clip;
mod node;
mod selector;
mod visitor;

pub use node::BspNode;
pub use selector::{BalancedSplit, FirstPolygon, PlaneSelector, RandomPolygon};
pub use visitor::{BspVisitor, CollectingVisitor, FnVisitor};
