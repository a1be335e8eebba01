//! Constructive solid geometry on polygon soups, using solid BSP trees.
//!
//! A [`Solid`] is a list of convex [`Polygon`]s bounding a volume. Two solids
//! combine with [`Solid::union`], [`Solid::subtract`] and
//! [`Solid::intersect`]; each operation builds a [`bsp::BspNode`] per operand,
//! clips the trees against each other and flattens the result.
//!
//! ```
//! use bsp_csg::Solid;
//! use nalgebra::{Point3, Vector3};
//!
//! # fn main() -> bsp_csg::Result<()> {
//! let outer: Solid = Solid::unit_cube()?;
//! let inner: Solid = Solid::cube(Point3::origin(), Vector3::repeat(0.5))?;
//! let hollow = outer.subtract(&inner);
//!
//! assert!(hollow.contains_point(&Point3::new(0.75, 0.0, 0.0)));
//! assert!(!hollow.contains_point(&Point3::origin()));
//!
//! let mesh = hollow.to_triangle_mesh();
//! assert_eq!(mesh.indices.len() % 3, 0);
//! # Ok(())
//! # }
//! ```

pub mod bounds;
pub mod bsp;
pub mod cuttable;
pub mod error;
pub mod mesh;
pub mod plane;
pub mod polygon;
mod shapes;
pub mod solid;
pub mod transform;
pub mod vertex;

pub use bounds::Aabb;
pub use cuttable::{Cuttable, Split};
pub use error::{GeometryError, Result};
pub use mesh::TriangleMesh;
pub use plane::{Classification, PLANE_EPSILON, Plane, PlaneSide};
pub use polygon::Polygon;
pub use shapes::CYLINDER_SLICES;
pub use solid::Solid;
pub use transform::AffineTransform;
pub use vertex::{CsgVertex, Vertex};
