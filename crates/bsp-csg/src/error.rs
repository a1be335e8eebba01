//! Error types for geometry construction.

use thiserror::Error;

/// Result type for fallible geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Errors raised when input geometry cannot describe a valid polygon or solid.
///
/// Boolean operations themselves never fail: malformed geometry is rejected
/// where it enters the crate (plane and polygon construction, primitive
/// builders, singular transforms).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("points are collinear or non-finite and do not define a plane")]
    DegeneratePlane,

    #[error("vertex {index} lies {distance} away from the polygon plane")]
    NonCoplanarVertex { index: usize, distance: f32 },

    #[error("vertex coordinates must be finite")]
    NonFiniteCoordinate,

    #[error("transform is singular and would collapse the geometry")]
    SingularTransform,

    #[error("invalid shape parameters: {0}")]
    InvalidShape(String),
}
