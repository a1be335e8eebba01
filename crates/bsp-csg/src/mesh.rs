//! Triangle mesh export.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::polygon::Polygon;
use crate::vertex::CsgVertex;

/// Floats stored per vertex: position (x, y, z) then normal (nx, ny, nz).
pub const FLOATS_PER_VERTEX: usize = 6;

/// Indexed triangle mesh ready for upload to a renderer.
///
/// Every polygon contributes its own vertices (nothing is welded), so flat
/// shading normals survive.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleMesh {
    /// Interleaved vertex data, [`FLOATS_PER_VERTEX`] floats per vertex.
    pub vertices: Vec<f32>,
    /// Triangle indices (i0, i1, i2), counter-clockwise from the front.
    pub indices: Vec<u32>,
    /// Material tag of the solid the mesh was made from.
    pub material: u32,
    /// Translation recorded on the solid, for the renderer's model matrix.
    pub translation: [f32; 3],
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count * FLOATS_PER_VERTEX),
            indices: Vec::with_capacity(index_count),
            ..Self::default()
        }
    }

    /// Fan-triangulates every polygon from its first vertex: a polygon with
    /// vertices `0..n` yields triangles `(0, 1, 2), (0, 2, 3), ..., (0, n-2, n-1)`.
    pub fn from_polygons<V: CsgVertex, S: Clone>(polygons: &[Polygon<V, S>]) -> Self {
        let vertex_count: usize = polygons.iter().map(|p| p.vertices().len()).sum();
        let triangle_count: usize = polygons
            .iter()
            .map(|p| p.vertices().len().saturating_sub(2))
            .sum();

        let mut mesh = Self::with_capacity(vertex_count, triangle_count * 3);
        for polygon in polygons {
            let first = mesh.vertex_count() as u32;
            for vertex in polygon.vertices() {
                mesh.add_vertex(vertex.position(), vertex.normal());
            }
            for i in 2..polygon.vertices().len() as u32 {
                mesh.add_triangle(first, first + i - 1, first + i);
            }
        }
        mesh
    }

    /// Add a vertex with normal
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f32>, normal: Vector3<f32>) {
        self.vertices.extend_from_slice(&[
            position.x, position.y, position.z, normal.x, normal.y, normal.z,
        ]);
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    /// Position of vertex `index`, if it exists.
    pub fn position(&self, index: usize) -> Option<Point3<f32>> {
        let start = index * FLOATS_PER_VERTEX;
        let chunk = self.vertices.get(start..start + 3)?;
        Some(Point3::new(chunk[0], chunk[1], chunk[2]))
    }

    /// Normal of vertex `index`, if it exists.
    pub fn normal(&self, index: usize) -> Option<Vector3<f32>> {
        let start = index * FLOATS_PER_VERTEX + 3;
        let chunk = self.vertices.get(start..start + 3)?;
        Some(Vector3::new(chunk[0], chunk[1], chunk[2]))
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
