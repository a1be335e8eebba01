//! Primitive solids.

use std::f32::consts::{PI, TAU};

use nalgebra::{Point3, Vector3};

use crate::error::{GeometryError, Result};
use crate::polygon::Polygon;
use crate::solid::Solid;
use crate::vertex::Vertex;

/// Number of segments around the axis of [`Solid::cylinder`].
pub const CYLINDER_SLICES: usize = 32;

/// Corner indices and outward normal of each cube face. Bit 0 of a corner
/// index selects +x, bit 1 +y, bit 2 +z.
const CUBE_FACES: [([usize; 4], [f32; 3]); 6] = [
    ([0, 4, 6, 2], [-1.0, 0.0, 0.0]),
    ([1, 3, 7, 5], [1.0, 0.0, 0.0]),
    ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
    ([2, 6, 7, 3], [0.0, 1.0, 0.0]),
    ([0, 2, 3, 1], [0.0, 0.0, -1.0]),
    ([4, 5, 7, 6], [0.0, 0.0, 1.0]),
];

fn sign(corner: usize, bit: usize) -> f32 {
    if corner & bit != 0 { 1.0 } else { -1.0 }
}

impl Solid<Vertex, ()> {
    /// An untagged box. See [`Solid::tagged_cube`].
    pub fn cube(center: Point3<f32>, radius: Vector3<f32>) -> Result<Self> {
        Self::tagged_cube(center, radius, ())
    }

    /// The cube centered at the origin with half extent 1.
    pub fn unit_cube() -> Result<Self> {
        Self::cube(Point3::origin(), Vector3::repeat(1.0))
    }

    /// An untagged sphere. See [`Solid::tagged_sphere`].
    pub fn sphere(center: Point3<f32>, radius: f32, slices: usize, stacks: usize) -> Result<Self> {
        Self::tagged_sphere(center, radius, slices, stacks, ())
    }

    /// Sphere of radius 1 at the origin, 16 slices and 8 stacks.
    pub fn unit_sphere() -> Result<Self> {
        Self::sphere(Point3::origin(), 1.0, 16, 8)
    }

    /// An untagged cylinder. See [`Solid::tagged_cylinder`].
    pub fn cylinder() -> Result<Self> {
        Self::tagged_cylinder(())
    }
}

impl<S: Clone> Solid<Vertex, S> {
    /// An axis-aligned box with the given center and per-axis half extents.
    ///
    /// Six quads, each with flat outward vertex normals, all tagged `shared`.
    pub fn tagged_cube(center: Point3<f32>, radius: Vector3<f32>, shared: S) -> Result<Self> {
        if radius.iter().any(|r| !r.is_finite() || *r <= 0.0) {
            return Err(GeometryError::InvalidShape(format!(
                "cube radius must be positive, got {radius:?}"
            )));
        }

        let polygons = CUBE_FACES
            .iter()
            .map(|(corners, normal)| {
                let normal = Vector3::from(*normal);
                let vertices = corners
                    .iter()
                    .map(|&corner| {
                        let offset = Vector3::new(
                            radius.x * sign(corner, 1),
                            radius.y * sign(corner, 2),
                            radius.z * sign(corner, 4),
                        );
                        Vertex::new(center + offset, normal)
                    })
                    .collect();
                Polygon::new(vertices, shared.clone())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_polygons(polygons))
    }

    /// A UV sphere: `slices` segments around the y axis, `stacks` bands
    /// from pole to pole.
    ///
    /// Bands touching a pole are triangles, all others quads. Vertex
    /// normals point radially outward for smooth shading.
    pub fn tagged_sphere(
        center: Point3<f32>,
        radius: f32,
        slices: usize,
        stacks: usize,
        shared: S,
    ) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeometryError::InvalidShape(format!(
                "sphere radius must be positive, got {radius}"
            )));
        }
        if slices < 3 || stacks < 2 {
            return Err(GeometryError::InvalidShape(format!(
                "sphere needs at least 3 slices and 2 stacks, got {slices} and {stacks}"
            )));
        }

        let vertex = |i: usize, j: usize| {
            let theta = i as f32 / slices as f32 * TAU;
            let phi = j as f32 / stacks as f32 * PI;
            let dir = Vector3::new(theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin());
            Vertex::new(center + dir * radius, dir)
        };

        let mut polygons = Vec::with_capacity(slices * stacks);
        for i in 0..slices {
            for j in 0..stacks {
                let mut vertices = Vec::with_capacity(4);
                vertices.push(vertex(i, j));
                if j > 0 {
                    vertices.push(vertex(i + 1, j));
                }
                if j < stacks - 1 {
                    vertices.push(vertex(i + 1, j + 1));
                }
                vertices.push(vertex(i, j + 1));
                polygons.push(Polygon::new(vertices, shared.clone())?);
            }
        }

        Ok(Self::from_polygons(polygons))
    }

    /// A cylinder of radius 1 along the z axis from `z = -1` to `z = 1`,
    /// with [`CYLINDER_SLICES`] segments.
    ///
    /// Each segment contributes a bottom cap triangle, a side quad and a top
    /// cap triangle. Caps have flat normals, sides radial ones.
    pub fn tagged_cylinder(shared: S) -> Result<Self> {
        let bottom = Vector3::new(0.0, 0.0, -1.0);
        let top = Vector3::new(0.0, 0.0, 1.0);
        let step = TAU / CYLINDER_SLICES as f32;

        let mut polygons = Vec::with_capacity(CYLINDER_SLICES * 3);
        for i in 0..CYLINDER_SLICES {
            let (a0, a1) = (step * i as f32, step * (i + 1) as f32);
            let (radial0, radial1) = (
                Vector3::new(a0.sin(), a0.cos(), 0.0),
                Vector3::new(a1.sin(), a1.cos(), 0.0),
            );
            let p1 = Point3::from(radial0 + bottom);
            let p2 = Point3::from(radial0 + top);
            let p3 = Point3::from(radial1 + bottom);
            let p4 = Point3::from(radial1 + top);

            polygons.push(Polygon::new(
                vec![
                    Vertex::new(Point3::from(bottom), bottom),
                    Vertex::new(p1, bottom),
                    Vertex::new(p3, bottom),
                ],
                shared.clone(),
            )?);
            polygons.push(Polygon::new(
                vec![
                    Vertex::new(p1, radial0),
                    Vertex::new(p2, radial0),
                    Vertex::new(p4, radial1),
                    Vertex::new(p3, radial1),
                ],
                shared.clone(),
            )?);
            polygons.push(Polygon::new(
                vec![
                    Vertex::new(Point3::from(top), top),
                    Vertex::new(p4, top),
                    Vertex::new(p2, top),
                ],
                shared.clone(),
            )?);
        }

        Ok(Self::from_polygons(polygons))
    }
}
