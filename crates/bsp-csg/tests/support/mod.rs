//! Test support library
//! Brute-force point classification and sampling helpers for volume tests.
#![allow(dead_code)]

use bsp_csg::{Aabb, CsgVertex, Polygon, Solid, Vertex};
use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Points closer than this to an operand plane are skipped: which side of a
/// surface they land on is unspecified.
pub const PLANE_MARGIN: f32 = 1e-3;

/// Uniformly distributed points in `bounds`, reproducible per seed.
pub fn sample_points(bounds: &Aabb, count: usize, seed: u64) -> Vec<Point3<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Point3::new(
                rng.random_range(bounds.mins.x..bounds.maxs.x),
                rng.random_range(bounds.mins.y..bounds.maxs.y),
                rng.random_range(bounds.mins.z..bounds.maxs.z),
            )
        })
        .collect()
}

/// Like [`sample_points`], but drops points within [`PLANE_MARGIN`] of any
/// polygon plane of the given solids.
pub fn sample_clear_points(
    bounds: &Aabb,
    count: usize,
    seed: u64,
    solids: &[&Solid],
) -> Vec<Point3<f32>> {
    sample_points(bounds, count, seed)
        .into_iter()
        .filter(|p| !solids.iter().any(|s| near_any_plane(s.polygons(), p)))
        .collect()
}

pub fn near_any_plane(polygons: &[Polygon], point: &Point3<f32>) -> bool {
    polygons
        .iter()
        .any(|p| p.plane().signed_distance(point).abs() < PLANE_MARGIN)
}

/// Ray-parity inside test, independent of any BSP tree: counts how many
/// polygons a ray from `point` crosses.
pub fn inside_by_ray_parity(polygons: &[Polygon], point: &Point3<f32>) -> bool {
    // A direction unlikely to graze edges of axis-aligned or lat-long geometry.
    let direction = Vector3::new(0.3127, 0.7531, 0.5789).normalize();
    let crossings = polygons
        .iter()
        .filter(|polygon| ray_hits(polygon, point, &direction))
        .count();
    crossings % 2 == 1
}

fn ray_hits(polygon: &Polygon, origin: &Point3<f32>, direction: &Vector3<f32>) -> bool {
    let plane = polygon.plane();
    let normal = plane.normal();
    let denom = normal.dot(direction);
    if denom.abs() < 1e-9 {
        return false;
    }
    let t = -plane.signed_distance(origin) / denom;
    if t <= 0.0 {
        return false;
    }
    let hit = origin + direction * t;

    let vertices = polygon.vertices();
    (0..vertices.len()).all(|i| {
        let a = vertices[i].position();
        let b = vertices[(i + 1) % vertices.len()].position();
        (b - a).cross(&(hit - a)).dot(&normal) >= 0.0
    })
}

/// Analytic test for the box `center ± radius`.
pub fn inside_box(center: Point3<f32>, radius: f32, point: &Point3<f32>) -> bool {
    (point - center).iter().all(|c| c.abs() < radius)
}

/// Sum of the areas of `polygons`.
pub fn total_area(polygons: &[&Polygon]) -> f32 {
    polygons.iter().map(|p| area(p.vertices())).sum()
}

pub fn area(vertices: &[Vertex]) -> f32 {
    let first = vertices[0].pos;
    let doubled: Vector3<f32> = vertices
        .windows(2)
        .skip(1)
        .map(|w| (w[0].pos - first).cross(&(w[1].pos - first)))
        .sum();
    doubled.norm() / 2.0
}

/// Number of sampled points on which two classifiers disagree.
pub fn mismatches<F, G>(points: &[Point3<f32>], mut expected: F, mut actual: G) -> usize
where
    F: FnMut(&Point3<f32>) -> bool,
    G: FnMut(&Point3<f32>) -> bool,
{
    points.iter().filter(|&p| expected(p) != actual(p)).count()
}
