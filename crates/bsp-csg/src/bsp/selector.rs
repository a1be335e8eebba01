//! Plane selection strategies for BSP tree construction.
//!
//! The choice of splitting plane affects tree balance and the number of
//! polygon splits during construction. Different strategies offer different
//! trade-offs between build time, tree quality and reproducibility.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::plane::Classification;
use crate::polygon::Polygon;
use crate::vertex::CsgVertex;

/// Strategy for selecting which polygon's plane to use for splitting.
///
/// The selected polygon's plane becomes the splitting plane for a BSP node.
/// Selectors take `&mut self` so stateful strategies (such as a seeded random
/// generator) can be threaded explicitly through a whole build.
pub trait PlaneSelector {
    /// Select the index of a polygon in the slice to use as the splitting plane.
    ///
    /// Returns `None` if the slice is empty. Callers fall back to the first
    /// polygon if an out-of-range index is returned.
    fn select<V: CsgVertex, S: Clone>(&mut self, polygons: &[Polygon<V, S>]) -> Option<usize>;
}

impl<P: PlaneSelector> PlaneSelector for &mut P {
    fn select<V: CsgVertex, S: Clone>(&mut self, polygons: &[Polygon<V, S>]) -> Option<usize> {
        (**self).select(polygons)
    }
}

/// Selects the first polygon in the list.
///
/// This is the simplest and fastest selector, and fully deterministic, but
/// may produce unbalanced trees depending on input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPolygon;

impl PlaneSelector for FirstPolygon {
    fn select<V: CsgVertex, S: Clone>(&mut self, polygons: &[Polygon<V, S>]) -> Option<usize> {
        if polygons.is_empty() { None } else { Some(0) }
    }
}

/// Selects a polygon uniformly at random.
///
/// Random pivots avoid the worst-case trees that always picking the first
/// polygon produces on adversarially ordered input. Seed it for
/// reproducible trees.
#[derive(Debug, Clone)]
pub struct RandomPolygon {
    rng: StdRng,
}

impl RandomPolygon {
    /// Creates a selector with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a selector seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for RandomPolygon {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

impl PlaneSelector for RandomPolygon {
    fn select<V: CsgVertex, S: Clone>(&mut self, polygons: &[Polygon<V, S>]) -> Option<usize> {
        if polygons.is_empty() {
            None
        } else {
            Some(self.rng.random_range(0..polygons.len()))
        }
    }
}

/// Picks the candidate plane that minimizes `span_weight * spanning +
/// balance_weight * |front - back|`, scoring only the first
/// `sample_size` polygons as candidates.
#[derive(Debug, Clone, Copy)]
pub struct BalancedSplit {
    pub span_weight: f32,
    pub balance_weight: f32,
    pub sample_size: usize,
}

impl Default for BalancedSplit {
    fn default() -> Self {
        Self {
            span_weight: 8.0,
            balance_weight: 1.0,
            sample_size: 20,
        }
    }
}

impl BalancedSplit {
    fn score<V: CsgVertex, S: Clone>(&self, candidate: &Polygon<V, S>, polygons: &[Polygon<V, S>]) -> f32 {
        let plane = candidate.plane();
        let (mut front, mut back, mut spanning) = (0_i64, 0_i64, 0_i64);
        for polygon in polygons {
            match polygon.classify(plane) {
                Classification::Coplanar => {}
                Classification::Front => front += 1,
                Classification::Back => back += 1,
                Classification::Spanning => spanning += 1,
            }
        }
        self.span_weight * spanning as f32 + self.balance_weight * (front - back).abs() as f32
    }
}

impl PlaneSelector for BalancedSplit {
    fn select<V: CsgVertex, S: Clone>(&mut self, polygons: &[Polygon<V, S>]) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, candidate) in polygons.iter().enumerate().take(self.sample_size.max(1)) {
            let score = self.score(candidate, polygons);
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((index, score));
            }
        }
        best.map(|(index, _)| index)
    }
}
