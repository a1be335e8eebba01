//! Visitor pattern for BSP tree traversal.
//!
//! Visitors allow custom processing of polygons during a pre-order walk of
//! the tree without coupling traversal logic to specific use cases.

use crate::polygon::Polygon;

/// Visitor for processing polygons during BSP tree traversal.
///
/// Implement this trait to define custom behavior when walking the tree.
/// Common uses include:
/// - Flattening the tree back into a polygon list
/// - Gathering statistics
pub trait BspVisitor<V, S> {
    /// Called once per non-empty node, with the polygons stored there.
    ///
    /// The polygons passed to this method all lie on the same plane.
    fn visit(&mut self, polygons: &[Polygon<V, S>]);
}

/// A simple visitor that collects all visited polygons.
#[derive(Debug)]
pub struct CollectingVisitor<V, S> {
    collected: Vec<Polygon<V, S>>,
}

impl<V, S> Default for CollectingVisitor<V, S> {
    fn default() -> Self {
        Self {
            collected: Vec::new(),
        }
    }
}

impl<V, S> CollectingVisitor<V, S> {
    /// Creates a new empty collecting visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collecting visitor with room for `capacity` polygons.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            collected: Vec::with_capacity(capacity),
        }
    }

    /// Returns the collected polygons.
    pub fn into_polygons(self) -> Vec<Polygon<V, S>> {
        self.collected
    }

    /// Returns a reference to the collected polygons.
    pub fn polygons(&self) -> &[Polygon<V, S>] {
        &self.collected
    }
}

impl<V: Clone, S: Clone> BspVisitor<V, S> for CollectingVisitor<V, S> {
    fn visit(&mut self, polygons: &[Polygon<V, S>]) {
        self.collected.extend(polygons.iter().cloned());
    }
}

/// A visitor that calls a closure for each polygon group.
pub struct FnVisitor<F> {
    func: F,
}

impl<F> FnVisitor<F> {
    /// Creates a new visitor from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<V, S, F> BspVisitor<V, S> for FnVisitor<F>
where
    F: FnMut(&[Polygon<V, S>]),
{
    fn visit(&mut self, polygons: &[Polygon<V, S>]) {
        (self.func)(polygons);
    }
}
