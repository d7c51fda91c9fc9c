//! Indexed point storage with coincidence-breaking jitter.
//!
//! Every point entering the store has its `x` coordinate nudged by a small
//! uniform random offset. Exactly coincident or axis-aligned collinear input
//! is common in interactive use (grid snapping, repeated clicks) and would
//! otherwise produce zero-area triangles in the sweep.

use crate::primitives::Point3;
use num_traits::Float;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A stored point and its position in the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex<F> {
    /// The jittered position.
    pub position: Point3<F>,
    /// Index of this vertex in the store.
    pub index: usize,
}

/// An ordered collection of points, indexed by insertion order.
///
/// Removal shifts later points down and renumbers them, so `index` always
/// equals the vertex's slot.
#[derive(Debug, Clone)]
pub struct PointStore<F> {
    vertices: Vec<Vertex<F>>,
    jitter: F,
    rng: StdRng,
}

impl<F: Float> PointStore<F> {
    /// Creates an empty store.
    ///
    /// `jitter` bounds the random offset added to `x`; zero stores points
    /// verbatim. A `seed` makes the offsets reproducible.
    pub fn new(jitter: F, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            vertices: Vec::new(),
            jitter,
            rng,
        }
    }

    /// Draws an offset in `[0, jitter)`.
    fn sample_jitter(&mut self) -> F {
        if self.jitter <= F::zero() {
            return F::zero();
        }
        let unit: f64 = self.rng.random();
        F::from(unit).map_or(F::zero(), |u| u * self.jitter)
    }

    /// Appends a point and returns the new store size.
    ///
    /// Coordinates are not validated; NaN or infinite input is stored as is.
    pub fn push(&mut self, position: Point3<F>) -> usize {
        let dx = self.sample_jitter();
        let index = self.vertices.len();
        self.vertices.push(Vertex {
            position: position.shifted_x(dx),
            index,
        });
        self.vertices.len()
    }

    /// Appends every position in order and returns the new store size.
    pub fn extend<I>(&mut self, positions: I) -> usize
    where
        I: IntoIterator<Item = Point3<F>>,
    {
        for position in positions {
            self.push(position);
        }
        self.vertices.len()
    }

    /// Removes the vertex at `index`, renumbering the ones after it.
    ///
    /// Returns `None` and leaves the store unchanged when out of range.
    pub fn remove(&mut self, index: usize) -> Option<Vertex<F>> {
        if index >= self.vertices.len() {
            return None;
        }
        let removed = self.vertices.remove(index);
        for (slot, vertex) in self.vertices.iter_mut().enumerate().skip(index) {
            vertex.index = slot;
        }
        Some(removed)
    }

    /// Replaces the vertex at `index` with a freshly jittered position.
    ///
    /// Returns the previous vertex, or `None` when out of range.
    pub fn replace(&mut self, index: usize, position: Point3<F>) -> Option<Vertex<F>> {
        if index >= self.vertices.len() {
            return None;
        }
        let dx = self.sample_jitter();
        let previous = self.vertices[index];
        self.vertices[index] = Vertex {
            position: position.shifted_x(dx),
            index,
        };
        Some(previous)
    }

    /// Returns the vertex at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Vertex<F>> {
        self.vertices.get(index)
    }

    /// Returns the position of the vertex at `index`.
    #[inline]
    pub fn position(&self, index: usize) -> Option<Point3<F>> {
        self.vertices.get(index).map(|v| v.position)
    }

    /// All vertices in index order.
    #[inline]
    pub fn vertices(&self) -> &[Vertex<F>] {
        &self.vertices
    }

    /// Iterates positions in index order.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = Point3<F>> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    /// Number of stored points.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the store holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Removes every point. The jitter generator keeps its state.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}
