//! Sweep-line Delaunay triangulation.
//!
//! A variant of the Bowyer-Watson incremental algorithm that processes points
//! in ascending x order. Because no later point can lie left of the current
//! one, any triangle whose circumcircle ends left of the sweep position is
//! final and is never tested again.
//!
//! # Algorithm
//!
//! 1. Write a super-triangle enclosing every point into the working copy's
//!    sentinel slots
//! 2. For each point, remove the triangles whose circumcircle contains it and
//!    collect their edges. Containment allows `d² - r²` up to `epsilon * r²`,
//!    capped at `epsilon` times the squared extent of the input
//! 3. Edges collected twice are interior to the cavity and are discarded
//! 4. Connect the point to every remaining edge
//! 5. Drop triangles that use a super-triangle vertex
//!
//! # Complexity
//!
//! - Time: O(n^1.5) typical for uniform points, O(n²) worst case
//! - Space: O(n)
//!
//! # Example
//!
//! ```
//! use sweepmesh::store::PointStore;
//! use sweepmesh::triangulation::{Sweep, WorkingCopy};
//! use sweepmesh::Point3;
//!
//! let mut store: PointStore<f64> = PointStore::new(0.0, None);
//! store.extend([
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 0.0),
//! ]);
//!
//! let mut working = WorkingCopy::full(&store);
//! let mut sweep = Sweep::new(1e-6);
//!
//! // Square with center point
//! assert_eq!(sweep.run(&mut working), 4);
//! ```

use super::triangle::{Edge, Triangle};
use super::working::WorkingCopy;
use crate::primitives::Point2;
use crate::tolerance::{circumcircle, signed_area2};
use num_traits::Float;
use tracing::trace;

/// How far the super-triangle reaches beyond the bounding box, in units of
/// the box's larger side.
const SUPER_TRIANGLE_SCALE: f64 = 20.0;

/// Reusable triangulator state.
///
/// Buffers keep their capacity between runs; each run clears and refills
/// them. After a run, [`triangles`](Self::triangles) holds exactly the
/// triangles produced, indexed by working-copy position.
#[derive(Debug, Clone)]
pub struct Sweep<F> {
    triangles: Vec<Triangle>,
    complete: Vec<bool>,
    edges: Vec<Edge>,
    epsilon: F,
}

impl<F: Float> Sweep<F> {
    /// Creates a triangulator with the given tolerance.
    pub fn new(epsilon: F) -> Self {
        Self {
            triangles: Vec::new(),
            complete: Vec::new(),
            edges: Vec::new(),
            epsilon,
        }
    }

    /// Triangles from the last run, over working-copy positions.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Allocated triangle slots. Never shrinks.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.triangles.capacity()
    }

    /// Discards the last run's triangles, keeping the allocation.
    pub fn clear(&mut self) {
        self.triangles.clear();
        self.complete.clear();
        self.edges.clear();
    }

    /// Triangulates the working copy and returns the triangle count.
    ///
    /// Fills the working copy's sentinel slots with the super-triangle.
    /// Returns 0 with no triangles when fewer than 3 points are present.
    pub fn run(&mut self, working: &mut WorkingCopy<F>) -> usize {
        self.clear();

        let n = working.len();
        if n < 3 {
            return 0;
        }

        let (sentinels, extent) = super_triangle(&working.points()[..n]);
        working.set_sentinels(sentinels);
        let points = working.points();
        let eps = self.epsilon;
        // Caps the allowance of the huge circles through super-triangle vertices.
        let limit = eps * extent * extent;

        self.triangles.reserve(3 * n);
        self.complete.reserve(3 * n);
        self.triangles.push(Triangle::new(n, n + 1, n + 2));
        self.complete.push(false);

        for (i, &p) in points.iter().enumerate().take(n) {
            self.edges.clear();

            // Carve out the cavity: every open triangle whose circumcircle holds p.
            let mut j = 0;
            while j < self.triangles.len() {
                if self.complete[j] {
                    j += 1;
                    continue;
                }

                let tri = self.triangles[j];
                let Some(circle) = circumcircle(points[tri.a], points[tri.b], points[tri.c], eps)
                else {
                    j += 1;
                    continue;
                };

                let allowance = circle.allowance(eps, limit);
                if circle.is_left_of(p.x, allowance) {
                    self.complete[j] = true;
                }

                if circle.contains_within(p, allowance) {
                    self.edges
                        .extend(tri.edges().into_iter().map(|(a, b)| Edge::new(a, b)));
                    self.triangles.swap_remove(j);
                    self.complete.swap_remove(j);
                } else {
                    j += 1;
                }
            }

            // Shared edges appear twice after sorting; only singletons bound the cavity.
            self.edges.sort_unstable();
            let mut k = 0;
            while k < self.edges.len() {
                let edge = self.edges[k];
                let mut run = 1;
                while k + run < self.edges.len() && self.edges[k + run] == edge {
                    run += 1;
                }
                if run == 1 {
                    if let Some(tri) = fan_triangle(points, edge, i, eps) {
                        self.triangles.push(tri);
                        self.complete.push(false);
                    } else {
                        trace!(a = edge.0, b = edge.1, point = i, "skipped degenerate triangle");
                    }
                }
                k += run;
            }
        }

        self.triangles.retain(|t| t.a < n && t.b < n && t.c < n);
        self.complete.clear();
        self.triangles.len()
    }
}

/// Super-triangle enclosing `points` with a wide margin, and the larger side
/// of their bounding box (1 when the box is empty).
fn super_triangle<F: Float>(points: &[Point2<F>]) -> ([Point2<F>; 3], F) {
    let mut min_x = points[0].x;
    let mut max_x = points[0].x;
    let mut min_y = points[0].y;
    let mut max_y = points[0].y;

    for p in points.iter().skip(1) {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let two = F::one() + F::one();
    let dx = max_x - min_x;
    let dy = max_y - min_y;
    let mut delta = dx.max(dy);
    if delta.is_nan() || delta <= F::zero() {
        delta = F::one();
    }
    let mid_x = (min_x + max_x) / two;
    let mid_y = (min_y + max_y) / two;
    let reach = F::from(SUPER_TRIANGLE_SCALE).unwrap_or_else(F::one) * delta;

    (
        [
            Point2::new(mid_x - reach, mid_y - delta),
            Point2::new(mid_x, mid_y + reach),
            Point2::new(mid_x + reach, mid_y - delta),
        ],
        delta,
    )
}

/// Joins working point `apex` to cavity edge `edge`, counter-clockwise.
///
/// Returns `None` if the three points are collinear within tolerance.
fn fan_triangle<F: Float>(
    points: &[Point2<F>],
    edge: Edge,
    apex: usize,
    eps: F,
) -> Option<Triangle> {
    let a = points[edge.0];
    let b = points[edge.1];
    let p = points[apex];

    circumcircle(a, b, p, eps)?;

    if signed_area2(a, b, p) > F::zero() {
        Some(Triangle::new(edge.0, edge.1, apex))
    } else {
        Some(Triangle::new(edge.1, edge.0, apex))
    }
}
