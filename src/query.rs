//! Picking and hit-testing against a point store and its triangulation.
//!
//! Every query is a linear scan. Nothing here mutates the store or the mesh.

use crate::primitives::{Point2, Point3};
use crate::store::{PointStore, Vertex};
use crate::tolerance::{circumcircle, point_in_triangle};
use crate::triangulation::Triangle;
use num_traits::Float;

/// A successful nearest-point lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPoint<F> {
    /// Store index of the closest vertex.
    pub index: usize,
    /// Its position.
    pub position: Point3<F>,
    /// Distance in the xy plane.
    pub distance: F,
}

/// Finds the vertex closest to `target` in the xy plane.
///
/// Returns `None` when the closest vertex is farther than `max_distance`
/// or when there are no vertices. On ties the vertex that comes first wins.
///
/// # Example
///
/// ```
/// use sweepmesh::query::nearest_point;
/// use sweepmesh::store::PointStore;
/// use sweepmesh::{Point2, Point3};
///
/// let mut store: PointStore<f64> = PointStore::new(0.0, None);
/// store.push(Point3::new(0.0, 0.0, 0.0));
///
/// assert!(nearest_point(store.vertices(), Point2::new(100.0, 100.0), 1.0).is_none());
///
/// let hit = nearest_point(store.vertices(), Point2::new(0.5, 0.0), 1.0).unwrap();
/// assert_eq!(hit.index, 0);
/// ```
pub fn nearest_point<F: Float>(
    vertices: &[Vertex<F>],
    target: Point2<F>,
    max_distance: F,
) -> Option<NearestPoint<F>> {
    let mut best: Option<(usize, F)> = None;
    for (i, v) in vertices.iter().enumerate() {
        let d = v.position.xy().distance(target);
        if best.map_or(d < F::infinity(), |(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }

    let (index, distance) = best?;
    if distance > max_distance {
        return None;
    }
    Some(NearestPoint {
        index,
        position: vertices[index].position,
        distance,
    })
}

/// Looks up the store positions of a triangle's corners.
///
/// Returns `None` if any index is outside the store.
pub fn triangle_points<F: Float>(
    store: &PointStore<F>,
    triangle: Triangle,
) -> Option<[Point3<F>; 3]> {
    Some([
        store.position(triangle.a)?,
        store.position(triangle.b)?,
        store.position(triangle.c)?,
    ])
}

/// Finds the first triangle that strictly contains `p`.
///
/// Triangles are tested in iteration order against current store positions.
/// Points on an edge or vertex are not contained. Triangles that name an
/// index outside the store are skipped.
pub fn triangle_containing<F, I>(
    store: &PointStore<F>,
    triangles: I,
    p: Point2<F>,
) -> Option<Triangle>
where
    F: Float,
    I: IntoIterator<Item = Triangle>,
{
    triangles.into_iter().find(|&tri| {
        triangle_points(store, tri)
            .is_some_and(|[a, b, c]| point_in_triangle(p, a.xy(), b.xy(), c.xy()))
    })
}

/// Lists every `(triangle, point)` pair where the point lies strictly inside
/// the triangle's circumcircle.
///
/// `eps` shrinks each circle relative to its squared radius, so points that
/// are cocircular up to rounding are not reported. Degenerate triangles are
/// reported against their own first vertex. An empty result means the
/// triangulation satisfies the Delaunay property.
pub fn delaunay_violations<F: Float>(
    points: &[Point2<F>],
    triangles: &[Triangle],
    eps: F,
) -> Vec<(Triangle, usize)> {
    let mut violations = Vec::new();
    for &tri in triangles {
        let Some(circle) = circumcircle(points[tri.a], points[tri.b], points[tri.c], eps) else {
            violations.push((tri, tri.a));
            continue;
        };
        for (i, &p) in points.iter().enumerate() {
            if !tri.contains_vertex(i) && circle.strictly_contains(p, eps) {
                violations.push((tri, i));
            }
        }
    }
    violations
}
