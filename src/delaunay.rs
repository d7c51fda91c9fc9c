//! An editable point set with a cached Delaunay triangulation.
//!
//! [`Delaunay`] ties the point store, the sweep triangulator and the spatial
//! queries together. Edits go to the store; the triangulation is only rebuilt
//! when [`triangulate`](Delaunay::triangulate) runs, either called directly
//! or as part of a remove/replace edit. Every rebuild starts from scratch.
//!
//! # Example
//!
//! ```
//! use sweepmesh::{Delaunay, Point2, Point3};
//!
//! let mut mesh: Delaunay<f64> = Delaunay::new();
//! mesh.add_points([
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 0.0, 0.0),
//!     Point3::new(0.0, 10.0, 0.0),
//! ]);
//!
//! assert_eq!(mesh.triangulate(), Ok(1));
//! assert_eq!(mesh.mesh().indices().len(), 3);
//!
//! let hit = mesh.triangle_for_position(Point2::new(1.0, 1.0)).unwrap();
//! assert_eq!(hit.canonical().indices(), [0, 1, 2]);
//! assert!(mesh.triangle_for_position(Point2::new(1000.0, 1000.0)).is_none());
//! ```

use crate::config::DelaunayConfig;
use crate::error::DelaunayError;
use crate::primitives::{Point2, Point3};
use crate::query::{self, NearestPoint};
use crate::store::{PointStore, Vertex};
use crate::triangulation::{Sweep, Triangle, TriangleMesh, Triangulation, WorkingCopy};
use num_traits::Float;
use tracing::debug;

/// A point set, its latest triangulation and the queries over both.
///
/// All state is owned by the session and mutated through `&mut self`; share
/// it across threads only behind external synchronization.
#[derive(Debug, Clone)]
pub struct Delaunay<F> {
    config: DelaunayConfig<F>,
    store: PointStore<F>,
    sweep: Sweep<F>,
    result: Triangulation<F>,
}

impl<F: Float> Default for Delaunay<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> Delaunay<F> {
    /// Creates a session with default configuration.
    pub fn new() -> Self {
        Self::from_config(DelaunayConfig::default())
    }

    /// Creates a session after validating `config`.
    pub fn with_config(config: DelaunayConfig<F>) -> Result<Self, DelaunayError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: DelaunayConfig<F>) -> Self {
        Self {
            store: PointStore::new(config.jitter, config.seed),
            sweep: Sweep::new(config.epsilon),
            result: Triangulation::new(),
            config,
        }
    }

    /// The configuration this session was built with.
    pub fn config(&self) -> &DelaunayConfig<F> {
        &self.config
    }

    /// Adds a point and returns the new point count.
    ///
    /// The triangulation is not updated until the next
    /// [`triangulate`](Self::triangulate).
    pub fn add_point(&mut self, x: F, y: F, z: F) -> usize {
        self.store.push(Point3::new(x, y, z))
    }

    /// Adds a point given as a position. See [`add_point`](Self::add_point).
    pub fn add_position(&mut self, position: Point3<F>) -> usize {
        self.store.push(position)
    }

    /// Adds points in order and returns the new point count.
    pub fn add_points<I>(&mut self, positions: I) -> usize
    where
        I: IntoIterator<Item = Point3<F>>,
    {
        self.store.extend(positions)
    }

    /// Triangulates every stored point and returns the triangle count.
    ///
    /// With fewer than 3 points this returns
    /// [`DelaunayError::InsufficientPoints`] and keeps the previous result.
    pub fn triangulate(&mut self) -> Result<usize, DelaunayError> {
        let working = WorkingCopy::full(&self.store);
        self.run(working)
    }

    /// Triangulates only the points named by `indices`.
    ///
    /// The committed mesh still carries every stored point as a vertex; only
    /// the named ones appear in triangles. Fails without touching the
    /// previous result if an index is out of range or fewer than 3 are given.
    pub fn triangulate_subset(&mut self, indices: &[usize]) -> Result<usize, DelaunayError> {
        let working = WorkingCopy::subset(&self.store, indices)?;
        self.run(working)
    }

    fn run(&mut self, mut working: WorkingCopy<F>) -> Result<usize, DelaunayError> {
        if working.len() < 3 {
            debug!(available = working.len(), "not enough points to triangulate");
            return Err(DelaunayError::InsufficientPoints {
                available: working.len(),
            });
        }

        let count = self.sweep.run(&mut working);
        self.result.commit(self.sweep.triangles(), &working, &self.store);
        debug!(points = working.len(), triangles = count, "triangulated");
        Ok(count)
    }

    /// Removes the point at `index` and re-triangulates.
    ///
    /// Later points shift down by one and are renumbered. Out-of-range
    /// indices are ignored. If fewer than 3 points remain the triangulation
    /// is cleared, since its indices no longer match the store.
    pub fn remove_point_at_index(&mut self, index: usize) -> Option<Vertex<F>> {
        let removed = self.store.remove(index);
        if removed.is_none() {
            debug!(index, len = self.store.len(), "remove ignored: index out of range");
        }

        if self.triangulate().is_err() && removed.is_some() {
            self.result.clear();
        }
        removed
    }

    /// Moves the point at `index` to `position`, keeping its index.
    ///
    /// The new position is jittered like any insert. Out-of-range indices are
    /// ignored. Re-triangulates when `should_triangulate` is set, whether or
    /// not the index was valid.
    pub fn set_point_at_index(
        &mut self,
        position: Point3<F>,
        index: usize,
        should_triangulate: bool,
    ) -> Option<Vertex<F>> {
        let previous = self.store.replace(index, position);
        if previous.is_none() {
            debug!(index, len = self.store.len(), "replace ignored: index out of range");
        }

        if should_triangulate {
            // Too few points leaves the previous result in place; its indices are still valid.
            if let Err(err) = self.triangulate() {
                debug!(%err, "replace kept previous triangulation");
            }
        }
        previous
    }

    /// Finds the stored point nearest `position` in the xy plane.
    ///
    /// Returns `None` if that point is farther than `minimum_distance`.
    pub fn point_near(&self, position: Point3<F>, minimum_distance: F) -> Option<NearestPoint<F>> {
        query::nearest_point(self.store.vertices(), position.xy(), minimum_distance)
    }

    /// Returns the `index`-th triangle of the last triangulation, over store indices.
    pub fn triangle_at(&self, index: usize) -> Option<Triangle> {
        self.result.triangles().get(index).copied()
    }

    /// Current positions of a triangle's corners.
    ///
    /// Returns `None` if the triangle names an index outside the store.
    pub fn points_for_triangle(&self, triangle: Triangle) -> Option<[Point3<F>; 3]> {
        query::triangle_points(&self.store, triangle)
    }

    /// Finds the first committed triangle strictly containing `position`.
    pub fn triangle_for_position(&self, position: Point2<F>) -> Option<Triangle> {
        query::triangle_containing(&self.store, self.result.mesh().triangles(), position)
    }

    /// Removes all points and triangles.
    pub fn reset(&mut self) {
        self.store.clear();
        self.sweep.clear();
        self.result.clear();
    }

    /// Number of triangles in the last triangulation.
    pub fn num_triangles(&self) -> usize {
        self.result.triangle_count()
    }

    /// Number of stored points.
    pub fn num_points(&self) -> usize {
        self.store.len()
    }

    /// Stored points in index order.
    pub fn points(&self) -> &[Vertex<F>] {
        self.store.vertices()
    }

    /// The point store.
    pub fn store(&self) -> &PointStore<F> {
        &self.store
    }

    /// Triangles of the last triangulation, over store indices.
    pub fn triangles(&self) -> &[Triangle] {
        self.result.triangles()
    }

    /// Triangles of the last sweep, over positions in its sorted working copy.
    ///
    /// Cleared along with the triangulation on [`reset`](Self::reset).
    pub fn raw_triangles(&self) -> &[Triangle] {
        self.sweep.triangles()
    }

    /// The committed mesh, ready for an external renderer.
    pub fn mesh(&self) -> &TriangleMesh<F> {
        self.result.mesh()
    }

    /// The committed triangulation.
    pub fn triangulation(&self) -> &Triangulation<F> {
        &self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::delaunay_violations;

    fn exact() -> Delaunay<f64> {
        Delaunay::with_config(DelaunayConfig::default().jitter(0.0).seed(0)).unwrap()
    }

    fn seeded(seed: u64) -> Delaunay<f64> {
        Delaunay::with_config(DelaunayConfig::default().seed(seed)).unwrap()
    }

    fn canonical_set(triangles: &[Triangle]) -> Vec<Triangle> {
        let mut set: Vec<Triangle> = triangles.iter().map(|t| t.canonical()).collect();
        set.sort_unstable_by_key(|t| t.indices());
        set
    }

    fn add_square_with_center(mesh: &mut Delaunay<f64>) {
        mesh.add_points([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(5.0, 5.0, 0.0),
        ]);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = DelaunayConfig::default().epsilon(-1.0);
        assert!(matches!(
            Delaunay::<f64>::with_config(config),
            Err(DelaunayError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_add_point_returns_size() {
        let mut mesh = seeded(1);
        assert_eq!(mesh.add_point(1.0, 2.0, 3.0), 1);
        assert_eq!(mesh.add_position(Point3::new(4.0, 5.0, 6.0)), 2);
        assert_eq!(
            mesh.add_points([Point3::origin(), Point3::new(1.0, 1.0, 1.0)]),
            4
        );
        assert_eq!(mesh.num_points(), 4);
        assert_eq!(mesh.points()[3].index, 3);
    }

    #[test]
    fn test_triangulate_insufficient_points() {
        let mut mesh = seeded(1);
        mesh.add_point(0.0, 0.0, 0.0);
        mesh.add_point(1.0, 0.0, 0.0);
        assert_eq!(
            mesh.triangulate(),
            Err(DelaunayError::InsufficientPoints { available: 2 })
        );
        assert_eq!(mesh.num_triangles(), 0);
        assert!(mesh.mesh().indices().is_empty());
    }

    #[test]
    fn test_triangulate_square_with_center() {
        let mut mesh = exact();
        add_square_with_center(&mut mesh);

        assert_eq!(mesh.triangulate(), Ok(4));
        assert_eq!(mesh.num_triangles(), 4);
        assert_eq!(mesh.mesh().indices().len(), 12);
        assert_eq!(mesh.mesh().num_vertices(), 5);
        assert!(mesh.triangles().iter().all(|t| t.contains_vertex(4)));
    }

    #[test]
    fn test_jittered_triangulation_is_delaunay() {
        let mut mesh = seeded(3);
        for i in 0..6 {
            for j in 0..6 {
                mesh.add_point(i as f64, j as f64, 0.0);
            }
        }
        let count = mesh.triangulate().unwrap();
        assert!(count >= 1);
        assert_eq!(mesh.mesh().indices().len(), 3 * count);

        let points: Vec<Point2<f64>> = mesh.points().iter().map(|v| v.position.xy()).collect();
        assert!(delaunay_violations(&points, mesh.triangles(), 1e-6).is_empty());
    }

    #[test]
    fn test_small_set_keeps_prior_mesh() {
        let mut mesh = exact();
        mesh.add_points([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
        ]);
        mesh.triangulate().unwrap();
        let before = mesh.triangulation().clone();

        let err = mesh.triangulate_subset(&[0, 1]).unwrap_err();
        assert_eq!(err, DelaunayError::InsufficientPoints { available: 2 });
        assert_eq!(mesh.triangulation(), &before);
    }

    #[test]
    fn test_triangulate_subset() {
        let mut mesh = exact();
        add_square_with_center(&mut mesh);

        assert_eq!(mesh.triangulate_subset(&[4, 0, 1]), Ok(1));
        assert_eq!(mesh.triangles()[0].canonical(), Triangle::new(0, 1, 4));
        // Every stored point stays in the vertex buffer.
        assert_eq!(mesh.mesh().num_vertices(), 5);
        assert_eq!(mesh.mesh().indices().len(), 3);
    }

    #[test]
    fn test_triangulate_subset_out_of_range() {
        let mut mesh = exact();
        add_square_with_center(&mut mesh);
        mesh.triangulate().unwrap();

        let err = mesh.triangulate_subset(&[0, 1, 9]).unwrap_err();
        assert_eq!(err, DelaunayError::IndexOutOfRange { index: 9, len: 5 });
        assert_eq!(mesh.num_triangles(), 4);
    }

    #[test]
    fn test_raw_triangles_reference_working_copy() {
        let mut mesh = exact();
        // Reverse x order so sorted positions differ from store indices.
        mesh.add_points([
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(5.0, 8.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ]);
        mesh.triangulate().unwrap();

        assert_eq!(mesh.raw_triangles().len(), 1);
        assert_eq!(mesh.triangles().len(), 1);
        assert_eq!(mesh.triangles()[0].canonical(), Triangle::new(0, 1, 2));

        // Working position 0 is the leftmost point, store index 2.
        let raw = mesh.raw_triangles()[0];
        let mapped = mesh.triangles()[0];
        let slot = raw.indices().iter().position(|&i| i == 0).unwrap();
        assert_eq!(mapped.indices()[slot], 2);
    }

    #[test]
    fn test_triangle_at() {
        let mut mesh = exact();
        add_square_with_center(&mut mesh);
        mesh.triangulate().unwrap();

        for i in 0..mesh.num_triangles() {
            assert_eq!(mesh.triangle_at(i), Some(mesh.triangles()[i]));
        }
        assert!(mesh.triangle_at(mesh.num_triangles()).is_none());
    }

    #[test]
    fn test_points_for_triangle_round_trip() {
        let inputs = [
            Point3::new(1.0, 2.0, 0.5),
            Point3::new(8.0, 1.0, 1.5),
            Point3::new(4.0, 9.0, 2.5),
            Point3::new(6.0, 5.0, 3.5),
        ];
        let mut mesh = seeded(11);
        mesh.add_points(inputs);
        mesh.triangulate().unwrap();

        for &tri in mesh.triangles() {
            for p in mesh.points_for_triangle(tri).unwrap() {
                assert!(inputs.iter().any(|q| {
                    let dx = p.x - q.x;
                    (0.0..0.01).contains(&dx) && p.y == q.y && p.z == q.z
                }));
            }
        }
    }

    #[test]
    fn test_points_for_triangle_out_of_range() {
        let mesh = exact();
        assert!(mesh.points_for_triangle(Triangle::new(0, 1, 2)).is_none());
    }

    #[test]
    fn test_triangle_for_position() {
        let mut mesh = seeded(5);
        mesh.add_points([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
        ]);
        mesh.triangulate().unwrap();

        let hit = mesh.triangle_for_position(Point2::new(1.0, 1.0)).unwrap();
        assert_eq!(hit.canonical(), Triangle::new(0, 1, 2));
        assert!(mesh
            .triangle_for_position(Point2::new(1000.0, 1000.0))
            .is_none());
    }

    #[test]
    fn test_triangle_for_position_before_triangulation() {
        let mut mesh = exact();
        add_square_with_center(&mut mesh);
        assert!(mesh.triangle_for_position(Point2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_point_near() {
        let mut mesh = exact();
        mesh.add_point(0.0, 0.0, 0.0);

        assert!(mesh.point_near(Point3::new(100.0, 100.0, 0.0), 1.0).is_none());

        let hit = mesh.point_near(Point3::new(0.5, 0.0, 7.0), 1.0).unwrap();
        assert_eq!(hit.index, 0);
        assert_eq!(hit.position, Point3::origin());
    }

    #[test]
    fn test_remove_point_renumbers_and_retriangulates() {
        let mut mesh = exact();
        add_square_with_center(&mut mesh);
        mesh.triangulate().unwrap();

        let removed = mesh.remove_point_at_index(4).unwrap();
        assert_eq!(removed.position, Point3::new(5.0, 5.0, 0.0));
        assert_eq!(mesh.num_points(), 4);
        assert_eq!(mesh.num_triangles(), 2);
        assert!(mesh.triangles().iter().all(|t| t.indices().iter().all(|&i| i < 4)));

        mesh.remove_point_at_index(0);
        for (slot, v) in mesh.points().iter().enumerate() {
            assert_eq!(v.index, slot);
        }
        assert_eq!(mesh.num_triangles(), 1);
    }

    #[test]
    fn test_remove_below_three_clears_triangulation() {
        let mut mesh = exact();
        mesh.add_points([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
        ]);
        mesh.triangulate().unwrap();

        assert!(mesh.remove_point_at_index(1).is_some());
        assert_eq!(mesh.num_triangles(), 0);
        assert!(mesh.mesh().indices().is_empty());
        assert!(mesh.triangle_for_position(Point2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_remove_out_of_range_is_quiet() {
        let mut mesh = exact();
        add_square_with_center(&mut mesh);
        mesh.triangulate().unwrap();

        assert!(mesh.remove_point_at_index(42).is_none());
        assert_eq!(mesh.num_points(), 5);
        assert_eq!(mesh.num_triangles(), 4);
    }

    #[test]
    fn test_set_point_at_index() {
        let mut mesh = exact();
        add_square_with_center(&mut mesh);
        mesh.triangulate().unwrap();

        // Move the center outside the square without re-triangulating.
        let previous = mesh
            .set_point_at_index(Point3::new(20.0, 5.0, 0.0), 4, false)
            .unwrap();
        assert_eq!(previous.position, Point3::new(5.0, 5.0, 0.0));
        assert_eq!(mesh.points()[4].index, 4);
        assert_eq!(mesh.num_triangles(), 4);

        mesh.set_point_at_index(Point3::new(20.0, 5.0, 0.0), 4, true);
        assert_eq!(mesh.num_triangles(), 3);
        assert!(mesh.triangles().iter().any(|t| t.contains_vertex(4)));
    }

    #[test]
    fn test_set_point_out_of_range_is_quiet() {
        let mut mesh = exact();
        add_square_with_center(&mut mesh);
        assert!(mesh.set_point_at_index(Point3::origin(), 5, true).is_none());
        assert_eq!(mesh.num_points(), 5);
        assert_eq!(mesh.num_triangles(), 4);
    }

    #[test]
    fn test_set_point_with_too_few_points_is_quiet() {
        let mut mesh = exact();
        mesh.add_points([Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)]);

        let previous = mesh.set_point_at_index(Point3::new(2.0, 3.0, 0.0), 1, true);
        assert_eq!(previous.map(|v| v.position), Some(Point3::new(1.0, 0.0, 0.0)));
        assert_eq!(mesh.points()[1].position, Point3::new(2.0, 3.0, 0.0));
        assert_eq!(mesh.num_triangles(), 0);
        assert!(mesh.mesh().is_empty());
    }

    #[test]
    fn test_small_scale_cloud_is_delaunay() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(5);
        for (side, mut mesh) in [(0.05, seeded(3)), (0.2, seeded(4)), (1e-3, exact())] {
            mesh.add_points((0..200).map(|_| {
                Point3::new(rng.random::<f64>() * side, rng.random::<f64>() * side, 0.0)
            }));
            let count = mesh.triangulate().unwrap();
            assert!(count <= 2 * 200 - 5, "side {}: {} triangles", side, count);

            let planar: Vec<Point2<f64>> = mesh.points().iter().map(|v| v.position.xy()).collect();
            let violations = delaunay_violations(&planar, mesh.triangles(), 1e-6);
            assert!(violations.is_empty(), "side {}: {:?}", side, violations);
        }
    }

    #[test]
    fn test_reset() {
        let mut mesh = exact();
        add_square_with_center(&mut mesh);
        mesh.triangulate().unwrap();

        mesh.reset();
        assert_eq!(mesh.num_points(), 0);
        assert_eq!(mesh.num_triangles(), 0);
        assert!(mesh.raw_triangles().is_empty());
        assert!(mesh.mesh().is_empty());
        assert_eq!(mesh.mesh().num_vertices(), 0);
        assert_eq!(mesh.add_point(1.0, 1.0, 1.0), 1);
    }

    #[test]
    fn test_triangulate_is_idempotent() {
        let mut mesh = seeded(21);
        for i in 0..40 {
            let t = i as f64 * 0.7;
            mesh.add_point(t.cos() * (5.0 + t), t.sin() * (5.0 + t), 0.0);
        }
        mesh.triangulate().unwrap();
        let first = canonical_set(mesh.triangles());
        mesh.triangulate().unwrap();
        assert_eq!(canonical_set(mesh.triangles()), first);
    }
}
