//! Translation from working-copy positions to point store indices.
//!
//! The sweep numbers vertices by their place in the sorted working copy.
//! Callers only know store indices, so every triangle is rewritten through
//! the working copy's origin table before it leaves the triangulator.

use super::mesh::TriangleMesh;
use super::triangle::Triangle;
use super::working::WorkingCopy;
use crate::store::PointStore;
use num_traits::Float;

/// Rewrites sweep triangles against store indices.
///
/// `origins[i]` is the store index of working position `i`. Every index in
/// `raw` must be below `origins.len()`, which holds for any sweep output.
pub fn remap<'a>(
    raw: &'a [Triangle],
    origins: &'a [usize],
) -> impl ExactSizeIterator<Item = Triangle> + 'a {
    raw.iter().map(move |t| t.map(|i| origins[i]))
}

/// The committed result of the last successful triangulation.
///
/// Holds the triangle list in store indices and the renderable mesh built
/// from it. The mesh's vertex buffer is the whole point store in store
/// order, so mesh indices and store indices coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangulation<F> {
    triangles: Vec<Triangle>,
    mesh: TriangleMesh<F>,
}

impl<F> Default for Triangulation<F> {
    fn default() -> Self {
        Self {
            triangles: Vec::new(),
            mesh: TriangleMesh::default(),
        }
    }
}

impl<F: Float> Triangulation<F> {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents with sweep output `raw` over `working`.
    pub fn commit(&mut self, raw: &[Triangle], working: &WorkingCopy<F>, store: &PointStore<F>) {
        self.triangles.clear();
        self.triangles.extend(remap(raw, working.origins()));

        self.mesh.clear();
        for position in store.positions() {
            self.mesh.add_vertex(position);
        }
        for &tri in &self.triangles {
            self.mesh.add_triangle(tri);
        }
    }

    /// Discards all triangles and the mesh.
    pub fn clear(&mut self) {
        self.triangles.clear();
        self.mesh.clear();
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Triangles over store indices.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// The committed mesh.
    #[inline]
    pub fn mesh(&self) -> &TriangleMesh<F> {
        &self.mesh
    }
}
