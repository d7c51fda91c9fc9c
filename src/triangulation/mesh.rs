//! Vertex and index buffers for external rendering.

use super::triangle::{Edge, Triangle};
use crate::primitives::Point3;
use std::collections::HashSet;

/// A triangle-list mesh: a vertex buffer plus a flat index buffer where each
/// consecutive triple of indices forms one triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh<F> {
    vertices: Vec<Point3<F>>,
    indices: Vec<usize>,
}

impl<F> Default for TriangleMesh<F> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }
}

impl<F: Copy> TriangleMesh<F> {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties both buffers, keeping their allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Appends a vertex.
    pub fn add_vertex(&mut self, position: Point3<F>) {
        self.vertices.push(position);
    }

    /// Appends a triangle's three indices.
    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.indices.extend(triangle.indices());
    }

    /// The vertex buffer.
    #[inline]
    pub fn vertices(&self) -> &[Point3<F>] {
        &self.vertices
    }

    /// The flat triangle-list index buffer.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of vertices in the vertex buffer.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of complete triangles in the index buffer.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates the index buffer as triangles.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|idx| Triangle::new(idx[0], idx[1], idx[2]))
    }

    /// Builds a line-list index buffer with every edge once.
    ///
    /// Edges shared by two triangles are emitted a single time, in order of
    /// first appearance.
    pub fn wireframe_indices(&self) -> Vec<usize> {
        let mut seen = HashSet::with_capacity(self.indices.len());
        let mut lines = Vec::with_capacity(self.indices.len() * 2);
        for tri in self.triangles() {
            for (a, b) in tri.edges() {
                if seen.insert(Edge::new(a, b)) {
                    lines.push(a);
                    lines.push(b);
                }
            }
        }
        lines
    }
}
