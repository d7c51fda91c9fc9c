//! Index triples and edges.

/// A triangle represented by indices into a point array.
///
/// Which array depends on where the triangle came from: the sweep produces
/// triangles over its sorted working copy, and everything a
/// [`Delaunay`](crate::Delaunay) session hands out refers to point store
/// indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Triangle {
    /// First vertex index
    pub a: usize,
    /// Second vertex index
    pub b: usize,
    /// Third vertex index
    pub c: usize,
}

impl Triangle {
    /// Creates a new triangle from vertex indices.
    #[inline]
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    /// The three indices in order.
    #[inline]
    pub fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }

    /// Returns the three edges of this triangle as pairs of indices.
    #[inline]
    pub fn edges(&self) -> [(usize, usize); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }

    /// Checks if the triangle contains a specific vertex index.
    #[inline]
    pub fn contains_vertex(&self, v: usize) -> bool {
        self.a == v || self.b == v || self.c == v
    }

    /// Rewrites every index through `f`.
    #[inline]
    pub fn map<M: FnMut(usize) -> usize>(self, mut f: M) -> Self {
        Self::new(f(self.a), f(self.b), f(self.c))
    }

    /// Same triangle with indices in ascending order.
    ///
    /// Useful for comparing triangle sets independent of winding and
    /// starting vertex.
    pub fn canonical(self) -> Self {
        let mut idx = self.indices();
        idx.sort_unstable();
        Self::new(idx[0], idx[1], idx[2])
    }
}

impl From<[usize; 3]> for Triangle {
    fn from([a, b, c]: [usize; 3]) -> Self {
        Self { a, b, c }
    }
}

/// An edge represented by two vertex indices, normalized so smaller index comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    /// Creates a normalized edge.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        if a < b {
            Edge(a, b)
        } else {
            Edge(b, a)
        }
    }
}
