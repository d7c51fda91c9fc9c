//! The sorted working copy a sweep runs over.

use crate::error::DelaunayError;
use crate::primitives::Point2;
use crate::store::{PointStore, Vertex};
use num_traits::Float;
use std::cmp::Ordering;

/// Number of scratch slots appended after the real points.
pub const SENTINEL_SLOTS: usize = 3;

/// Total order on a sort key, with NaN placed after every number.
#[inline]
pub fn axis_order<F: Float>(a: F, b: F) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

/// Sorts `items` ascending by the coordinate `key` extracts.
pub fn sort_by_axis<T, F, K>(items: &mut [T], key: K)
where
    F: Float,
    K: Fn(&T) -> F,
{
    items.sort_unstable_by(|a, b| axis_order(key(a), key(b)));
}

/// Points sorted by x, plus the store index each one came from.
///
/// The point buffer always ends in [`SENTINEL_SLOTS`] extra slots that the
/// sweep fills with its enclosing super-triangle. `origins` covers only the
/// real points, so sentinel positions have no store index.
#[derive(Debug, Clone)]
pub struct WorkingCopy<F> {
    points: Vec<Point2<F>>,
    origins: Vec<usize>,
}

impl<F: Float> WorkingCopy<F> {
    /// Working copy of every point in the store.
    pub fn full(store: &PointStore<F>) -> Self {
        Self::from_vertices(store.vertices().iter())
    }

    /// Working copy of the named store points, in the given order before sorting.
    ///
    /// Fails on the first index outside the store. Repeated indices are kept.
    pub fn subset(store: &PointStore<F>, indices: &[usize]) -> Result<Self, DelaunayError> {
        let vertices = indices
            .iter()
            .map(|&index| {
                store.get(index).ok_or(DelaunayError::IndexOutOfRange {
                    index,
                    len: store.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_vertices(vertices))
    }

    fn from_vertices<'a, I>(vertices: I) -> Self
    where
        F: 'a,
        I: IntoIterator<Item = &'a Vertex<F>>,
    {
        let mut entries: Vec<(Point2<F>, usize)> = vertices
            .into_iter()
            .map(|v| (v.position.xy(), v.index))
            .collect();
        sort_by_axis(&mut entries, |(p, _)| p.x);

        let mut points = Vec::with_capacity(entries.len() + SENTINEL_SLOTS);
        let mut origins = Vec::with_capacity(entries.len());
        for (p, index) in entries {
            points.push(p);
            origins.push(index);
        }
        points.extend([Point2::origin(); SENTINEL_SLOTS]);

        Self { points, origins }
    }

    /// Number of real points.
    #[inline]
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Returns true if there are no real points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// All points including the sentinel slots.
    #[inline]
    pub fn points(&self) -> &[Point2<F>] {
        &self.points
    }

    /// Store index for each real point, by working position.
    #[inline]
    pub fn origins(&self) -> &[usize] {
        &self.origins
    }

    /// Store index of the point at working position `i`.
    ///
    /// `None` for sentinel slots and out-of-range positions.
    #[inline]
    pub fn origin(&self, i: usize) -> Option<usize> {
        self.origins.get(i).copied()
    }

    /// Overwrites the sentinel slots.
    pub fn set_sentinels(&mut self, sentinels: [Point2<F>; SENTINEL_SLOTS]) {
        let n = self.len();
        self.points[n..].copy_from_slice(&sentinels);
    }
}
