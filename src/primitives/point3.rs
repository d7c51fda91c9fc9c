//! 3D point type.

use super::Point2;
use num_traits::Float;

/// A 3D position with x, y, and z coordinates.
///
/// Triangulation happens in the xy plane; `z` is carried through to the
/// committed mesh untouched so that height fields and layered drawings keep
/// their depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3<F> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Point3<F> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: F, y: F, z: F) -> Self {
        Self { x, y, z }
    }

    /// Creates a point at the origin (0, 0, 0).
    #[inline]
    pub fn origin() -> Self {
        Self {
            x: F::zero(),
            y: F::zero(),
            z: F::zero(),
        }
    }

    /// Drops `z`, projecting onto the triangulation plane.
    #[inline]
    pub fn xy(self) -> Point2<F> {
        Point2::new(self.x, self.y)
    }

    /// Squared distance in the xy plane, ignoring `z`.
    #[inline]
    pub fn planar_distance_squared(self, other: Self) -> F {
        self.xy().distance_squared(other.xy())
    }

    /// Distance in the xy plane, ignoring `z`.
    #[inline]
    pub fn planar_distance(self, other: Self) -> F {
        self.planar_distance_squared(other).sqrt()
    }

    /// Returns a copy with `x` shifted by `dx`.
    #[inline]
    pub fn shifted_x(self, dx: F) -> Self {
        Self {
            x: self.x + dx,
            ..self
        }
    }
}

impl<F: Float> Default for Point3<F> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<F: Float> From<Point2<F>> for Point3<F> {
    fn from(p: Point2<F>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: F::zero(),
        }
    }
}

impl<F: Float> From<(F, F, F)> for Point3<F> {
    fn from((x, y, z): (F, F, F)) -> Self {
        Self { x, y, z }
    }
}
