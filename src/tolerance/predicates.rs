//! Geometric predicates with explicit tolerance.

use crate::primitives::Point2;
use num_traits::Float;

/// Twice the signed area of triangle `abc`.
///
/// Positive when `c` lies to the left of the directed line from `a` to `b`.
#[inline]
pub fn signed_area2<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> F {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// The circle through the three vertices of a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle<F> {
    /// Center of the circle.
    pub center: Point2<F>,
    /// Squared radius.
    pub radius_squared: F,
}

impl<F: Float> Circumcircle<F> {
    /// Tests whether `p` lies inside or on the circle.
    ///
    /// `eps` is relative to the squared radius: `p` counts as inside when
    /// `d² - r² <= eps * r²`, so cocircular points are inside at any scale.
    #[inline]
    pub fn contains(&self, p: Point2<F>, eps: F) -> bool {
        self.contains_within(p, eps * self.radius_squared)
    }

    /// Tests whether `p` lies inside or on the circle, allowing `d² - r²` up
    /// to `allowance`.
    #[inline]
    pub fn contains_within(&self, p: Point2<F>, allowance: F) -> bool {
        p.distance_squared(self.center) - self.radius_squared <= allowance
    }

    /// The allowance on `d² - r²` for this circle: `eps` relative to the
    /// squared radius, but never more than `limit`.
    ///
    /// Larger circles never get a smaller allowance than smaller ones.
    #[inline]
    pub fn allowance(&self, eps: F, limit: F) -> F {
        (eps * self.radius_squared).min(limit)
    }

    /// Tests whether `p` lies strictly inside the circle, with the boundary
    /// shrunk by `eps` relative to the squared radius.
    #[inline]
    pub fn strictly_contains(&self, p: Point2<F>, eps: F) -> bool {
        self.radius_squared - p.distance_squared(self.center) > eps * self.radius_squared
    }

    /// Returns true when the whole circle, widened by `allowance` on `r²`,
    /// lies left of the vertical line at `x`.
    ///
    /// In an x-sorted sweep no later point can then pass
    /// [`contains_within`](Self::contains_within) with the same allowance.
    #[inline]
    pub fn is_left_of(&self, x: F, allowance: F) -> bool {
        let dx = x - self.center.x;
        self.center.x < x && dx * dx - self.radius_squared > allowance
    }
}

/// Computes the circumcircle of triangle `abc`.
///
/// Returns `None` for degenerate triangles: those where the sine of the
/// angle at `a` is at most `eps`, or where two vertices coincide. Such
/// triangles are collinear up to `eps` and have no usable circumcircle.
///
/// # Example
///
/// ```
/// use sweepmesh::tolerance::circumcircle;
/// use sweepmesh::Point2;
///
/// let c = circumcircle(
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(0.0, 2.0),
///     1e-6,
/// )
/// .unwrap();
/// assert_eq!(c.center, Point2::new(1.0, 1.0));
/// assert_eq!(c.radius_squared, 2.0);
///
/// // Collinear points have no circumcircle.
/// assert!(circumcircle(
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(2.0, 0.0),
///     1e-6,
/// )
/// .is_none());
/// ```
pub fn circumcircle<F: Float>(
    a: Point2<F>,
    b: Point2<F>,
    c: Point2<F>,
    eps: F,
) -> Option<Circumcircle<F>> {
    // Work relative to `a` to keep magnitudes small.
    let bx = b.x - a.x;
    let by = b.y - a.y;
    let cx = c.x - a.x;
    let cy = c.y - a.y;

    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let cross = bx * cy - by * cx;

    if cross.is_nan() || cross.abs() <= eps * (b2 * c2).sqrt() {
        return None;
    }

    let d = cross + cross;
    let ux = (cy * b2 - by * c2) / d;
    let uy = (bx * c2 - cx * b2) / d;

    Some(Circumcircle {
        center: Point2::new(a.x + ux, a.y + uy),
        radius_squared: ux * ux + uy * uy,
    })
}

/// Tests whether `p` lies strictly inside triangle `abc`.
///
/// This is a fast barycentric sign test that works for either winding.
/// Points on an edge or vertex are reported as outside, and degenerate
/// (zero-area) triangles never contain anything. It is not robust against
/// rounding near the boundary.
///
/// # Example
///
/// ```
/// use sweepmesh::tolerance::point_in_triangle;
/// use sweepmesh::Point2;
///
/// let a = Point2::new(0.0_f64, 0.0);
/// let b = Point2::new(10.0, 0.0);
/// let c = Point2::new(0.0, 10.0);
///
/// assert!(point_in_triangle(Point2::new(1.0, 1.0), a, b, c));
/// assert!(!point_in_triangle(Point2::new(5.0, 0.0), a, b, c));
/// ```
pub fn point_in_triangle<F: Float>(p: Point2<F>, a: Point2<F>, b: Point2<F>, c: Point2<F>) -> bool {
    let area2 = signed_area2(a, b, c);
    let sign = if area2 < F::zero() { -F::one() } else { F::one() };

    let s = (a.y * c.x - a.x * c.y + (c.y - a.y) * p.x + (a.x - c.x) * p.y) * sign;
    let t = (a.x * b.y - a.y * b.x + (a.y - b.y) * p.x + (b.x - a.x) * p.y) * sign;

    s > F::zero() && t > F::zero() && (s + t) < area2 * sign
}
