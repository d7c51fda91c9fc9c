//! Floating-point point types.

mod point2;
mod point3;

pub use point2::Point2;
pub use point3::Point3;
