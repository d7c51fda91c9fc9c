//! sweepmesh - Delaunay triangulation for editable point sets
//!
//! Points go into a [`Delaunay`] session, get triangulated with a sweep-line
//! Bowyer-Watson algorithm, and come back as a triangle list plus a
//! vertex/index buffer pair ready for a renderer. The session also answers
//! the questions interactive tools ask: which point is under the cursor, and
//! which triangle.
//!
//! Inserted points are jittered by a tiny random amount to break exact
//! coincidences. Predicates are fast floating-point tests with explicit
//! tolerances, not exact arithmetic.

pub mod config;
pub mod delaunay;
pub mod error;
pub mod primitives;
pub mod query;
pub mod store;
pub mod tolerance;
pub mod triangulation;

pub use config::DelaunayConfig;
pub use delaunay::Delaunay;
pub use error::DelaunayError;
pub use primitives::{Point2, Point3};
pub use query::NearestPoint;
pub use store::{PointStore, Vertex};
pub use triangulation::{Triangle, TriangleMesh, Triangulation};
