//! Delaunay triangulation of point store contents.
//!
//! A run goes through three stages:
//!
//! 1. [`WorkingCopy`] snapshots the participating points, sorted by x
//! 2. [`Sweep`] triangulates the working copy, producing triangles over
//!    working positions
//! 3. [`Triangulation::commit`] remaps those triangles to store indices and
//!    rebuilds the [`TriangleMesh`]

mod mesh;
mod remap;
mod sweep;
mod triangle;
mod working;

pub use mesh::TriangleMesh;
pub use remap::{remap, Triangulation};
pub use sweep::Sweep;
pub use triangle::{Edge, Triangle};
pub use working::{axis_order, sort_by_axis, WorkingCopy, SENTINEL_SLOTS};
