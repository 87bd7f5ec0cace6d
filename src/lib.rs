//! Reactor reboot: apply a sequence of on/off steps, each covering an
//! axis-aligned cuboid of lattice points, and count the points left on
//! without visiting them one at a time.
//!
//! The points which are on are kept as a set of pairwise disjoint
//! cuboids.  Turning a cuboid on inserts only the parts of it not
//! already covered; turning one off slices each overlapping member
//! along the cuboid's faces and drops the pieces inside it.

pub mod cuboid;
pub mod error;
pub mod reboot;
pub mod set;

#[cfg(test)]
mod puzzle_input;

pub use cuboid::{Axis, Cuboid, Plane, Point};
pub use error::CuboidError;
pub use reboot::{naive_volume, run_steps, run_steps_observed, RebootStep, StepObserver};
pub use set::DisjointCuboidSet;
