// Grid sampling: axis samples → 2-D lattice → rectangular work cells.
// Everything here is pure and deterministic; no I/O, no shared state.

pub mod axis;
pub mod cells;
pub mod lattice;

pub use axis::AxisSpec;
pub use cells::{partition, AxisRange, Cell};
pub use lattice::{build, Lattice};
