// Job expansion: turns cells (or single lattice points) into the ordered
// descriptor list handed to the external submission layer.

pub mod descriptor;
pub mod expander;
pub mod points;
pub mod strategy;

pub use descriptor::JobDescriptor;
pub use expander::Replication;
pub use points::ToyBatching;
pub use strategy::SplitStrategy;
