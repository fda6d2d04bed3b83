//! Per-instance transforms for one-draw-call foliage populations

pub mod record;
pub mod scatter;
pub mod set;

pub use record::{InstanceRecord, RawInstance};
pub use scatter::ScatterBuilder;
pub use set::InstanceSet;
