//! Snapshot store adapters.

mod json;
mod memory;

pub use json::JsonSnapshotStore;
pub use memory::MemorySnapshotStore;
