//! Travel request store adapters.

mod file;
pub mod in_memory;

pub use file::FileTravelRequestStore;
pub use in_memory::InMemoryTravelRequestStore;
