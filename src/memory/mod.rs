//! The memory the simulated core loads from and stores to.

mod dram;
mod traits;

pub use dram::{Dram, DEFAULT_MEMORY_SIZE};
pub use traits::Memory;
