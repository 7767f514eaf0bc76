//! Scenario files: the machine, memory and program a run starts from

mod error;
mod scenario;

pub use error::{Error, Result};
pub use scenario::{Scenario, DEFAULT_MAX_CYCLES, MAX_MEMORY_SIZE};
