//! The simulated core and its fetch-decode-execute cycle.

mod context;
mod dump;
mod exec;
mod machine;

pub use context::Core;
pub use dump::{RegisterDump, StackDump};
pub use exec::{execute, instruction_cycle};
pub use machine::{Machine, RunSummary};

#[cfg(test)]
mod tests;
