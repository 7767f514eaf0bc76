//! Integer literals and the condition-flag arithmetic of the simulated core

mod alu;
mod flags;
mod literal;

pub use alu::{add, sign, sub};
pub use flags::Flags;
pub use literal::{parse_integer, Literal};
