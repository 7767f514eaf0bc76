//! CLI commands

mod common;
mod main;
mod parse;
mod run;

pub use common::Command;
pub use main::main;
pub use parse::parse;
pub use run::run;
