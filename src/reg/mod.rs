//! The general-purpose register file and its aliased, partial-width views.

mod file;
mod names;
mod view;

pub use file::Registers;
pub use names::{resolve_view, spelling};
pub use view::{Location, Register, View};
