//! A teaching simulator for a single x86-64-like CPU core.
//!
//! Programs are written in a small subset of AT&T assembly syntax and stored
//! one instruction per fixed-width text slot. Every cycle fetches the slot at
//! the program counter, parses it, decodes its operands against the register
//! file, and executes it against the core and a byte-addressed memory.
//!
//! The crate is organized leaves-first:
//!
//!  * `reg` - the sixteen general-purpose registers and their aliased views
//!  * `maths` - integer literals and the condition-flag arithmetic
//!  * `memory` - the memory contract and a simple DRAM model
//!  * `isa` - operands, instructions, the text parser and instruction streams
//!  * `cpu` - the execution context and the fetch-decode-execute cycle
//!  * `project` - scenario files which seed a machine and its program
//!  * `cli` - the command-line driver

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_plain;

#[macro_use]
extern crate clap;

pub mod cli;
pub mod cpu;
mod error;
pub mod isa;
pub mod maths;
pub mod memory;
pub mod project;
pub mod reg;

pub use error::{Error, Fault, Field, ParseError, Result};
