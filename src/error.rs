//! Error types for decoding and executing instructions

use crate::isa::{Opcode, OperandKind};
use std::{fmt, result};
use thiserror::Error;

/// Error type for instruction decoding and execution.
///
/// Every variant is fatal for the run that raised it. Decoding errors are
/// detected before the faulting instruction mutates any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A register operand named something outside the register name table.
    #[error("unknown register name `{0}`")]
    UnknownRegisterName(String),

    /// A memory operand used a scale factor other than 1, 2, 4 or 8.
    #[error("`{0}` is not a legal scale factor")]
    IllegalScale(String),

    /// The mnemonic is not in the opcode table.
    #[error("unknown mnemonic `{0}`")]
    UnknownOpcode(String),

    /// The opcode does not implement the given combination of operands.
    #[error("{opcode} does not accept a {src} source with a {dst} destination")]
    UnsupportedOperandForm {
        opcode: Opcode,
        src: OperandKind,
        dst: OperandKind,
    },

    /// A numeric literal could not be read.
    #[error("`{0}` is not a valid integer")]
    InvalidInteger(String),

    /// An operand did not match any of the operand forms.
    ///
    /// This covers unbalanced parentheses, missing registers inside a memory
    /// group, and junk following a complete operand.
    #[error("malformed operand `{0}`")]
    MalformedOperand(String),

    /// Text was left over after the destination operand.
    #[error("unexpected `{0}` after the destination operand")]
    MalformedInstruction(String),

    /// The program counter does not point at an instruction slot.
    #[error("no instruction slot at {0:#x}")]
    NoInstruction(u64),

    /// An instruction's text is wider than the slots of its program.
    #[error("`{text}` does not fit in a {width}-byte instruction slot")]
    SlotOverflow { text: String, width: u64 },
}

pub type Result<T> = result::Result<T, Error>;

/// The part of an instruction's text an error was found in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Mnemonic,
    Source,
    Destination,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Mnemonic => write!(f, "mnemonic"),
            Field::Source => write!(f, "source operand"),
            Field::Destination => write!(f, "destination operand"),
        }
    }
}

/// An error raised while parsing an instruction, tagged with the field of the
/// instruction text it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("in {field}: {kind}")]
pub struct ParseError {
    pub field: Field,

    #[source]
    pub kind: Error,
}

impl ParseError {
    pub fn new(field: Field, kind: Error) -> Self {
        ParseError { field, kind }
    }
}

/// A fatal error surfaced by the instruction cycle.
///
/// Carries the program counter and slot text of the faulting instruction, and
/// the instruction field the error was found in when it came from the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fault at {pc:#x} executing `{text}`{}: {kind}", describe_field(.field))]
pub struct Fault {
    pub pc: u64,
    pub text: String,
    pub field: Option<Field>,

    #[source]
    pub kind: Error,
}

impl Fault {
    pub fn new(pc: u64, text: &str, field: Option<Field>, kind: Error) -> Self {
        Fault {
            pc,
            text: text.to_string(),
            field,
            kind,
        }
    }
}

fn describe_field(field: &Option<Field>) -> String {
    match field {
        Some(field) => format!(" (in {})", field),
        None => String::new(),
    }
}
