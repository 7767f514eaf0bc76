//! The instruction set: operands, instructions, and the text they are read
//! from.

mod instr;
mod operand;
mod parse;
mod program;

pub use instr::{Instruction, Opcode};
pub use operand::{decode, Address, Decoded, Operand, OperandKind, Scale};
pub use parse::{parse_instruction, parse_operand};
pub use program::{Program, DEFAULT_SLOT_WIDTH};
