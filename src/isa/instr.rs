//! Opcodes and instructions

use crate::isa::Operand;
use crate::Error;
use std::{fmt, str};

/// Every operation the core can execute.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Opcode {
    Mov,
    Push,
    Pop,
    Leave,
    Call,
    Ret,
    Add,
    Sub,
    Cmp,
    Jne,
    Jmp,
}

impl Opcode {
    /// The canonical mnemonic, without an operand-size suffix.
    pub fn mnemonic(self) -> &'static str {
        use Opcode::*;

        match self {
            Mov => "mov",
            Push => "push",
            Pop => "pop",
            Leave => "leave",
            Call => "call",
            Ret => "ret",
            Add => "add",
            Sub => "sub",
            Cmp => "cmp",
            Jne => "jne",
            Jmp => "jmp",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

impl str::FromStr for Opcode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Opcode::*;

        match s {
            "mov" | "movq" => Ok(Mov),
            "push" | "pushq" => Ok(Push),
            "pop" | "popq" => Ok(Pop),
            "leave" | "leaveq" => Ok(Leave),
            "call" | "callq" => Ok(Call),
            "ret" | "retq" => Ok(Ret),
            "add" | "addq" => Ok(Add),
            "sub" | "subq" => Ok(Sub),
            "cmp" | "cmpq" => Ok(Cmp),
            "jne" => Ok(Jne),
            "jmp" => Ok(Jmp),
            _ => Err(Error::UnknownOpcode(s.to_string())),
        }
    }
}

/// A single parsed instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    opcode: Opcode,
    src: Operand,
    dst: Operand,
}

impl Instruction {
    pub fn new(opcode: Opcode, src: Operand, dst: Operand) -> Self {
        Instruction { opcode, src, dst }
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn src(&self) -> &Operand {
        &self.src
    }

    pub fn dst(&self) -> &Operand {
        &self.dst
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;

        match (self.src.is_empty(), self.dst.is_empty()) {
            (true, true) => Ok(()),
            (false, true) => write!(f, " {}", self.src),
            (true, false) => write!(f, " , {}", self.dst),
            (false, false) => write!(f, " {}, {}", self.src, self.dst),
        }
    }
}
