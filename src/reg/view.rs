//! Register identities and the byte ranges their views span

use crate::reg::{resolve_view, spelling};
use crate::Error;
use std::{fmt, str};

/// Enumeration of all architectural general-purpose registers.
///
/// The legacy registers are named after their 64-bit spelling without the
/// leading `r`, so `A` is `rax`, `SI` is `rsi`, and so on.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Register {
    A,
    B,
    C,
    D,
    SI,
    DI,
    BP,
    SP,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
}

impl Register {
    pub const ALL: [Register; 16] = [
        Register::A,
        Register::B,
        Register::C,
        Register::D,
        Register::SI,
        Register::DI,
        Register::BP,
        Register::SP,
        Register::R8,
        Register::R9,
        Register::R10,
        Register::R11,
        Register::R12,
        Register::R13,
        Register::R14,
        Register::R15,
    ];

    /// The position of this register's storage in the register file.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The 64-bit name of this register, without the `%` sigil.
    pub fn name(self) -> &'static str {
        use Register::*;

        match self {
            A => "rax",
            B => "rbx",
            C => "rcx",
            D => "rdx",
            SI => "rsi",
            DI => "rdi",
            BP => "rbp",
            SP => "rsp",
            R8 => "r8",
            R9 => "r9",
            R10 => "r10",
            R11 => "r11",
            R12 => "r12",
            R13 => "r13",
            R14 => "r14",
            R15 => "r15",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A named, byte-range-scoped interpretation of a register's storage.
///
/// Views are ordered from widest to narrowest, so that seeding a register
/// file in view order writes whole registers before their aliases.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum View {
    /// All eight bytes.
    Quad,

    /// The low four bytes.
    Double,

    /// The low two bytes.
    Word,

    /// Byte 1.
    High,

    /// Byte 0.
    Low,
}

impl View {
    pub const ALL: [View; 5] = [View::Quad, View::Double, View::Word, View::High, View::Low];

    /// The index of the first byte this view spans.
    pub fn offset(self) -> u32 {
        match self {
            View::High => 1,
            _ => 0,
        }
    }

    /// The number of bytes this view spans.
    pub fn width(self) -> u32 {
        match self {
            View::Quad => 8,
            View::Double => 4,
            View::Word => 2,
            View::High | View::Low => 1,
        }
    }

    /// A mask of the low `width` bytes of a value.
    pub fn mask(self) -> u64 {
        match self.width() {
            8 => u64::MAX,
            w => (1 << (w * 8)) - 1,
        }
    }
}

/// The place a register operand reads from or writes to.
///
/// A location names one view of one register. It never holds the register's
/// value; reads and writes go through `Registers`, which enforces the byte
/// overlay between views.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    register: Register,
    view: View,
}

impl Location {
    pub fn new(register: Register, view: View) -> Self {
        Location { register, view }
    }

    /// The full 64-bit view of a register.
    pub fn quad(register: Register) -> Self {
        Location::new(register, View::Quad)
    }

    pub fn register(self) -> Register {
        self.register
    }

    pub fn view(self) -> View {
        self.view
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match spelling(*self) {
            Some(name) => write!(f, "%{}", name),
            // The high byte of r8-r15 has no name; `resolve_view` rejects this.
            None => write!(f, "%{}h", self.register),
        }
    }
}

impl str::FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_view(s)
    }
}

derive_deserialize_from_str!(Location, "valid register name");
