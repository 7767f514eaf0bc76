//! Operands and their addressing modes

use crate::maths::parse_integer;
use crate::reg::{Location, Registers};
use crate::Error;
use std::{fmt, str};

/// The factor an index register is multiplied by in a memory operand.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Scale {
    One,
    Two,
    Four,
    Eight,
}

impl Scale {
    pub fn from_factor(factor: u64) -> Option<Self> {
        match factor {
            1 => Some(Scale::One),
            2 => Some(Scale::Two),
            4 => Some(Scale::Four),
            8 => Some(Scale::Eight),
            _ => None,
        }
    }

    pub fn factor(self) -> u64 {
        match self {
            Scale::One => 1,
            Scale::Two => 2,
            Scale::Four => 4,
            Scale::Eight => 8,
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.factor())
    }
}

impl str::FromStr for Scale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();

        parse_integer(text)
            .ok()
            .and_then(|factor| Scale::from_factor(factor as u64))
            .ok_or_else(|| Error::IllegalScale(text.to_string()))
    }
}

/// The twelve operand encodings.
///
/// `Empty`, `Immediate` and `Register` are the non-memory forms; the rest name
/// which parts of `offset(base,index,scale)` a memory operand has.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum OperandKind {
    Empty,
    Immediate,
    Register,
    Absolute,
    Base,
    OffsetBase,
    BaseIndex,
    OffsetBaseIndex,
    IndexScale,
    OffsetIndexScale,
    BaseIndexScale,
    OffsetBaseIndexScale,
}

impl OperandKind {
    pub fn is_memory(self) -> bool {
        !matches!(
            self,
            OperandKind::Empty | OperandKind::Immediate | OperandKind::Register
        )
    }

    /// Determine the memory encoding that has exactly the given parts.
    fn of_memory(offset: bool, base: bool, index: bool, scale: bool) -> Option<Self> {
        use OperandKind::*;

        match (offset, base, index, scale) {
            (true, false, false, false) => Some(Absolute),
            (false, true, false, false) => Some(Base),
            (true, true, false, false) => Some(OffsetBase),
            (false, true, true, false) => Some(BaseIndex),
            (true, true, true, false) => Some(OffsetBaseIndex),
            (false, false, true, true) => Some(IndexScale),
            (true, false, true, true) => Some(OffsetIndexScale),
            (false, true, true, true) => Some(BaseIndexScale),
            (true, true, true, true) => Some(OffsetBaseIndexScale),
            _ => None,
        }
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use OperandKind::*;

        let form = match self {
            Empty => "empty",
            Immediate => "$imm",
            Register => "%reg",
            Absolute => "imm",
            Base => "(b)",
            OffsetBase => "imm(b)",
            BaseIndex => "(b,i)",
            OffsetBaseIndex => "imm(b,i)",
            IndexScale => "(,i,s)",
            OffsetIndexScale => "imm(,i,s)",
            BaseIndexScale => "(b,i,s)",
            OffsetBaseIndexScale => "imm(b,i,s)",
        };

        write!(f, "{}", form)
    }
}

/// A memory operand: some legal combination of `offset(base,index,scale)`.
///
/// Addresses can only be built with parts that form one of the nine memory
/// encodings, so the encoding is always known.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Address {
    offset: Option<i64>,
    base: Option<Location>,
    index: Option<Location>,
    scale: Option<Scale>,
    kind: OperandKind,
}

impl Address {
    /// Build an address from its parts, if they form a legal encoding.
    pub fn new(
        offset: Option<i64>,
        base: Option<Location>,
        index: Option<Location>,
        scale: Option<Scale>,
    ) -> Option<Self> {
        let kind = OperandKind::of_memory(
            offset.is_some(),
            base.is_some(),
            index.is_some(),
            scale.is_some(),
        )?;

        Some(Address {
            offset,
            base,
            index,
            scale,
            kind,
        })
    }

    /// An address with no registers.
    pub fn absolute(offset: i64) -> Self {
        Address {
            offset: Some(offset),
            base: None,
            index: None,
            scale: None,
            kind: OperandKind::Absolute,
        }
    }

    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    pub fn base(&self) -> Option<Location> {
        self.base
    }

    pub fn index(&self) -> Option<Location> {
        self.index
    }

    pub fn scale(&self) -> Option<Scale> {
        self.scale
    }

    pub fn kind(&self) -> OperandKind {
        self.kind
    }

    /// Compute the virtual address this operand refers to.
    ///
    /// Arithmetic wraps at 64 bits. Registers are read through their own
    /// view, and an index without a scale is taken once.
    pub fn effective(&self, registers: &Registers) -> u64 {
        let offset = self.offset.map_or(0, |o| o as u64);
        let base = self.base.map_or(0, |b| registers.read(b));
        let index = self.index.map_or(0, |i| registers.read(i));
        let factor = self.scale.map_or(1, Scale::factor);

        offset
            .wrapping_add(base)
            .wrapping_add(index.wrapping_mul(factor))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(offset) = self.offset {
            write_signed_hex(f, offset)?;
        }

        if self.kind == OperandKind::Absolute {
            return Ok(());
        }

        write!(f, "(")?;
        if let Some(base) = self.base {
            write!(f, "{}", base)?;
        }
        if let Some(index) = self.index {
            write!(f, ",{}", index)?;
        }
        if let Some(scale) = self.scale {
            write!(f, ",{}", scale)?;
        }
        write!(f, ")")
    }
}

fn write_signed_hex(f: &mut fmt::Formatter<'_>, value: i64) -> fmt::Result {
    if value < 0 {
        write!(f, "-{:#x}", value.unsigned_abs())
    } else {
        write!(f, "{:#x}", value)
    }
}

/// One operand of an instruction, as written.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Empty,
    Immediate(i64),
    Register(Location),
    Memory(Address),
}

impl Operand {
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Empty => OperandKind::Empty,
            Operand::Immediate(_) => OperandKind::Immediate,
            Operand::Register(_) => OperandKind::Register,
            Operand::Memory(address) => address.kind(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Operand::Empty
    }

    pub fn decode(&self, registers: &Registers) -> Decoded {
        decode(self, registers)
    }
}

impl Default for Operand {
    fn default() -> Self {
        Operand::Empty
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Empty => Ok(()),
            Operand::Immediate(value) => {
                write!(f, "$")?;
                write_signed_hex(f, *value)
            }
            Operand::Register(location) => write!(f, "{}", location),
            Operand::Memory(address) => write!(f, "{}", address),
        }
    }
}

/// What an operand refers to once the register file is taken into account.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decoded {
    /// A plain value: an immediate's bits, or zero for an empty operand.
    Value(u64),

    /// A register view to read or write.
    Location(Location),

    /// A virtual address. It has not been dereferenced.
    Address(u64),
}

/// Resolve an operand against the current register values.
///
/// Decoding only reads registers, so it may be repeated freely.
pub fn decode(operand: &Operand, registers: &Registers) -> Decoded {
    match operand {
        Operand::Empty => Decoded::Value(0),
        Operand::Immediate(value) => Decoded::Value(*value as u64),
        Operand::Register(location) => Decoded::Location(*location),
        Operand::Memory(address) => Decoded::Address(address.effective(registers)),
    }
}
