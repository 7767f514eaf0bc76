//! Instruction streams

use crate::{Error, Result};
use std::convert::TryFrom;

/// Width of an instruction slot when none is configured.
pub const DEFAULT_SLOT_WIDTH: u64 = 64;

/// An ordered run of fixed-width instruction slots.
///
/// Slot `k` lives at virtual address `base + k * slot_width` and holds the
/// assembly text of one instruction. Slots are never wider than the slot
/// width; this is checked when the program is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    base: u64,
    slot_width: u64,
    slots: Vec<String>,
}

impl Program {
    /// Build a program from one instruction per item.
    pub fn new<I, S>(base: u64, slot_width: u64, instructions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut slots = Vec::new();

        for text in instructions {
            let text = text.into();

            if text.len() as u64 > slot_width {
                return Err(Error::SlotOverflow {
                    text,
                    width: slot_width,
                });
            }

            slots.push(text);
        }

        Ok(Program {
            base,
            slot_width,
            slots,
        })
    }

    /// Build a program from assembly source.
    ///
    /// Each non-blank line is one instruction. Lines whose first
    /// non-whitespace character is `#` are comments.
    pub fn from_source(base: u64, slot_width: u64, source: &str) -> Result<Self> {
        Program::from_lines(base, slot_width, source.lines())
    }

    /// Build a program from lines of assembly, skipping blank and comment
    /// lines the same way `from_source` does.
    pub fn from_lines<'a, I>(base: u64, slot_width: u64, lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Program::new(
            base,
            slot_width,
            lines
                .into_iter()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn slot_width(&self) -> u64 {
        self.slot_width
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The address one slot past the last instruction.
    pub fn end(&self) -> u64 {
        self.base.wrapping_add(self.span())
    }

    fn span(&self) -> u64 {
        (self.slots.len() as u64).wrapping_mul(self.slot_width)
    }

    /// The address of the `index`th slot, if there is one.
    pub fn address_of(&self, index: usize) -> Option<u64> {
        if index < self.slots.len() {
            Some(self.base.wrapping_add((index as u64).wrapping_mul(self.slot_width)))
        } else {
            None
        }
    }

    fn index_of(&self, address: u64) -> Option<usize> {
        let offset = address.checked_sub(self.base)?;

        if offset.checked_rem(self.slot_width)? != 0 {
            return None;
        }

        let index = usize::try_from(offset / self.slot_width).ok()?;

        if index < self.slots.len() {
            Some(index)
        } else {
            None
        }
    }

    /// Determine if an address falls anywhere within the program's slots,
    /// whether or not it is on a slot boundary.
    pub fn covers(&self, address: u64) -> bool {
        address
            .checked_sub(self.base)
            .map_or(false, |offset| offset < self.span())
    }

    /// Determine if an address is the start of a slot.
    pub fn contains(&self, address: u64) -> bool {
        self.index_of(address).is_some()
    }

    /// Fetch the text of the slot starting at an address.
    pub fn fetch(&self, address: u64) -> Result<&str> {
        self.index_of(address)
            .map(|index| self.slots[index].as_str())
            .ok_or(Error::NoInstruction(address))
    }

    /// Iterate every slot along with its address.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &str)> + '_ {
        self.slots.iter().enumerate().map(move |(index, text)| {
            (
                self.base.wrapping_add((index as u64).wrapping_mul(self.slot_width)),
                text.as_str(),
            )
        })
    }
}
