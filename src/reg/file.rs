//! Register storage

use crate::reg::{Location, Register};

/// The sixteen general-purpose registers of one core.
///
/// Each register is stored as a single little-endian 64-bit value. Views are
/// applied at access time: a write through a view replaces exactly the bytes
/// that view spans, and a read through a view returns exactly those bytes,
/// zero-extended. No write ever sign- or zero-extends into the rest of the
/// register.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    values: [u64; 16],
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the bytes spanned by a location.
    pub fn read(&self, location: Location) -> u64 {
        let view = location.view();

        (self.values[location.register().index()] >> (view.offset() * 8)) & view.mask()
    }

    /// Write the low bytes of `value` into the bytes spanned by a location.
    ///
    /// Bytes of `value` wider than the view are discarded.
    pub fn write(&mut self, location: Location, value: u64) {
        let view = location.view();
        let shift = view.offset() * 8;
        let mask = view.mask() << shift;
        let slot = &mut self.values[location.register().index()];

        *slot = (*slot & !mask) | ((value << shift) & mask);
    }

    /// Read a whole register.
    pub fn get(&self, register: Register) -> u64 {
        self.values[register.index()]
    }

    /// Replace a whole register.
    pub fn set(&mut self, register: Register, value: u64) {
        self.values[register.index()] = value;
    }

    /// The register's storage, as it would be laid out in memory.
    pub fn to_le_bytes(&self, register: Register) -> [u8; 8] {
        self.get(register).to_le_bytes()
    }

    /// Iterate every register along with its full value.
    pub fn iter(&self) -> impl Iterator<Item = (Register, u64)> + '_ {
        let all: &'static [Register; 16] = &Register::ALL;

        all.iter().map(move |r| (*r, self.get(*r)))
    }
}
