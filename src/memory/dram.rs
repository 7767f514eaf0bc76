//! A flat array of bytes standing in for main memory

use crate::memory::Memory;
use std::fmt;

/// Size of a `Dram` when none is configured.
pub const DEFAULT_MEMORY_SIZE: usize = 0x10000;

/// The smallest `Dram` that can hold a single word.
const MIN_MEMORY_SIZE: usize = 8;

/// Physical memory with no paging.
///
/// Every virtual address is folded into the array by taking it modulo the
/// array's size, so distinct virtual addresses may alias. Words that straddle
/// the end of the array wrap around to its start a byte at a time.
#[derive(Clone, PartialEq, Eq)]
pub struct Dram {
    bytes: Vec<u8>,
}

impl Dram {
    /// Create zeroed memory of the given size.
    ///
    /// Sizes smaller than one word are rounded up to one word.
    pub fn new(size: usize) -> Self {
        Dram {
            bytes: vec![0; size.max(MIN_MEMORY_SIZE)],
        }
    }

    /// Create zeroed memory of the given size, or `None` if the allocation
    /// fails.
    pub fn try_new(size: usize) -> Option<Self> {
        let size = size.max(MIN_MEMORY_SIZE);
        let mut bytes = Vec::new();

        bytes.try_reserve_exact(size).ok()?;
        bytes.resize(size, 0);

        Some(Dram { bytes })
    }

    /// The number of bytes of physical storage.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    fn physical_index(&self, paddr: u64, offset: u64) -> usize {
        (paddr.wrapping_add(offset) % self.bytes.len() as u64) as usize
    }

    /// Store a series of 64-bit words at virtual addresses.
    pub fn seed<I>(&mut self, words: I)
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        for (vaddr, value) in words {
            self.write_virtual(vaddr, value);
        }
    }

    /// Raw view of physical storage.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Dram {
    fn default() -> Self {
        Dram::new(DEFAULT_MEMORY_SIZE)
    }
}

impl fmt::Debug for Dram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dram")
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl Memory for Dram {
    fn translate(&self, vaddr: u64) -> u64 {
        vaddr % self.bytes.len() as u64
    }

    fn load64(&self, paddr: u64) -> u64 {
        let mut word = [0u8; 8];

        for (i, byte) in word.iter_mut().enumerate() {
            *byte = self.bytes[self.physical_index(paddr, i as u64)];
        }

        u64::from_le_bytes(word)
    }

    fn store64(&mut self, paddr: u64, value: u64) {
        for (i, byte) in value.to_le_bytes().iter().enumerate() {
            let index = self.physical_index(paddr, i as u64);

            self.bytes[index] = *byte;
        }
    }
}
