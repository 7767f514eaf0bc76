//! The interface between a core and its memory

/// A byte-addressed memory the core can access in 64-bit words.
///
/// Addresses the core computes are virtual; an implementation decides how
/// they map onto its physical storage with `translate`. Words are stored
/// little-endian.
pub trait Memory {
    /// Map a virtual address onto a physical one.
    fn translate(&self, vaddr: u64) -> u64;

    /// Load the 64-bit word at a physical address.
    fn load64(&self, paddr: u64) -> u64;

    /// Store a 64-bit word at a physical address.
    fn store64(&mut self, paddr: u64, value: u64);

    /// Load the 64-bit word at a virtual address.
    fn read_virtual(&self, vaddr: u64) -> u64 {
        self.load64(self.translate(vaddr))
    }

    /// Store a 64-bit word at a virtual address.
    fn write_virtual(&mut self, vaddr: u64, value: u64) {
        let paddr = self.translate(vaddr);

        self.store64(paddr, value)
    }
}

impl<M> Memory for Box<M>
where
    M: Memory + ?Sized,
{
    fn translate(&self, vaddr: u64) -> u64 {
        (**self).translate(vaddr)
    }

    fn load64(&self, paddr: u64) -> u64 {
        (**self).load64(paddr)
    }

    fn store64(&mut self, paddr: u64, value: u64) {
        (**self).store64(paddr, value)
    }
}
