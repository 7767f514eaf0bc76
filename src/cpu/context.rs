//! Execution context of a single core

use crate::maths::Flags;
use crate::memory::Memory;
use crate::reg::{Location, Register, Registers};

/// Size in bytes of a value on the stack.
const STACK_SLOT: u64 = 8;

/// Everything one core carries between instructions.
///
/// Memory is not part of the core; it is passed to every cycle by whoever
/// owns the core.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Core {
    pub registers: Registers,
    pub flags: Flags,
    pub rip: u64,
}

impl Core {
    /// Create a core with zeroed registers and flags that will start
    /// executing at `rip`.
    pub fn new(rip: u64) -> Self {
        Core {
            registers: Registers::new(),
            flags: Flags::default(),
            rip,
        }
    }

    pub fn rsp(&self) -> u64 {
        self.registers.get(Register::SP)
    }

    pub fn set_rsp(&mut self, value: u64) {
        self.registers.set(Register::SP, value)
    }

    /// Read a register location.
    pub fn read(&self, location: Location) -> u64 {
        self.registers.read(location)
    }

    /// Write a register location.
    pub fn write(&mut self, location: Location, value: u64) {
        self.registers.write(location, value)
    }

    /// Decrement `rsp` and store a word at the new top of stack.
    pub fn push<M>(&mut self, memory: &mut M, value: u64)
    where
        M: Memory + ?Sized,
    {
        let rsp = self.rsp().wrapping_sub(STACK_SLOT);

        self.set_rsp(rsp);
        memory.write_virtual(rsp, value);
    }

    /// Load the word at the top of stack and increment `rsp` past it.
    pub fn pop<M>(&mut self, memory: &M) -> u64
    where
        M: Memory + ?Sized,
    {
        let rsp = self.rsp();
        let value = memory.read_virtual(rsp);

        self.set_rsp(rsp.wrapping_add(STACK_SLOT));

        value
    }
}
