//! Human-readable views of a core's state

use crate::cpu::Core;
use crate::memory::Memory;
use crate::reg::Register;
use std::fmt;

/// Displays every register, the program counter and the flags.
pub struct RegisterDump<'a>(pub &'a Core);

impl<'a> fmt::Display for RegisterDump<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.0;

        for row in Register::ALL.chunks(4) {
            let mut sep = "";

            for register in row {
                write!(
                    f,
                    "{}{:>3} = {:16x}",
                    sep,
                    register.name(),
                    core.registers.get(*register)
                )?;
                sep = "\t";
            }

            writeln!(f)?;
        }

        writeln!(f, "rip = {:16x}", core.rip)?;
        write!(f, "{}", core.flags)
    }
}

/// Displays the 64-bit words around the top of the stack, highest address
/// first, marking the word `rsp` points at.
pub struct StackDump<'a, M: ?Sized> {
    core: &'a Core,
    memory: &'a M,
    depth: u64,
}

impl<'a, M> StackDump<'a, M>
where
    M: Memory + ?Sized,
{
    /// Dump `depth` words above `rsp` and `depth` words from `rsp` down.
    pub fn new(core: &'a Core, memory: &'a M, depth: u64) -> Self {
        StackDump {
            core,
            memory,
            depth,
        }
    }
}

impl<'a, M> fmt::Display for StackDump<'a, M>
where
    M: Memory + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rsp = self.core.rsp();
        let top = rsp.wrapping_add(self.depth.wrapping_mul(8));

        for i in 0..self.depth * 2 {
            let vaddr = top.wrapping_sub(i * 8);

            write!(
                f,
                "0x{:016x} : {:16x}",
                vaddr,
                self.memory.read_virtual(vaddr)
            )?;

            if vaddr == rsp {
                write!(f, " <== rsp")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
