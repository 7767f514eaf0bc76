//! Driving a core through a program

use crate::cpu::{instruction_cycle, Core};
use crate::isa::Program;
use crate::memory::Memory;
use crate::Fault;
use log::{info, warn};

/// How a call to `Machine::run` ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// The number of instructions executed.
    pub cycles: u64,

    /// Whether the program counter left the program.
    pub halted: bool,
}

/// A core together with the memory and program it executes.
#[derive(Debug)]
pub struct Machine<M> {
    core: Core,
    memory: M,
    program: Program,
}

impl<M> Machine<M>
where
    M: Memory,
{
    pub fn new(core: Core, memory: M, program: Program) -> Self {
        Machine {
            core,
            memory,
            program,
        }
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn into_parts(self) -> (Core, M, Program) {
        (self.core, self.memory, self.program)
    }

    /// Determine if the program counter has left the program.
    ///
    /// A program counter inside the program but off a slot boundary is not
    /// halted; fetching from it faults instead.
    pub fn is_halted(&self) -> bool {
        !self.program.covers(self.core.rip)
    }

    /// Execute one instruction.
    pub fn step(&mut self) -> Result<(), Fault> {
        instruction_cycle(&mut self.core, &mut self.memory, &self.program)
    }

    /// Execute instructions until the machine halts or `max_cycles`
    /// instructions have run.
    pub fn run(&mut self, max_cycles: u64) -> Result<RunSummary, Fault> {
        self.run_with(max_cycles, |_| {})
    }

    /// Like `run`, but calls `observe` after every instruction.
    pub fn run_with<F>(&mut self, max_cycles: u64, mut observe: F) -> Result<RunSummary, Fault>
    where
        F: FnMut(&Self),
    {
        let mut cycles = 0;

        while cycles < max_cycles && !self.is_halted() {
            if let Err(fault) = self.step() {
                warn!("{}", fault);
                return Err(fault);
            }

            cycles += 1;
            observe(self);
        }

        let summary = RunSummary {
            cycles,
            halted: self.is_halted(),
        };

        info!(
            "stopped at {:#x} after {} cycles{}",
            self.core.rip,
            cycles,
            if summary.halted { " (halted)" } else { "" }
        );

        Ok(summary)
    }
}
