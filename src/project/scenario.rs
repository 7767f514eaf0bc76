//! Scenario file representation

use crate::cpu::{Core, Machine};
use crate::isa::{Program, DEFAULT_SLOT_WIDTH};
use crate::maths::Literal;
use crate::memory::{Dram, DEFAULT_MEMORY_SIZE};
use crate::project::{Error, Result};
use crate::reg::Location;
use relative_path::RelativePathBuf;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Instruction limit of a run when none is configured.
pub const DEFAULT_MAX_CYCLES: u64 = 10_000;

/// The largest memory a scenario may ask for.
pub const MAX_MEMORY_SIZE: usize = 1 << 30;

fn default_memory_size() -> usize {
    DEFAULT_MEMORY_SIZE
}

fn default_slot_width() -> u64 {
    DEFAULT_SLOT_WIDTH
}

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}

/// In-memory representation of a scenario file.
///
/// A scenario describes everything needed to start a run: the size of memory,
/// the program and where it lives, and the initial contents of registers and
/// memory. Register names and integers are written as strings, so that
/// addresses can be given in hex.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default = "default_memory_size")]
    memory_size: usize,

    #[serde(default = "default_slot_width")]
    slot_width: u64,

    /// Address of the first instruction slot.
    #[serde(default)]
    base: Literal,

    /// Where execution starts. Defaults to `base`.
    #[serde(default)]
    entry: Option<Literal>,

    #[serde(default = "default_max_cycles")]
    max_cycles: u64,

    /// Register values, applied widest view first.
    #[serde(default)]
    registers: BTreeMap<Location, Literal>,

    /// 64-bit words of memory, keyed by virtual address.
    #[serde(default)]
    memory: BTreeMap<Literal, Literal>,

    /// The program, one instruction per item. Blank and `#` items are
    /// skipped, as in a source file.
    #[serde(default)]
    program: Option<Vec<String>>,

    /// An assembly file holding the program, relative to the scenario file.
    #[serde(default)]
    source: Option<RelativePathBuf>,

    #[serde(skip)]
    directory: PathBuf,
}

impl Scenario {
    /// Read a scenario file.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        let mut scenario: Self = serde_json::from_reader(file)?;

        scenario.directory = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(scenario)
    }

    /// Parse a scenario from JSON text.
    ///
    /// Source files named by the scenario are resolved against `directory`.
    pub fn from_json<P: Into<PathBuf>>(json: &str, directory: P) -> Result<Self> {
        let mut scenario: Self = serde_json::from_str(json)?;

        scenario.directory = directory.into();

        Ok(scenario)
    }

    pub fn memory_size(&self) -> usize {
        self.memory_size
    }

    pub fn slot_width(&self) -> u64 {
        self.slot_width
    }

    pub fn base(&self) -> u64 {
        self.base.value()
    }

    pub fn entry(&self) -> u64 {
        self.entry.unwrap_or(self.base).value()
    }

    pub fn max_cycles(&self) -> u64 {
        self.max_cycles
    }

    pub fn set_max_cycles(&mut self, max_cycles: u64) {
        self.max_cycles = max_cycles;
    }

    /// The path of the scenario's assembly source, if it has one.
    pub fn source_path(&self) -> Option<PathBuf> {
        self.source
            .as_ref()
            .map(|source| source.to_path(&self.directory))
    }

    /// Build the scenario's program.
    pub fn program(&self) -> Result<Program> {
        match (&self.program, self.source_path()) {
            (Some(lines), None) => Ok(Program::from_lines(
                self.base(),
                self.slot_width,
                lines.iter().map(String::as_str),
            )?),
            (None, Some(path)) => {
                let source = fs::read_to_string(path)?;

                Ok(Program::from_source(self.base(), self.slot_width, &source)?)
            }
            (Some(_), Some(_)) => Err(Error::ConflictingProgram),
            (None, None) => Err(Error::MissingProgram),
        }
    }

    /// Build a machine in the scenario's initial state.
    pub fn build_machine(&self) -> Result<Machine<Dram>> {
        let program = self.program()?;
        let mut core = Core::new(self.entry());

        for (location, value) in self.registers.iter() {
            core.write(*location, value.value());
        }

        if self.memory_size > MAX_MEMORY_SIZE {
            return Err(Error::MemorySize(self.memory_size));
        }

        let mut memory =
            Dram::try_new(self.memory_size).ok_or(Error::MemorySize(self.memory_size))?;
        memory.seed(
            self.memory
                .iter()
                .map(|(address, value)| (address.value(), value.value())),
        );

        Ok(Machine::new(core, memory, program))
    }
}
