//! Common utilities for command implementations

use clap::{App, Arg, SubCommand};
use std::str::FromStr;

/// Enumeration of all CLI commands
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run,
    Parse,
}

impl Command {
    /// Enumerate all commands the simulator recognizes.
    pub fn enumerate() -> Vec<Self> {
        vec![Command::Run, Command::Parse]
    }

    /// Construct the subcommand object for this particular `Command`.
    pub fn into_clap_subcommand<'a, 'b>(self) -> App<'a, 'b> {
        match self {
            Command::Run => SubCommand::with_name("run")
                .about("Run a scenario until it halts or runs out of cycles")
                .arg(
                    Arg::with_name("scenario")
                        .value_name("scenario.json")
                        .index(1)
                        .required(true)
                        .help("The scenario file to run"),
                )
                .arg(
                    Arg::with_name("max_cycles")
                        .long("max-cycles")
                        .value_name("N")
                        .takes_value(true)
                        .help("Stop after this many instructions"),
                )
                .arg(
                    Arg::with_name("trace_regs")
                        .long("trace-regs")
                        .help("Print the registers after every instruction"),
                )
                .arg(
                    Arg::with_name("trace_stack")
                        .long("trace-stack")
                        .help("Print the top of the stack after every instruction"),
                ),
            Command::Parse => SubCommand::with_name("parse")
                .about("Parse one instruction and describe its operands")
                .arg(
                    Arg::with_name("instruction")
                        .value_name("\"mov %rax, %rbx\"")
                        .index(1)
                        .required(true)
                        .help("The instruction text to parse"),
                ),
        }
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "run" => Ok(Command::Run),
            "parse" => Ok(Command::Parse),
            _ => Err(()),
        }
    }
}
