//! CLI command: run

use crate::cpu::{Machine, RegisterDump, StackDump};
use crate::memory::Memory;
use crate::project::Scenario;
use clap::ArgMatches;
use std::io;

/// Number of words shown either side of `rsp` when tracing the stack.
const STACK_TRACE_DEPTH: u64 = 10;

fn print_state<M: Memory>(machine: &Machine<M>, trace_regs: bool, trace_stack: bool) {
    if trace_regs {
        println!("{}", RegisterDump(machine.core()));
    }

    if trace_stack {
        print!(
            "{}",
            StackDump::new(machine.core(), machine.memory(), STACK_TRACE_DEPTH)
        );
    }
}

/// Run a scenario and report how it ended.
pub fn run<'a>(argv: &ArgMatches<'a>) -> io::Result<()> {
    let path = argv
        .value_of("scenario")
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Did not provide a scenario"))?;
    let mut scenario = Scenario::read(path)?;

    if let Some(max_cycles) = argv.value_of("max_cycles") {
        let max_cycles = max_cycles.parse().map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("`{}` is not a valid cycle count", max_cycles),
            )
        })?;

        scenario.set_max_cycles(max_cycles);
    }

    let trace_regs = argv.is_present("trace_regs");
    let trace_stack = argv.is_present("trace_stack");
    let mut machine = scenario.build_machine()?;

    print_state(&machine, trace_regs, trace_stack);

    let summary = machine
        .run_with(scenario.max_cycles(), |m| {
            print_state(m, trace_regs, trace_stack)
        })
        .map_err(|fault| io::Error::new(io::ErrorKind::Other, fault))?;

    if summary.halted {
        eprintln!("Halted after {} cycles", summary.cycles);
    } else {
        eprintln!(
            "Stopped at {:#x} after {} cycles",
            machine.core().rip,
            summary.cycles
        );
    }

    println!("{}", RegisterDump(machine.core()));

    Ok(())
}
