//! CLI command: parse

use crate::isa::{parse_instruction, Operand};
use clap::ArgMatches;
use std::io;

fn describe(operand: &Operand) -> String {
    match operand {
        Operand::Empty => format!("{}", operand.kind()),
        _ => format!("{} ({})", operand, operand.kind()),
    }
}

/// Parse a single instruction and print what it was understood as.
pub fn parse<'a>(argv: &ArgMatches<'a>) -> io::Result<()> {
    let text = argv
        .value_of("instruction")
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Did not provide an instruction"))?;

    let instruction = parse_instruction(text)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    println!("{}", instruction);
    println!("opcode: {:?}", instruction.opcode());
    println!("src:    {}", describe(instruction.src()));
    println!("dst:    {}", describe(instruction.dst()));

    Ok(())
}
