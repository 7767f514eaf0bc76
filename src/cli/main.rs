//! CLI support for non-command bits

use crate::cli::{self, Command};
use std::io;
use std::str::FromStr;

pub fn main() -> io::Result<()> {
    let mut app = app_from_crate!();

    for cmd in Command::enumerate().iter() {
        app = app.subcommand(cmd.into_clap_subcommand());
    }

    let matches = app.get_matches();
    let (command, submatches) = matches.subcommand();

    match (Command::from_str(command), submatches) {
        (Ok(Command::Run), Some(submatches)) => cli::run(submatches),
        (Ok(Command::Parse), Some(submatches)) => cli::parse(submatches),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "No command given; try `run` or `parse`.",
        )),
    }
}
