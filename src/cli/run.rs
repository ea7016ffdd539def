//! Dispatches to the command handler for the parsed arguments.
//!
//! # Returns
//! - `Ok(CommandResult)` with the command summary and exit status
//! - `Err` if the command fails (e.g., unreadable manifest, invalid config)

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, build::build, init::init},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Build(cmd)) => build(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
