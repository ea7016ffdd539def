use anyhow::Result;

mod args;
pub mod commands;
pub mod exit_status;
pub mod manifest;
mod report;
mod run;
pub mod sink;

pub use args::{Arguments, BuildCommand, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    if verbose {
        init_tracing();
    }

    let result = run::run(args)?;
    report::print(&result, verbose);

    Ok(result.status)
}

/// Send engine diagnostics to stderr.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .without_time()
        .try_init();
}
