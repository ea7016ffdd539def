use std::{fs, path::Path};

use anyhow::Result;

use super::{CommandResult, CommandSummary, InitSummary};
use crate::cli::exit_status::ExitStatus;
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init() -> Result<CommandResult> {
    init_in(Path::new("."))
}

/// Write the default config into `dir`, refusing to overwrite an existing one.
pub fn init_in(dir: &Path) -> Result<CommandResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Ok(CommandResult {
            summary: CommandSummary::Init(InitSummary {
                created: false,
                error: Some(format!("{} already exists", CONFIG_FILE_NAME)),
            }),
            status: ExitStatus::Failure,
        });
    }

    fs::write(&config_path, default_config_json()?)?;

    Ok(CommandResult {
        summary: CommandSummary::Init(InitSummary {
            created: true,
            error: None,
        }),
        status: ExitStatus::Success,
    })
}
