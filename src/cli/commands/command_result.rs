use std::path::PathBuf;

use crate::core::{ConsolidationStats, EmittedFile};

use super::super::exit_status::ExitStatus;

#[derive(Debug)]
pub enum CommandSummary {
    Build(BuildSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct BuildSummary {
    pub out_dir: PathBuf,
    pub files: Vec<EmittedFile>,
    /// File names written by more than one chunk.
    pub collisions: Vec<String>,
    pub chunks: usize,
    pub modules: usize,
    pub fragment_files: usize,
    pub consolidation: ConsolidationStats,
    /// True if the config came from a `.glotbundlerc.json` file.
    pub config_from_file: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    /// Set when the config file could not be created.
    pub error: Option<String>,
}

/// Result of running a glotbundle command
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub status: ExitStatus,
}
