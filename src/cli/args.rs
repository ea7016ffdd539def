//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `build`: Consolidate a build manifest into locale bundles
//! - `init`: Initialize glotbundle configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

pub const DEFAULT_MANIFEST: &str = "i18n-manifest.json";

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Build(cmd)) => cmd.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct BuildCommand {
    /// Build manifest describing chunks and extracted modules
    #[arg(long, short, default_value = DEFAULT_MANIFEST)]
    pub manifest: PathBuf,

    /// Directory the locale bundles are written to
    #[arg(long, short, default_value = "dist")]
    pub out_dir: PathBuf,

    /// Output file name pattern (overrides config file)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Locale code used as shared default text (overrides config file)
    #[arg(long)]
    pub shared_key: Option<String>,

    /// Only emit these locales (overrides config file)
    /// Can be specified multiple times: --locale en-us --locale es-mx
    #[arg(long = "locale")]
    pub locales: Vec<String>,

    /// Print consolidation diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merge extracted i18n fragments into one bundle per entry chunk and locale
    Build(BuildCommand),
    /// Initialize a new .glotbundlerc.json configuration file
    Init,
}
