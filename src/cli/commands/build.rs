use std::path::Path;

use anyhow::{Context, Result};

use super::{BuildSummary, CommandResult, CommandSummary};
use crate::{
    cli::{
        args::BuildCommand, exit_status::ExitStatus, manifest::load_manifest, sink::DirectorySink,
    },
    config::{BundleConfig, load_config},
    core::BundlePipeline,
};

pub fn build(cmd: BuildCommand) -> Result<CommandResult> {
    let start_dir = std::env::current_dir().context("Failed to read current directory")?;
    build_in(&start_dir, cmd)
}

/// Run a build with relative paths resolved against `root`.
pub fn build_in(root: &Path, cmd: BuildCommand) -> Result<CommandResult> {
    let config_result = load_config(root)?;
    if cmd.verbose && !config_result.from_file {
        eprintln!("Note: No .glotbundlerc.json found, using default configuration");
    }
    let config = apply_overrides(config_result.config, &cmd);

    let manifest = load_manifest(&root.join(&cmd.manifest))?;
    let chunks = manifest.host.len();

    let mut pipeline = BundlePipeline::new(config, manifest.host)?;
    for registration in manifest.registrations {
        pipeline
            .register(
                &registration.identifier,
                registration.fragment,
                registration.rank,
                registration.chunk,
            )
            .with_context(|| format!("Invalid module entry: {}", registration.identifier))?;
    }
    pipeline.consolidate();

    let out_dir = root.join(&cmd.out_dir);
    let mut sink = DirectorySink::new(&out_dir);
    let report = pipeline.emit(&mut sink)?;

    let status = ExitStatus::from_problems(!report.collisions.is_empty());

    Ok(CommandResult {
        summary: CommandSummary::Build(BuildSummary {
            out_dir: cmd.out_dir,
            files: report.files,
            collisions: report.collisions,
            chunks,
            modules: report.modules,
            fragment_files: manifest.fragment_files,
            consolidation: report.consolidation,
            config_from_file: config_result.from_file,
        }),
        status,
    })
}

/// CLI arguments take priority over the config file.
fn apply_overrides(mut config: BundleConfig, cmd: &BuildCommand) -> BundleConfig {
    if let Some(pattern) = &cmd.pattern {
        config.file_name_pattern = pattern.clone();
    }
    if let Some(shared_key) = &cmd.shared_key {
        config.shared_text_key = Some(shared_key.clone());
    }
    if !cmd.locales.is_empty() {
        config.locales = Some(cmd.locales.clone());
    }
    config
}
