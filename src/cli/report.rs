//! Summary printing for CLI commands.
//!
//! Separate from the engine so glotbundle can be used as a library.

use std::{
    collections::HashSet,
    io::{self, Write},
};

use colored::Colorize;

use super::commands::{BuildSummary, CommandResult, CommandSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock(), &mut io::stderr().lock());
}

/// Print a command result to custom writers.
pub fn print_to<W: Write, E: Write>(
    result: &CommandResult,
    verbose: bool,
    out: &mut W,
    err: &mut E,
) {
    match &result.summary {
        CommandSummary::Build(summary) => print_build(summary, verbose, out, err),
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
}

fn print_build<W: Write, E: Write>(
    summary: &BuildSummary,
    verbose: bool,
    out: &mut W,
    err: &mut E,
) {
    if summary.files.is_empty() {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "No locale text found in {} {}",
                summary.chunks,
                plural(summary.chunks, "chunk", "chunks")
            )
            .green()
        );
        return;
    }

    let roots: HashSet<usize> = summary.files.iter().map(|f| f.chunk).collect();
    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} locale {} for {} {} ({} {}) to {}",
            summary.files.len(),
            plural(summary.files.len(), "bundle", "bundles"),
            roots.len(),
            plural(roots.len(), "chunk", "chunks"),
            summary.modules,
            plural(summary.modules, "module", "modules"),
            summary.out_dir.display()
        )
        .green()
    );

    let width = summary
        .files
        .iter()
        .map(|f| f.file_name.len())
        .max()
        .unwrap_or(0);
    for file in &summary.files {
        let _ = writeln!(
            out,
            "  {:<width$}  {}  {}",
            file.file_name,
            file.locale.cyan(),
            format!("{} B", file.size).dimmed(),
            width = width
        );
    }

    if verbose {
        let stats = &summary.consolidation;
        let _ = writeln!(
            err,
            "{} {} root {}, {} dynamic {} merged, {} {} moved, {} fragment {} read",
            "note:".bold(),
            stats.roots,
            plural(stats.roots, "chunk", "chunks"),
            stats.chunks_merged,
            plural(stats.chunks_merged, "chunk", "chunks"),
            stats.modules_stripped,
            plural(stats.modules_stripped, "module", "modules"),
            summary.fragment_files,
            plural(summary.fragment_files, "file", "files"),
        );
    }

    for name in &summary.collisions {
        let _ = writeln!(
            err,
            "{} {} was written by more than one chunk (add {} to the file name pattern)",
            "warning:".bold().yellow(),
            name,
            "[name]".cyan()
        );
    }
}

fn print_init<W: Write, E: Write>(summary: &InitSummary, out: &mut W, err: &mut E) {
    if summary.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else if let Some(message) = &summary.error {
        let _ = writeln!(err, "{} {}", FAILURE_MARK.red(), message.red());
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
