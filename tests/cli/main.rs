use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod build;
mod init;

const BIN_NAME: &str = "glotbundle";
const MANIFEST_NAME: &str = "i18n-manifest.json";

/// Replaces the temp project path in error messages.
pub const PROJECT_FILTER: (&str, &str) = (
    r"(/[^\s:]+)?/i18n-manifest\.json",
    "[PROJECT]/i18n-manifest.json",
);

/// A throwaway project directory with its own `.git` marker, so config
/// discovery never leaves it.
pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project whose default manifest is `manifest`.
    pub fn with_manifest(manifest: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(MANIFEST_NAME, manifest)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn exists(&self, path: &str) -> bool {
        self.project_dir.join(path).exists()
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn build_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("build");
        cmd
    }

    pub fn init_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("init");
        cmd
    }
}
