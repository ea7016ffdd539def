use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use crate::core::{AssetSink, LocaleAsset};

/// Writes each locale asset to `<out_dir>/<file_name>`.
pub struct DirectorySink {
    out_dir: PathBuf,
}

impl DirectorySink {
    pub fn new(out_dir: &Path) -> Self {
        Self {
            out_dir: out_dir.to_path_buf(),
        }
    }

    /// Resolve `file_name` below the output directory.
    ///
    /// Only plain relative names are accepted, so no asset lands outside
    /// `out_dir`.
    fn target_path(&self, file_name: &str) -> Result<PathBuf> {
        let relative = Path::new(file_name);
        let mut has_name = false;
        for component in relative.components() {
            match component {
                Component::Normal(_) => has_name = true,
                Component::CurDir => {}
                _ => bail!(
                    "Locale bundle name escapes the output directory: {}",
                    file_name
                ),
            }
        }
        if !has_name {
            bail!("Locale bundle name is empty: {:?}", file_name);
        }
        Ok(self.out_dir.join(relative))
    }
}

impl AssetSink for DirectorySink {
    fn emit_asset(&mut self, asset: &LocaleAsset) -> Result<()> {
        let path = self.target_path(&asset.file_name)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&path, &asset.source)
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }
}
