use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".glotbundlerc.json";

/// Placeholder substituted with the locale code in `file_name_pattern`.
pub const LOCALE_PLACEHOLDER: &str = "[locale]";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleConfig {
    /// Output name template; `[locale]` is required, other tokens are chunk tokens.
    #[serde(default = "default_file_name_pattern", alias = "file_name_pattern")]
    pub file_name_pattern: String,
    /// Reserved locale code whose value is a default for every other locale.
    #[serde(default, alias = "shared_text_key")]
    pub shared_text_key: Option<String>,
    /// Locales to emit. `None` emits every locale found.
    #[serde(default)]
    pub locales: Option<Vec<String>>,
}

fn default_file_name_pattern() -> String {
    "i18n/[locale].i18n".to_string()
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            file_name_pattern: default_file_name_pattern(),
            shared_text_key: None,
            locales: None,
        }
    }
}

impl BundleConfig {
    /// Validate configuration values.
    ///
    /// Returns an error if the pattern cannot tell locales apart, or if the
    /// locale allow-list is malformed.
    pub fn validate(&self) -> Result<()> {
        if !self.file_name_pattern.contains(LOCALE_PLACEHOLDER) {
            bail!(
                "'fileNamePattern' must contain {}: \"{}\"",
                LOCALE_PLACEHOLDER,
                self.file_name_pattern
            );
        }

        if let Some(shared) = &self.shared_text_key
            && shared.trim().is_empty()
        {
            bail!("'sharedTextKey' must not be empty");
        }

        if let Some(locales) = &self.locales {
            for locale in locales {
                if locale.trim().is_empty() {
                    bail!("Empty locale code in 'locales'");
                }
                if self.shared_text_key.as_deref() == Some(locale.as_str()) {
                    bail!(
                        "Locale \"{}\" in 'locales' is also the shared text key",
                        locale
                    );
                }
            }
        }

        Ok(())
    }

    pub fn shared_key(&self) -> Option<&str> {
        self.shared_text_key.as_deref()
    }

    pub fn allowed_locales(&self) -> Option<&[String]> {
        self.locales.as_deref()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = BundleConfig::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: BundleConfig,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: BundleConfig = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: BundleConfig::default(),
            from_file: false,
        }),
    }
}
