//! Build manifest loading.
//!
//! A manifest is the CLI's stand-in for a live build: it lists the host
//! chunks and every `(module, chunk)` occurrence with its extracted fragment.
//!
//! ```json
//! {
//!   "chunks": [
//!     { "name": "main", "entryPoint": true, "children": [1] },
//!     { "name": "settings", "parents": [0] }
//!   ],
//!   "modules": [
//!     { "identifier": "./src/app.i18n", "chunk": 0, "path": "src/app.i18n.json" },
//!     { "identifier": "./src/settings.i18n", "chunk": 1, "key": "settings",
//!       "json": { "en": { "title": "Settings" } } }
//!   ]
//! }
//! ```
//!
//! Fragment files are resolved relative to the manifest. When a module has no
//! explicit `key`, the key is derived from its fragment path.

use std::{
    fs,
    path::{Component, Path},
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::{ContentFragment, HostChunk, HostGraph};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub chunks: Vec<HostChunk>,
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
}

/// One module occurrence in a chunk.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleEntry {
    pub identifier: String,
    pub chunk: usize,
    /// Build-order rank; defaults to the entry's position in the manifest.
    #[serde(default)]
    pub rank: Option<usize>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub json: Option<Map<String, Value>>,
    /// Fragment file, relative to the manifest.
    #[serde(default)]
    pub path: Option<String>,
}

/// A module occurrence with its fragment loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub identifier: String,
    pub fragment: ContentFragment,
    pub rank: usize,
    pub chunk: usize,
}

/// Manifest contents, ready to feed into a `BundlePipeline`.
#[derive(Debug)]
pub struct LoadedManifest {
    pub host: HostGraph,
    pub registrations: Vec<Registration>,
    /// Distinct fragment files read from disk.
    pub fragment_files: usize,
}

pub fn load_manifest(path: &Path) -> Result<LoadedManifest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    let manifest: Manifest = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    resolve_manifest(manifest, base_dir)
}

/// Load every fragment referenced by `manifest`, relative to `base_dir`.
pub fn resolve_manifest(manifest: Manifest, base_dir: &Path) -> Result<LoadedManifest> {
    let mut registrations = Vec::with_capacity(manifest.modules.len());
    let mut files = std::collections::HashSet::new();

    for (position, entry) in manifest.modules.into_iter().enumerate() {
        let (key, json) = match (&entry.path, entry.json) {
            (_, Some(json)) => {
                let key = entry.key.unwrap_or_else(|| entry.identifier.clone());
                (key, json)
            }
            (Some(fragment_path), None) => {
                let json = read_fragment_file(&base_dir.join(fragment_path))?;
                files.insert(fragment_path.clone());
                let key = entry.key.unwrap_or_else(|| key_from_path(fragment_path));
                (key, json)
            }
            (None, None) => bail!(
                "Module {} has neither 'json' nor 'path' in the manifest",
                entry.identifier
            ),
        };

        registrations.push(Registration {
            identifier: entry.identifier,
            fragment: ContentFragment::new(key, json),
            rank: entry.rank.unwrap_or(position),
            chunk: entry.chunk,
        });
    }

    Ok(LoadedManifest {
        host: HostGraph {
            chunks: manifest.chunks,
        },
        registrations,
        fragment_files: files.len(),
    })
}

fn read_fragment_file(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read fragment file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse fragment file: {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("Root of fragment file must be an object: {}", path.display()),
    }
}

/// Derive a fragment key from its file path.
///
/// `./src/forms/login.i18n.json` -> `src/forms/login`
pub fn key_from_path(path: &str) -> String {
    let parts: Vec<String> = Path::new(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    let joined = parts.join("/");
    let without_json = joined.strip_suffix(".json").unwrap_or(&joined);
    without_json
        .strip_suffix(".i18n")
        .unwrap_or(without_json)
        .to_string()
}
