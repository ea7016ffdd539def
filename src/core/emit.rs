//! Emission boundary - turns consolidated roots into locale assets.
//!
//! The engine renders one asset per `(root chunk, locale)` pair and hands it to
//! an `AssetSink`. Writing assets anywhere is the sink's business.

use anyhow::Result;

use crate::{
    config::{BundleConfig, LOCALE_PLACEHOLDER},
    core::{
        bucket::{LocaleBuckets, LocaleFilter},
        data::{ChunkId, HostChunk},
        graph::ConsolidationChunk,
        registry::ExtractionRegistry,
    },
};

/// Resolves the non-locale placeholders of a file name template.
pub trait PathResolver: Send + Sync {
    /// `chunk` is the host chunk the asset belongs to and `index` its position.
    fn resolve_path(&self, template: &str, chunk: &HostChunk, index: usize) -> String;
}

/// Default resolver for chunk tokens.
///
/// - `[name]`: chunk name, or its index when unnamed
/// - `[id]`, `[index]`: chunk index
///
/// Unknown tokens are left as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkPathResolver;

impl PathResolver for ChunkPathResolver {
    fn resolve_path(&self, template: &str, chunk: &HostChunk, index: usize) -> String {
        let index = index.to_string();
        let name = chunk.name.as_deref().unwrap_or(&index);
        template
            .replace("[name]", name)
            .replace("[id]", &index)
            .replace("[index]", &index)
    }
}

/// Substitute every `[locale]` in `pattern`.
pub fn locale_file_name(pattern: &str, locale: &str) -> String {
    pattern.replace(LOCALE_PLACEHOLDER, locale)
}

/// One serialized locale bundle, ready to be attached to the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleAsset {
    pub file_name: String,
    pub locale: String,
    /// Root chunk in the consolidation graph.
    pub chunk: ChunkId,
    /// Index of the owning chunk in the host graph.
    pub original: usize,
    pub source: String,
    /// Advisory size from `LocaleBucket::size`.
    pub size: usize,
}

/// Receives rendered assets.
pub trait AssetSink {
    fn emit_asset(&mut self, asset: &LocaleAsset) -> Result<()>;
}

impl AssetSink for Vec<LocaleAsset> {
    fn emit_asset(&mut self, asset: &LocaleAsset) -> Result<()> {
        self.push(asset.clone());
        Ok(())
    }
}

/// Fold `extract_locales` over the modules of `root`, in attachment order.
pub fn build_buckets(
    root: &ConsolidationChunk,
    registry: &ExtractionRegistry,
    shared_key: Option<&str>,
    filter: LocaleFilter<'_>,
) -> LocaleBuckets {
    let mut buckets = LocaleBuckets::new();
    for &id in root.modules() {
        if let Some(module) = registry.get(id) {
            module.extract_locales(&mut buckets, shared_key, filter);
        }
    }
    buckets
}

/// Render every emitted locale of one root chunk.
pub fn render_root(
    root: &ConsolidationChunk,
    host_chunk: &HostChunk,
    registry: &ExtractionRegistry,
    config: &BundleConfig,
    resolver: &dyn PathResolver,
) -> Result<Vec<LocaleAsset>> {
    let filter = LocaleFilter::from_option(config.allowed_locales());
    let buckets = build_buckets(root, registry, config.shared_key(), filter);

    let mut assets = Vec::with_capacity(buckets.len());
    for (locale, bucket) in &buckets {
        if !filter.allows(locale) {
            continue;
        }
        let template = locale_file_name(&config.file_name_pattern, locale);
        let file_name = resolver.resolve_path(&template, host_chunk, root.original());
        assets.push(LocaleAsset {
            file_name,
            locale: locale.clone(),
            chunk: root.index(),
            original: root.original(),
            source: bucket.source()?,
            size: bucket.size(),
        });
    }
    Ok(assets)
}
