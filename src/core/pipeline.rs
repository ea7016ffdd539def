//! Bundle pipeline - the explicit sequence of consolidation phases.
//!
//! # Phases
//!
//! 1. **Copy**: `BundlePipeline::new` copies the host chunk graph
//! 2. **Register**: the host reports every `(module, chunk)` occurrence
//! 3. **Consolidate**: dynamic chunk content is merged into roots, then
//!    stripped from the dynamic chunks; optional `ChunkTransform`s run after
//! 4. **Emit**: each root renders one asset per locale into an `AssetSink`
//!
//! Rendering is parallel across roots; everything else runs in order, so the
//! output is identical from run to run.

use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use crate::{
    config::BundleConfig,
    core::{
        consolidate::{ConsolidationStats, consolidate},
        data::{ChunkId, ContentFragment, HostGraph},
        emit::{AssetSink, ChunkPathResolver, LocaleAsset, PathResolver, render_root},
        graph::ConsolidationGraph,
        registry::{ExtractionRegistry, Registration},
    },
};

/// Post-consolidation hook over the consolidation graph.
///
/// Transforms run after the strip phase, in the order given. They must change
/// membership through `ConsolidationGraph::attach`/`detach`.
pub trait ChunkTransform {
    fn transform(
        &mut self,
        graph: &mut ConsolidationGraph,
        registry: &mut ExtractionRegistry,
    ) -> Result<()>;
}

impl<F> ChunkTransform for F
where
    F: FnMut(&mut ConsolidationGraph, &mut ExtractionRegistry) -> Result<()>,
{
    fn transform(
        &mut self,
        graph: &mut ConsolidationGraph,
        registry: &mut ExtractionRegistry,
    ) -> Result<()> {
        self(graph, registry)
    }
}

/// A file handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub file_name: String,
    pub locale: String,
    /// Index of the owning host chunk.
    pub chunk: usize,
    pub size: usize,
}

/// Summary of one `emit` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub files: Vec<EmittedFile>,
    /// File names produced by more than one root; the later asset wins in most sinks.
    pub collisions: Vec<String>,
    pub modules: usize,
    pub consolidation: ConsolidationStats,
}

pub struct BundlePipeline {
    config: BundleConfig,
    host: HostGraph,
    graph: ConsolidationGraph,
    registry: ExtractionRegistry,
    resolver: Box<dyn PathResolver>,
    consolidation: Option<ConsolidationStats>,
    emitted: bool,
}

impl BundlePipeline {
    /// Validate `config` and copy `host` into a consolidation graph.
    pub fn new(config: BundleConfig, host: HostGraph) -> Result<Self> {
        config.validate()?;
        let graph = ConsolidationGraph::from_host(&host).context("Invalid host chunk graph")?;
        Ok(Self {
            config,
            host,
            graph,
            registry: ExtractionRegistry::new(),
            resolver: Box::new(ChunkPathResolver),
            consolidation: None,
            emitted: false,
        })
    }

    /// Replace the default `ChunkPathResolver`.
    pub fn with_resolver(mut self, resolver: impl PathResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Register one module occurrence; `chunk` is the host chunk index.
    pub fn register(
        &mut self,
        identifier: &str,
        fragment: ContentFragment,
        rank: usize,
        chunk: usize,
    ) -> Result<Registration> {
        self.registry
            .register(&mut self.graph, identifier, fragment, rank, ChunkId(chunk))
    }

    /// Run consolidation without transforms.
    pub fn consolidate(&mut self) -> ConsolidationStats {
        let stats = consolidate(&mut self.graph, &mut self.registry);
        self.consolidation = Some(stats);
        stats
    }

    /// Run consolidation, then every transform in order.
    pub fn consolidate_with(
        &mut self,
        transforms: &mut [&mut dyn ChunkTransform],
    ) -> Result<ConsolidationStats> {
        let stats = self.consolidate();
        for transform in transforms.iter_mut() {
            transform.transform(&mut self.graph, &mut self.registry)?;
        }
        Ok(stats)
    }

    pub fn is_consolidated(&self) -> bool {
        self.consolidation.is_some()
    }

    /// Render every root's locale assets, roots in graph order.
    ///
    /// Fails if consolidation has not run: dynamic chunk text would not have
    /// reached its roots yet.
    pub fn render(&self) -> Result<Vec<LocaleAsset>> {
        if !self.is_consolidated() {
            bail!("Chunk graph must be consolidated before rendering");
        }
        let roots: Vec<_> = self.graph.roots().collect();
        let rendered: Vec<Vec<LocaleAsset>> = roots
            .par_iter()
            .map(|root| {
                let host_chunk = &self.host.chunks[root.original()];
                render_root(
                    root,
                    host_chunk,
                    &self.registry,
                    &self.config,
                    self.resolver.as_ref(),
                )
            })
            .collect::<Result<_>>()?;
        Ok(rendered.into_iter().flatten().collect())
    }

    /// Consolidate if needed, render, and hand each asset to `sink`.
    ///
    /// Every emitted file name is appended to its host chunk's `files`. A
    /// pipeline emits once; a second call is an error.
    pub fn emit(&mut self, sink: &mut dyn AssetSink) -> Result<EmitReport> {
        if self.emitted {
            bail!("Locale bundles have already been emitted");
        }
        self.emitted = true;

        let consolidation = match self.consolidation {
            Some(stats) => stats,
            None => self.consolidate(),
        };

        let assets = self.render()?;
        let mut report = EmitReport {
            modules: self.registry.len(),
            consolidation,
            ..EmitReport::default()
        };
        let mut seen: HashSet<String> = HashSet::new();

        for asset in &assets {
            sink.emit_asset(asset)
                .with_context(|| format!("Failed to emit asset: {}", asset.file_name))?;

            if !seen.insert(asset.file_name.clone()) {
                tracing::warn!(
                    file = %asset.file_name,
                    "locale bundle emitted by more than one chunk"
                );
                report.collisions.push(asset.file_name.clone());
            }

            self.host.chunks[asset.original]
                .files
                .push(asset.file_name.clone());
            report.files.push(EmittedFile {
                file_name: asset.file_name.clone(),
                locale: asset.locale.clone(),
                chunk: asset.original,
                size: asset.size,
            });
        }

        tracing::debug!(files = report.files.len(), "emitted locale bundles");
        Ok(report)
    }

    pub fn config(&self) -> &BundleConfig {
        &self.config
    }

    pub fn host(&self) -> &HostGraph {
        &self.host
    }

    pub fn graph(&self) -> &ConsolidationGraph {
        &self.graph
    }

    pub fn registry(&self) -> &ExtractionRegistry {
        &self.registry
    }
}
