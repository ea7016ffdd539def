//! Extraction registry - one `ExtractedModule` per module identifier.
//!
//! The host reports a module once per chunk it occurs in. The registry
//! collapses those occurrences into a single extracted module and records
//! every consolidation chunk that references it.

use std::collections::HashMap;

use anyhow::{Result, bail};
use indexmap::IndexSet;
use serde_json::{Map, Value};

use crate::core::{
    bucket::{LocaleBuckets, LocaleFilter},
    data::{ChunkId, ContentFragment, ModuleId, OriginModule},
    graph::ConsolidationGraph,
};

/// Extracted text of a single source module.
#[derive(Debug, Clone)]
pub struct ExtractedModule {
    identifier: String,
    key: String,
    json: Map<String, Value>,
    origin: OriginModule,
    /// Consolidation chunks containing this module. Kept in sync with
    /// `ConsolidationChunk::modules` by `ConsolidationGraph::attach`/`detach`.
    pub(crate) chunks: IndexSet<ChunkId>,
}

impl ExtractedModule {
    fn new(identifier: &str, fragment: ContentFragment, origin: OriginModule) -> Self {
        Self {
            identifier: identifier.to_string(),
            key: fragment.key,
            json: fragment.json,
            origin,
            chunks: IndexSet::new(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn json(&self) -> &Map<String, Value> {
        &self.json
    }

    pub fn origin(&self) -> OriginModule {
        self.origin
    }

    pub fn chunks(&self) -> &IndexSet<ChunkId> {
        &self.chunks
    }

    /// Add this module's text to `buckets`, one bucket per locale.
    ///
    /// The shared key is never emitted as a locale of its own; its value is
    /// registered as the default for this module's key in every bucket the
    /// module contributes to. A `null` shared value counts as absent.
    pub fn extract_locales(
        &self,
        buckets: &mut LocaleBuckets,
        shared_key: Option<&str>,
        filter: LocaleFilter<'_>,
    ) {
        let shared = shared_key
            .and_then(|k| self.json.get(k))
            .filter(|v| !v.is_null());

        for (locale, value) in &self.json {
            if Some(locale.as_str()) == shared_key || !filter.allows(locale) {
                continue;
            }

            let bucket = buckets.entry(locale.clone()).or_default();
            bucket.add(self.key.clone(), value.clone());
            if let Some(shared) = shared {
                bucket.add_default(self.key.clone(), shared.clone());
            }
        }
    }
}

/// Outcome of one `ExtractionRegistry::register` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub module: ModuleId,
    /// The identifier had not been seen before.
    pub created: bool,
    /// An existing module switched its canonical origin to this occurrence.
    pub origin_replaced: bool,
    /// The chunk was newly attached; `false` means it was already present.
    pub attached: bool,
}

/// Deduplicates extracted modules by identifier.
#[derive(Debug, Default)]
pub struct ExtractionRegistry {
    modules: Vec<ExtractedModule>,
    by_identifier: HashMap<String, ModuleId>,
}

impl ExtractionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one `(module, chunk)` occurrence.
    ///
    /// The first registration of an identifier fixes its `key` and `json`.
    /// Later registrations only replace the canonical origin when their rank
    /// is strictly lower, and attach `chunk` in every case.
    pub fn register(
        &mut self,
        graph: &mut ConsolidationGraph,
        identifier: &str,
        fragment: ContentFragment,
        rank: usize,
        chunk: ChunkId,
    ) -> Result<Registration> {
        if graph.chunk(chunk).is_none() {
            bail!(
                "Module {} registered against unknown chunk {} ({} chunks in graph)",
                identifier,
                chunk,
                graph.len()
            );
        }

        let origin = OriginModule::new(rank, chunk);
        let (module, created, origin_replaced) = match self.by_identifier.get(identifier) {
            Some(&id) => {
                let existing = &mut self.modules[id.0];
                let replace = rank < existing.origin.rank;
                if replace {
                    existing.origin = origin;
                }
                (id, false, replace)
            }
            None => {
                let id = ModuleId(self.modules.len());
                self.modules
                    .push(ExtractedModule::new(identifier, fragment, origin));
                self.by_identifier.insert(identifier.to_string(), id);
                (id, true, false)
            }
        };

        let attached = graph.attach(self, module, chunk);
        tracing::trace!(identifier, %chunk, created, origin_replaced, attached, "registered module");

        Ok(Registration {
            module,
            created,
            origin_replaced,
            attached,
        })
    }

    pub fn get(&self, id: ModuleId) -> Option<&ExtractedModule> {
        self.modules.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: ModuleId) -> Option<&mut ExtractedModule> {
        self.modules.get_mut(id.0)
    }

    pub fn get_by_identifier(&self, identifier: &str) -> Option<&ExtractedModule> {
        self.by_identifier
            .get(identifier)
            .and_then(|&id| self.get(id))
    }

    pub fn id_of(&self, identifier: &str) -> Option<ModuleId> {
        self.by_identifier.get(identifier).copied()
    }

    /// Modules in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ModuleId, &ExtractedModule)> {
        self.modules
            .iter()
            .enumerate()
            .map(|(i, m)| (ModuleId(i), m))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
