//! Consolidation graph - an engine-owned copy of the host chunk graph.
//!
//! Consolidation moves module membership between chunks. Doing that on a copy
//! leaves the host graph untouched; each copy keeps the index of the host
//! chunk it mirrors so emission can attach files to the original.

use anyhow::{Result, bail};
use indexmap::IndexSet;

use crate::core::{
    data::{ChunkId, HostGraph, ModuleId},
    registry::ExtractionRegistry,
};

/// Copy of one host chunk plus the extracted modules it carries.
#[derive(Debug, Clone)]
pub struct ConsolidationChunk {
    index: ChunkId,
    name: Option<String>,
    /// Position of the mirrored chunk in `HostGraph::chunks`.
    original: usize,
    entry_point: bool,
    parents: IndexSet<ChunkId>,
    children: IndexSet<ChunkId>,
    modules: IndexSet<ModuleId>,
}

impl ConsolidationChunk {
    pub fn index(&self) -> ChunkId {
        self.index
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn original(&self) -> usize {
        self.original
    }

    pub fn is_entry_point(&self) -> bool {
        self.entry_point
    }

    pub fn parents(&self) -> &IndexSet<ChunkId> {
        &self.parents
    }

    pub fn children(&self) -> &IndexSet<ChunkId> {
        &self.children
    }

    /// Modules in the order they were attached.
    pub fn modules(&self) -> &IndexSet<ModuleId> {
        &self.modules
    }

    /// Entry points and parentless chunks own consolidated content.
    pub fn is_root(&self) -> bool {
        self.entry_point || self.parents.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsolidationGraph {
    chunks: Vec<ConsolidationChunk>,
}

impl ConsolidationGraph {
    /// Copy `host` chunk by chunk, keeping index, name and edges positional.
    ///
    /// An edge recorded on only one side (`children` of the parent or
    /// `parents` of the child) is mirrored onto the other before roots are
    /// classified.
    pub fn from_host(host: &HostGraph) -> Result<Self> {
        let count = host.chunks.len();
        let mut chunks = Vec::with_capacity(count);

        for (i, original) in host.chunks.iter().enumerate() {
            let parents = resolve_edges(&original.parents, i, count, "parent")?;
            let children = resolve_edges(&original.children, i, count, "child")?;
            chunks.push(ConsolidationChunk {
                index: ChunkId(i),
                name: original.name.clone(),
                original: i,
                entry_point: original.entry_point,
                parents,
                children,
                modules: IndexSet::new(),
            });
        }

        let mirrored = mirror_edges(&mut chunks);
        if mirrored > 0 {
            tracing::debug!(edges = mirrored, "filled in one-sided chunk edges");
        }

        tracing::debug!(chunks = count, "copied host chunk graph");
        Ok(Self { chunks })
    }

    pub fn chunk(&self, id: ChunkId) -> Option<&ConsolidationChunk> {
        self.chunks.get(id.0)
    }

    pub fn chunks(&self) -> &[ConsolidationChunk] {
        &self.chunks
    }

    /// Root chunks in graph order.
    pub fn roots(&self) -> impl Iterator<Item = &ConsolidationChunk> {
        self.chunks.iter().filter(|c| c.is_root())
    }

    pub fn is_root(&self, id: ChunkId) -> bool {
        self.chunk(id).is_some_and(ConsolidationChunk::is_root)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Add `module` to `chunk` and `chunk` to the module's chunk set.
    ///
    /// Returns `false` if the pair was already linked or either id is unknown.
    pub fn attach(
        &mut self,
        registry: &mut ExtractionRegistry,
        module: ModuleId,
        chunk: ChunkId,
    ) -> bool {
        let (Some(target), Some(extracted)) =
            (self.chunks.get_mut(chunk.0), registry.get_mut(module))
        else {
            return false;
        };
        if !extracted.chunks.insert(chunk) {
            return false;
        }
        target.modules.insert(module);
        true
    }

    /// Remove `module` from `chunk` and `chunk` from the module's chunk set.
    ///
    /// Returns `false` if the pair was not linked.
    pub fn detach(
        &mut self,
        registry: &mut ExtractionRegistry,
        module: ModuleId,
        chunk: ChunkId,
    ) -> bool {
        let (Some(target), Some(extracted)) =
            (self.chunks.get_mut(chunk.0), registry.get_mut(module))
        else {
            return false;
        };
        if !extracted.chunks.shift_remove(&chunk) {
            return false;
        }
        target.modules.shift_remove(&module);
        true
    }
}

fn resolve_edges(
    edges: &[usize],
    from: usize,
    count: usize,
    kind: &str,
) -> Result<IndexSet<ChunkId>> {
    let mut resolved = IndexSet::with_capacity(edges.len());
    for &edge in edges {
        if edge >= count {
            bail!(
                "Chunk {} has {} edge to chunk {}, but the graph only has {} chunks",
                from,
                kind,
                edge,
                count
            );
        }
        resolved.insert(ChunkId(edge));
    }
    Ok(resolved)
}

/// Make every parent/child edge present on both ends. Returns the number of
/// edges added.
fn mirror_edges(chunks: &mut [ConsolidationChunk]) -> usize {
    let edges: Vec<(ChunkId, ChunkId)> = chunks
        .iter()
        .flat_map(|c| {
            let down = c.children.iter().map(move |&child| (c.index, child));
            let up = c.parents.iter().map(move |&parent| (parent, c.index));
            down.chain(up)
        })
        .collect();

    let mut added = 0;
    for (parent, child) in edges {
        if chunks[parent.0].children.insert(child) {
            added += 1;
        }
        if chunks[child.0].parents.insert(parent) {
            added += 1;
        }
    }
    added
}
