//! Chunk consolidation - merge dynamic chunk content into every root that can
//! load it, then strip the dynamic chunks.
//!
//! ## Algorithm
//!
//! 1. **Merge**: for each root `R`, walk its descendants depth-first through
//!    the child relation. Every non-root descendant `D` is visited at most once
//!    per root; its modules are attached to `R`. Roots reached along the way
//!    are not entered, they consolidate on their own.
//! 2. **Strip**: once every root has merged, detach all modules from every
//!    non-root chunk.
//!
//! Visited sets are per root, so a dynamic chunk reachable from two roots is
//! duplicated into both. Strip must not start before merge has finished for
//! all roots, since a dynamic chunk may still be needed by a later root.

use std::collections::HashSet;

use crate::core::{
    data::{ChunkId, ModuleId},
    graph::ConsolidationGraph,
    registry::ExtractionRegistry,
};

/// Counters from one consolidation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsolidationStats {
    pub roots: usize,
    /// `(root, dynamic chunk)` pairs merged.
    pub chunks_merged: usize,
    /// New `(module, root)` links created by merging.
    pub modules_attached: usize,
    /// `(module, chunk)` links removed from non-root chunks.
    pub modules_stripped: usize,
}

/// Run both consolidation phases over `graph`.
pub fn consolidate(
    graph: &mut ConsolidationGraph,
    registry: &mut ExtractionRegistry,
) -> ConsolidationStats {
    let mut stats = ConsolidationStats::default();

    let roots: Vec<ChunkId> = graph.roots().map(|c| c.index()).collect();
    for &root in &roots {
        let (merged, attached) = merge_into_root(graph, registry, root);
        stats.chunks_merged += merged;
        stats.modules_attached += attached;
    }
    stats.roots = roots.len();

    stats.modules_stripped = strip_non_roots(graph, registry);

    tracing::debug!(
        roots = stats.roots,
        chunks_merged = stats.chunks_merged,
        modules_attached = stats.modules_attached,
        modules_stripped = stats.modules_stripped,
        "consolidated chunk graph"
    );
    stats
}

/// Merge every non-root descendant of `root` into it.
///
/// Returns the number of descendants merged and the number of new module
/// links on `root`.
pub fn merge_into_root(
    graph: &mut ConsolidationGraph,
    registry: &mut ExtractionRegistry,
    root: ChunkId,
) -> (usize, usize) {
    let Some(start) = graph.chunk(root) else {
        return (0, 0);
    };

    let mut visited: HashSet<ChunkId> = HashSet::new();
    // Reversed so chunks pop in child order, matching a recursive walk.
    let mut stack: Vec<ChunkId> = start.children().iter().rev().copied().collect();
    let mut merged = 0;
    let mut attached = 0;

    while let Some(current) = stack.pop() {
        let Some(chunk) = graph.chunk(current) else {
            continue;
        };
        if chunk.is_root() || !visited.insert(current) {
            continue;
        }

        let modules: Vec<ModuleId> = chunk.modules().iter().copied().collect();
        stack.extend(chunk.children().iter().rev().copied());

        for module in modules {
            if graph.attach(registry, module, root) {
                attached += 1;
                tracing::trace!(root = %root, from = %current, module = module.0, "merged module");
            }
        }
        merged += 1;
    }

    (merged, attached)
}

/// Detach every module from every non-root chunk.
pub fn strip_non_roots(graph: &mut ConsolidationGraph, registry: &mut ExtractionRegistry) -> usize {
    let links: Vec<(ChunkId, ModuleId)> = graph
        .chunks()
        .iter()
        .filter(|c| !c.is_root())
        .flat_map(|c| c.modules().iter().map(move |&m| (c.index(), m)))
        .collect();

    links
        .into_iter()
        .filter(|&(chunk, module)| graph.detach(registry, module, chunk))
        .count()
}
