use serde::{Deserialize, Serialize};

/// A chunk of the host build graph.
///
/// Edges are positional indices into `HostGraph::chunks`. `children` are the
/// dynamically loaded chunks this chunk can request at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostChunk {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "entry", alias = "initial")]
    pub entry_point: bool,
    #[serde(default)]
    pub parents: Vec<usize>,
    #[serde(default)]
    pub children: Vec<usize>,
    /// Files emitted for this chunk. Emission appends locale bundle names here.
    #[serde(default)]
    pub files: Vec<String>,
}

impl HostChunk {
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn entry(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            entry_point: true,
            ..Self::default()
        }
    }
}

/// The host's chunk graph, in its stable enumeration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct HostGraph {
    pub chunks: Vec<HostChunk>,
}

impl HostGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return its index.
    pub fn push(&mut self, chunk: HostChunk) -> usize {
        self.chunks.push(chunk);
        self.chunks.len() - 1
    }

    /// Record a dynamic-load edge from `parent` to `child`.
    ///
    /// Both directions are recorded. Out-of-range indices are ignored here and
    /// reported when the consolidation graph is built.
    pub fn link(&mut self, parent: usize, child: usize) {
        if let Some(chunk) = self.chunks.get_mut(parent)
            && !chunk.children.contains(&child)
        {
            chunk.children.push(child);
        }
        if let Some(chunk) = self.chunks.get_mut(child)
            && !chunk.parents.contains(&parent)
        {
            chunk.parents.push(parent);
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
