use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Index of an extracted module inside an `ExtractionRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleId(pub usize);

/// Index of a chunk inside a `ConsolidationGraph`.
///
/// Chunk ids are positional: chunk `n` of the consolidation graph is the copy
/// of chunk `n` of the host graph it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkId(pub usize);

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extracted i18n payload of one source module.
///
/// `json` maps locale codes (e.g. `"en-us"`) to the text for that locale.
/// It may also contain the configured shared key, whose value is merged as a
/// default into every other locale of the same module.
///
/// ```json
/// {
///   "key": "fixtures/unit1.text",
///   "json": {
///     "shared": { "color": "red" },
///     "en-us": { "greet": "hi" }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ContentFragment {
    /// Top-level key of this module's text in every locale bundle.
    pub key: String,
    /// Locale code -> locale text.
    pub json: Map<String, Value>,
}

impl ContentFragment {
    pub fn new(key: impl Into<String>, json: Map<String, Value>) -> Self {
        Self {
            key: key.into(),
            json,
        }
    }

    /// Build a fragment from any JSON value.
    ///
    /// Returns `None` if `json` is not an object.
    pub fn from_value(key: impl Into<String>, json: Value) -> Option<Self> {
        match json {
            Value::Object(map) => Some(Self::new(key, map)),
            _ => None,
        }
    }

    /// Locale codes in declaration order, including the shared key if present.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.json.keys().map(String::as_str)
    }
}

/// The occurrence of a module currently treated as canonical.
///
/// A module may be reached from several chunks; every occurrence carries the
/// host's build-order rank. Lower rank means earlier in build order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginModule {
    pub rank: usize,
    /// Chunk the canonical occurrence was registered from.
    pub chunk: ChunkId,
}

impl OriginModule {
    pub fn new(rank: usize, chunk: ChunkId) -> Self {
        Self { rank, chunk }
    }
}
