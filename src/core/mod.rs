//! Consolidation engine.
//!
//! Turns per-module i18n fragments into one merged document per
//! `(entry chunk, locale)` pair.
//!
//! ## Module Structure
//!
//! - `data`: Fragments, ids and the host chunk graph
//! - `merge`: Deep merge of JSON values
//! - `bucket`: Per-locale aggregation (`LocaleBucket`)
//! - `registry`: One `ExtractedModule` per module identifier
//! - `graph`: Engine-owned copy of the chunk graph
//! - `consolidate`: Merge dynamic chunks into roots, then strip them
//! - `emit`: Rendering and the asset sink boundary
//! - `pipeline`: `BundlePipeline`, tying the phases together

pub mod bucket;
pub mod consolidate;
pub mod data;
pub mod emit;
pub mod graph;
pub mod merge;
pub mod pipeline;
pub mod registry;


pub use bucket::{LocaleBucket, LocaleBuckets, LocaleFilter};
pub use consolidate::{ConsolidationStats, consolidate};
pub use data::{ChunkId, ContentFragment, HostChunk, HostGraph, ModuleId, OriginModule};
pub use emit::{AssetSink, ChunkPathResolver, LocaleAsset, PathResolver};
pub use graph::{ConsolidationChunk, ConsolidationGraph};
pub use pipeline::{BundlePipeline, ChunkTransform, EmitReport, EmittedFile};
pub use registry::{ExtractedModule, ExtractionRegistry, Registration};
