//! Core data types shared by every consolidation phase.
//!
//! ## Module Structure
//!
//! - `fragment`: Extracted module payloads and the ids used to index them
//! - `host`: The host build graph handed to the engine as input

pub mod fragment;
pub mod host;

pub use fragment::{ChunkId, ContentFragment, ModuleId, OriginModule};
pub use host::{HostChunk, HostGraph};
