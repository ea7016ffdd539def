//! Glotbundle - locale bundles per entry chunk
//!
//! Glotbundle is a CLI tool and library that collects the i18n fragments
//! extracted from individual build modules and consolidates them into one
//! merged JSON document per entry chunk and locale. Text from dynamically
//! loaded chunks is folded into every entry chunk that can load it, so each
//! bundle is self-contained.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (manifest loading, file output, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Consolidation engine (registry, chunk graph, locale buckets, pipeline)

pub mod cli;
pub mod config;
pub mod core;
