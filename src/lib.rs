//! # colexify
//!
//! Builds weighted colexification graphs from multilingual dictionary
//! translations. Nodes are word-senses ("concepts"); an edge joins two
//! concepts that some language expresses with a single word, weighted by
//! the number of languages that do so.
//!
//! ## Architecture
//!
//! - **Digests** (`fnv`): FNV-1a at 32, 64 and 128 bits, or any width up to 16 bytes
//! - **Identity** (`concept`, `base58`): content-addressed concept identifiers
//! - **Audit** (`audit`): detection of identifier collisions
//! - **Graph** (`graph`): two-pass aggregation with sense and edge cutoffs
//! - **Pipeline I/O** (`extract`, `record`, `export`, `stats`): dictionary
//!   extraction, TSV records, Cytoscape export, weight quantiles
//!
//! ## Library usage
//!
//! ```
//! use colexify::config::GraphConfig;
//! use colexify::graph::GraphBuilder;
//! use colexify::record::TranslationRecord;
//!
//! let records = vec![
//!     TranslationRecord::new("en", "bank", "money", "bank", "financial institution"),
//!     TranslationRecord::new("en", "bank", "river", "bank", "edge of a river"),
//! ];
//! let graph = GraphBuilder::new(GraphConfig::new(0, 1)).build(&records);
//! assert_eq!(graph.edges[0].weight, 1);
//! ```

pub mod audit;
pub mod base58;
pub mod concept;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fnv;
pub mod graph;
pub mod record;
pub mod stats;
