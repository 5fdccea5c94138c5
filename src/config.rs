//! Graph-building thresholds, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Cutoffs applied while building the colexification graph.
///
/// A cutoff of 0 disables the corresponding filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Minimum number of languages that must lexicalize a concept.
    #[serde(default = "default_sense_cutoff")]
    pub sense_cutoff: usize,
    /// Minimum number of languages that must colexify two concepts.
    #[serde(default = "default_edge_cutoff")]
    pub edge_cutoff: usize,
}

// Removes > 80% of all word senses on the English Wiktionary extract.
fn default_sense_cutoff() -> usize {
    20
}
// Removes > 2/3 of all edges.
fn default_edge_cutoff() -> usize {
    4
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            sense_cutoff: default_sense_cutoff(),
            edge_cutoff: default_edge_cutoff(),
        }
    }
}

impl GraphConfig {
    pub fn new(sense_cutoff: usize, edge_cutoff: usize) -> Self {
        Self {
            sense_cutoff,
            edge_cutoff,
        }
    }

    /// Load from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Replace cutoffs given on the command line.
    pub fn with_overrides(mut self, sense_cutoff: Option<usize>, edge_cutoff: Option<usize>) -> Self {
        if let Some(cutoff) = sense_cutoff {
            self.sense_cutoff = cutoff;
        }
        if let Some(cutoff) = edge_cutoff {
            self.edge_cutoff = cutoff;
        }
        self
    }
}
