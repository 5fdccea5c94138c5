//! Export types for visualizing a colexification graph.
//!
//! Converts a [`ColexGraph`] into the Cytoscape.js `elements` JSON layout,
//! with integer node ids and concept display data on each node.

use serde::{Deserialize, Serialize};

use crate::graph::ColexGraph;

/// Top-level Cytoscape document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CytoscapeExport {
    pub elements: Elements,
}

/// Node and edge lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Elements {
    pub nodes: Vec<Element<NodeData>>,
    pub edges: Vec<Element<EdgeData>>,
}

/// Cytoscape wraps every element's fields in a `data` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element<T> {
    pub data: T,
}

/// Exported concept node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Sequential node id.
    pub id: usize,
    /// Concept identifier.
    pub concept: String,
    /// Sense label.
    pub sense: String,
    /// Gloss text.
    pub gloss: String,
}

/// Exported colexification edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    /// Source node id.
    pub source: usize,
    /// Target node id.
    pub target: usize,
    /// Number of colexifying languages.
    pub weight: usize,
}

impl CytoscapeExport {
    /// Build the export. Each concept becomes exactly one node.
    pub fn from_graph(graph: &ColexGraph) -> Self {
        let pg = graph.to_petgraph();

        let nodes = pg
            .node_indices()
            .map(|idx| {
                let concept = &pg[idx];
                Element {
                    data: NodeData {
                        id: idx.index(),
                        concept: concept.id.to_string(),
                        sense: concept.sense.clone(),
                        gloss: concept.gloss.clone(),
                    },
                }
            })
            .collect();

        let edges = pg
            .edge_indices()
            .filter_map(|e| {
                let (source, target) = pg.edge_endpoints(e)?;
                Some(Element {
                    data: EdgeData {
                        source: source.index(),
                        target: target.index(),
                        weight: *pg.edge_weight(e)?,
                    },
                })
            })
            .collect();

        Self {
            elements: Elements { nodes, edges },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
