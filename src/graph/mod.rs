//! Colexification graph: concepts joined by shared words.
//!
//! - **Builder** ([`builder::GraphBuilder`]): two-pass aggregation with a
//!   sense cutoff and an edge cutoff
//! - **Result** ([`ColexGraph`]): retained concepts plus weighted undirected
//!   edges, heaviest first
//!
//! Edges are stored with `source < target` in [`Concept`] order, so an
//! undirected pair has exactly one representation.

pub mod builder;

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use crate::concept::{Concept, ConceptId};
use crate::error::IngestError;
use crate::record::{FromRow, IngestResult, ToRow};

pub use builder::GraphBuilder;

/// A weighted colexification edge between two distinct concepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColexEdge {
    pub source: Concept,
    pub target: Concept,
    /// Number of languages that use one word for both concepts.
    pub weight: usize,
}

impl ToRow for ColexEdge {
    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.source.id.as_str()),
            Cow::Borrowed(self.source.sense.as_str()),
            Cow::Borrowed(self.source.gloss.as_str()),
            Cow::Borrowed(self.target.id.as_str()),
            Cow::Borrowed(self.target.sense.as_str()),
            Cow::Borrowed(self.target.gloss.as_str()),
            Cow::Owned(self.weight.to_string()),
        ]
    }
}

impl FromRow for ColexEdge {
    const WIDTH: usize = 7;

    fn from_fields(fields: Vec<String>, line: usize) -> IngestResult<Self> {
        let [source_id, source_sense, source_gloss, target_id, target_sense, target_gloss, weight]: [String; 7] =
            fields.try_into().map_err(|f: Vec<String>| IngestError::MalformedRecord {
                line,
                expected: Self::WIDTH,
                found: f.len(),
            })?;
        let weight = weight
            .parse()
            .map_err(|_| IngestError::InvalidWeight { line, value: weight.clone() })?;
        Ok(Self {
            source: Concept::new(ConceptId::new(source_id), source_sense, source_gloss),
            target: Concept::new(ConceptId::new(target_id), target_sense, target_gloss),
            weight,
        })
    }
}

/// The pruned colexification graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColexGraph {
    /// Concepts that passed the sense cutoff, in ascending order.
    pub concepts: Vec<Concept>,
    /// Edges that passed the edge cutoff, heaviest first.
    pub edges: Vec<ColexEdge>,
}

impl ColexGraph {
    /// Rebuild a graph from an edge list, e.g. one read back from TSV.
    ///
    /// The concept set is the set of edge endpoints; isolated concepts are
    /// not recoverable from an edge list.
    pub fn from_edges(mut edges: Vec<ColexEdge>) -> Self {
        let concepts: BTreeSet<Concept> = edges
            .iter()
            .flat_map(|e| [e.source.clone(), e.target.clone()])
            .collect();
        sort_edges(&mut edges);
        Self {
            concepts: concepts.into_iter().collect(),
            edges,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edge weights, in edge order.
    pub fn weights(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.weight).collect()
    }

    /// Look up the weight of the edge between `a` and `b`, in either order.
    pub fn weight_between(&self, a: &ConceptId, b: &ConceptId) -> Option<usize> {
        self.edges
            .iter()
            .find(|e| {
                (&e.source.id == a && &e.target.id == b) || (&e.source.id == b && &e.target.id == a)
            })
            .map(|e| e.weight)
    }

    /// Convert to a petgraph undirected graph with concepts as nodes and
    /// weights as edge data.
    ///
    /// Nodes appear in first-seen order: retained concepts first, then any
    /// edge endpoint missing from `concepts`.
    pub fn to_petgraph(&self) -> UnGraph<Concept, usize> {
        let mut graph = UnGraph::with_capacity(self.concepts.len(), self.edges.len());
        let mut index: HashMap<&Concept, NodeIndex> = HashMap::with_capacity(self.concepts.len());

        for concept in &self.concepts {
            index
                .entry(concept)
                .or_insert_with(|| graph.add_node(concept.clone()));
        }
        for edge in &self.edges {
            let s = *index
                .entry(&edge.source)
                .or_insert_with(|| graph.add_node(edge.source.clone()));
            let t = *index
                .entry(&edge.target)
                .or_insert_with(|| graph.add_node(edge.target.clone()));
            graph.add_edge(s, t, edge.weight);
        }
        graph
    }
}

/// Heaviest first; ties by ascending (source, target).
pub(crate) fn sort_edges(edges: &mut [ColexEdge]) {
    edges.sort_by(|a, b| {
        b.weight
            .cmp(&a.weight)
            .then_with(|| a.source.cmp(&b.source))
            .then_with(|| a.target.cmp(&b.target))
    });
}
