//! Two-pass colexification graph construction.
//!
//! Pass 1 groups records by translation, (language, word), and by concept,
//! collecting the languages each concept appears in. The sense cutoff then
//! fixes an immutable set of retained concepts. Pass 2 walks every
//! translation's retained concepts in sorted order and adds the language to
//! each pair's language set. Edge weight is the size of that set, so a
//! language counts once per edge no matter how many of its words colexify
//! the pair.
//!
//! Every intermediate is built from set unions, so shards of the input can
//! be aggregated independently and merged; see
//! [`GraphBuilder::build_parallel`].

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use rayon::prelude::*;

use crate::concept::Concept;
use crate::config::GraphConfig;
use crate::record::TranslationRecord;

use super::{sort_edges, ColexEdge, ColexGraph};

type Language = Arc<str>;
type Node = Arc<Concept>;

/// Pass 1 output: translation and concept groupings.
#[derive(Debug, Default, Clone)]
pub struct Aggregate {
    /// Interned concepts, so repeated records share one allocation.
    concepts: HashSet<Node>,
    /// Interned language codes.
    languages: HashSet<Language>,
    /// (language, word) -> concepts that word denotes in that language.
    translation_senses: HashMap<(Language, String), BTreeSet<Node>>,
    /// concept -> languages that lexicalize it.
    sense_languages: HashMap<Node, HashSet<Language>>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate a whole record stream.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a TranslationRecord>,
    {
        let mut aggregate = Self::new();
        for record in records {
            aggregate.add(record);
        }
        aggregate
    }

    fn intern_language(&mut self, language: &str) -> Language {
        if let Some(existing) = self.languages.get(language) {
            return Arc::clone(existing);
        }
        let language: Language = Arc::from(language);
        self.languages.insert(Arc::clone(&language));
        language
    }

    fn intern_concept(&mut self, concept: Concept) -> Node {
        if let Some(existing) = self.concepts.get(&concept) {
            return Arc::clone(existing);
        }
        let node = Arc::new(concept);
        self.concepts.insert(Arc::clone(&node));
        node
    }

    fn intern_node(&mut self, node: &Node) -> Node {
        if let Some(existing) = self.concepts.get(node) {
            return Arc::clone(existing);
        }
        self.concepts.insert(Arc::clone(node));
        Arc::clone(node)
    }

    /// Record one (language, word) <-> concept association.
    pub fn add(&mut self, record: &TranslationRecord) {
        let language = self.intern_language(&record.language);
        let concept = self.intern_concept(record.to_concept());

        self.translation_senses
            .entry((Arc::clone(&language), record.word.clone()))
            .or_default()
            .insert(Arc::clone(&concept));
        self.sense_languages
            .entry(concept)
            .or_default()
            .insert(language);
    }

    /// Union another aggregate into this one.
    pub fn merge(mut self, other: Aggregate) -> Self {
        for ((language, word), senses) in other.translation_senses {
            let language = self.intern_language(&language);
            let senses: Vec<Node> = senses.iter().map(|c| self.intern_node(c)).collect();
            self.translation_senses
                .entry((language, word))
                .or_default()
                .extend(senses);
        }
        for (concept, languages) in other.sense_languages {
            let concept = self.intern_node(&concept);
            let languages: Vec<Language> =
                languages.iter().map(|l| self.intern_language(l)).collect();
            self.sense_languages
                .entry(concept)
                .or_default()
                .extend(languages);
        }
        self
    }

    /// Number of distinct concepts seen.
    pub fn concept_count(&self) -> usize {
        self.sense_languages.len()
    }

    /// Number of distinct (language, word) pairs seen.
    pub fn translation_count(&self) -> usize {
        self.translation_senses.len()
    }

    /// Number of distinct languages seen.
    pub fn language_count(&self) -> usize {
        self.languages.len()
    }

    /// Number of languages that lexicalize `concept`.
    pub fn languages_for(&self, concept: &Concept) -> usize {
        self.sense_languages.get(concept).map_or(0, HashSet::len)
    }

    /// Apply the sense cutoff.
    pub fn retain(&self, sense_cutoff: usize) -> RetainedConcepts {
        let concepts: HashSet<Node> = self
            .sense_languages
            .iter()
            .filter(|(_, languages)| languages.len() >= sense_cutoff)
            .map(|(concept, _)| Arc::clone(concept))
            .collect();
        tracing::info!(
            sense_cutoff,
            concepts = self.concept_count(),
            retained = concepts.len(),
            "applied sense cutoff"
        );
        RetainedConcepts { concepts }
    }

    /// Pass 2 for one translation: pair up its retained concepts.
    fn colexify_translation(
        edges: &mut EdgeLanguages,
        language: &Language,
        senses: &BTreeSet<Node>,
        retained: &RetainedConcepts,
    ) {
        // BTreeSet iteration is already in concept order.
        let nodes: Vec<&Node> = senses.iter().filter(|c| retained.contains(c)).collect();
        for (i, source) in nodes.iter().enumerate() {
            for target in &nodes[i + 1..] {
                edges.add(source, target, language);
            }
        }
    }

    /// Pass 2: collect the colexifying languages of every retained pair.
    pub fn colexify(&self, retained: &RetainedConcepts) -> EdgeLanguages {
        let mut edges = EdgeLanguages::default();
        for ((language, _word), senses) in &self.translation_senses {
            Self::colexify_translation(&mut edges, language, senses, retained);
        }
        edges
    }

    /// Pass 2, sharded across the rayon pool.
    pub fn par_colexify(&self, retained: &RetainedConcepts) -> EdgeLanguages {
        self.translation_senses
            .par_iter()
            .fold(EdgeLanguages::default, |mut edges, ((language, _word), senses)| {
                Self::colexify_translation(&mut edges, language, senses, retained);
                edges
            })
            .reduce(EdgeLanguages::default, EdgeLanguages::merge)
    }
}

/// Concepts that passed the sense cutoff. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct RetainedConcepts {
    concepts: HashSet<Node>,
}

impl RetainedConcepts {
    pub fn contains(&self, concept: &Concept) -> bool {
        self.concepts.contains(concept)
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Retained concepts in ascending order.
    pub fn sorted(&self) -> Vec<Concept> {
        let mut concepts: Vec<Concept> = self.concepts.iter().map(|c| (**c).clone()).collect();
        concepts.sort();
        concepts
    }
}

/// Pass 2 output: canonical edge -> colexifying languages.
#[derive(Debug, Clone, Default)]
pub struct EdgeLanguages {
    edges: HashMap<(Node, Node), HashSet<Language>>,
}

impl EdgeLanguages {
    /// Add `language` to the edge between `a` and `b`.
    ///
    /// The pair is canonicalized so `(a, b)` and `(b, a)` are one edge.
    /// Self pairs are ignored.
    fn add(&mut self, a: &Node, b: &Node, language: &Language) {
        let key = match a.cmp(b) {
            std::cmp::Ordering::Less => (Arc::clone(a), Arc::clone(b)),
            std::cmp::Ordering::Greater => (Arc::clone(b), Arc::clone(a)),
            std::cmp::Ordering::Equal => return,
        };
        self.edges
            .entry(key)
            .or_default()
            .insert(Arc::clone(language));
    }

    /// Union another edge map into this one.
    pub fn merge(mut self, other: EdgeLanguages) -> Self {
        if self.edges.len() < other.edges.len() {
            return other.merge(self);
        }
        for (key, languages) in other.edges {
            self.edges.entry(key).or_default().extend(languages);
        }
        self
    }

    /// Apply the edge cutoff and order heaviest first.
    pub fn into_edges(self, edge_cutoff: usize) -> Vec<ColexEdge> {
        let candidates = self.edges.len();
        let mut edges: Vec<ColexEdge> = self
            .edges
            .into_iter()
            .filter_map(|((source, target), languages)| {
                let weight = languages.len();
                (weight >= edge_cutoff).then(|| ColexEdge {
                    source: (*source).clone(),
                    target: (*target).clone(),
                    weight,
                })
            })
            .collect();
        sort_edges(&mut edges);
        tracing::info!(edge_cutoff, candidates, retained = edges.len(), "applied edge cutoff");
        edges
    }
}

/// Builds colexification graphs from translation records.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder {
    config: GraphConfig,
}

impl GraphBuilder {
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Build the graph sequentially.
    pub fn build<'a, I>(&self, records: I) -> ColexGraph
    where
        I: IntoIterator<Item = &'a TranslationRecord>,
    {
        let aggregate = Aggregate::from_records(records);
        self.finish(&aggregate)
    }

    /// Filter and pair up an already aggregated record set.
    pub fn finish(&self, aggregate: &Aggregate) -> ColexGraph {
        tracing::debug!(
            concepts = aggregate.concept_count(),
            translations = aggregate.translation_count(),
            languages = aggregate.language_count(),
            "aggregated records"
        );
        let retained = aggregate.retain(self.config.sense_cutoff);
        let edges = aggregate.colexify(&retained);
        ColexGraph {
            concepts: retained.sorted(),
            edges: edges.into_edges(self.config.edge_cutoff),
        }
    }

    /// Build the graph with both passes sharded across the rayon pool.
    ///
    /// Produces exactly the graph [`GraphBuilder::build`] does.
    pub fn build_parallel(&self, records: &[TranslationRecord]) -> ColexGraph {
        let aggregate = records
            .par_iter()
            .fold(Aggregate::new, |mut aggregate, record| {
                aggregate.add(record);
                aggregate
            })
            .reduce(Aggregate::new, Aggregate::merge);

        let retained = aggregate.retain(self.config.sense_cutoff);
        let edges = aggregate.par_colexify(&retained);
        ColexGraph {
            concepts: retained.sorted(),
            edges: edges.into_edges(self.config.edge_cutoff),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept::ConceptId;

    fn rec(language: &str, word: &str, concept: &str) -> TranslationRecord {
        TranslationRecord::new(language, word, concept, concept, format!("{concept} gloss"))
    }

    fn bank_records() -> Vec<TranslationRecord> {
        vec![
            TranslationRecord::new("en", "bank", "moneyBank", "moneyBank", "financial institution"),
            TranslationRecord::new("en", "bank", "riverBank", "riverBank", "edge of a river"),
            TranslationRecord::new("fr", "banque", "moneyBank", "moneyBank", "financial institution"),
            TranslationRecord::new("fr", "rive", "riverBank", "riverBank", "edge of a river"),
            TranslationRecord::new("de", "bank", "moneyBank", "moneyBank", "financial institution"),
            TranslationRecord::new("de", "bank", "riverBank", "riverBank", "edge of a river"),
        ]
    }

    fn id(raw: &str) -> ConceptId {
        ConceptId::new(raw)
    }

    #[test]
    fn bank_example() {
        let graph = GraphBuilder::new(GraphConfig::new(0, 1)).build(&bank_records());
        assert_eq!(graph.concepts.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        let edge = &graph.edges[0];
        assert_eq!(edge.source.id, id("moneyBank"));
        assert_eq!(edge.target.id, id("riverBank"));
        assert_eq!(edge.target.gloss, "edge of a river");
        assert_eq!(edge.weight, 2);
    }

    #[test]
    fn bank_example_pruned_by_edge_cutoff() {
        let graph = GraphBuilder::new(GraphConfig::new(0, 3)).build(&bank_records());
        assert!(graph.is_empty());
        assert_eq!(graph.concepts.len(), 2);
    }

    /// The bank records plus an Italian word for moneyBank only.
    fn uneven_bank_records() -> Vec<TranslationRecord> {
        let mut records = bank_records();
        records.push(TranslationRecord::new(
            "it",
            "banca",
            "moneyBank",
            "moneyBank",
            "financial institution",
        ));
        records
    }

    #[test]
    fn sense_cutoff_drops_sparse_concepts() {
        // moneyBank is in 4 languages, riverBank in 3.
        let records = uneven_bank_records();
        let graph = GraphBuilder::new(GraphConfig::new(4, 1)).build(&records);
        assert_eq!(graph.concepts.len(), 1);
        assert_eq!(graph.concepts[0].id, id("moneyBank"));
        assert!(graph.edges.is_empty());

        let graph = GraphBuilder::new(GraphConfig::new(3, 1)).build(&records);
        assert_eq!(graph.concepts.len(), 2);
        assert_eq!(graph.weights(), vec![2]);
    }

    #[test]
    fn language_counts_once_per_edge() {
        let records = vec![
            rec("en", "bank", "a"),
            rec("en", "bank", "b"),
            rec("en", "shore", "a"),
            rec("en", "shore", "b"),
            rec("en", "bank", "a"),
        ];
        let graph = GraphBuilder::new(GraphConfig::new(0, 0)).build(&records);
        assert_eq!(graph.weight_between(&id("a"), &id("b")), Some(1));
    }

    #[test]
    fn no_self_loops() {
        let records = vec![rec("en", "bank", "a"), rec("en", "bank", "a"), rec("fr", "banque", "a")];
        let graph = GraphBuilder::new(GraphConfig::new(0, 0)).build(&records);
        assert_eq!(graph.concepts.len(), 1);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn same_id_with_different_gloss_is_a_distinct_node() {
        let records = vec![
            TranslationRecord::new("en", "bank", "x", "bank", "gloss one"),
            TranslationRecord::new("en", "bank", "x", "bank", "gloss two"),
        ];
        let graph = GraphBuilder::new(GraphConfig::new(0, 1)).build(&records);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].source.gloss, "gloss one");
    }

    #[test]
    fn input_order_does_not_change_edges() {
        let mut records = bank_records();
        let forward = GraphBuilder::new(GraphConfig::new(0, 1)).build(&records);
        records.reverse();
        let backward = GraphBuilder::new(GraphConfig::new(0, 1)).build(&records);
        assert_eq!(forward, backward);
    }

    #[test]
    fn edges_sorted_heaviest_first() {
        let mut records = Vec::new();
        for lang in ["en", "fr", "de"] {
            records.push(rec(lang, "w", "a"));
            records.push(rec(lang, "w", "b"));
        }
        records.push(rec("en", "v", "c"));
        records.push(rec("en", "v", "d"));
        let graph = GraphBuilder::new(GraphConfig::new(0, 1)).build(&records);
        assert_eq!(graph.weights(), vec![3, 1]);
        assert_eq!(graph.edges[0].source.id, id("a"));
    }

    #[test]
    fn zero_cutoffs_keep_everything() {
        let graph = GraphBuilder::new(GraphConfig::new(0, 0)).build(&bank_records());
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn builder_reports_its_config() {
        let builder = GraphBuilder::new(GraphConfig::default().with_overrides(Some(3), None));
        assert_eq!(builder.config().sense_cutoff, 3);
        assert_eq!(builder.config().edge_cutoff, 4);
    }

    #[test]
    fn empty_input_gives_empty_graph() {
        let graph = GraphBuilder::default().build(&[]);
        assert!(graph.concepts.is_empty());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn merge_is_union() {
        let records = bank_records();
        let (left, right) = records.split_at(3);
        let merged = Aggregate::from_records(left).merge(Aggregate::from_records(right));
        let whole = Aggregate::from_records(&records);
        assert_eq!(merged.concept_count(), whole.concept_count());
        assert_eq!(merged.translation_count(), whole.translation_count());
        assert_eq!(merged.language_count(), 3);

        let builder = GraphBuilder::new(GraphConfig::new(0, 1));
        assert_eq!(builder.finish(&merged), builder.finish(&whole));
    }

    #[test]
    fn parallel_matches_sequential() {
        let builder = GraphBuilder::new(GraphConfig::new(0, 1));
        let records = bank_records();
        assert_eq!(builder.build_parallel(&records), builder.build(&records));
    }

    #[test]
    fn languages_for_counts_distinct_languages() {
        let records = uneven_bank_records();
        let aggregate = Aggregate::from_records(&records);
        let money = records[0].to_concept();
        let river = records[1].to_concept();
        assert_eq!(aggregate.languages_for(&money), 4);
        assert_eq!(aggregate.languages_for(&river), 3);
        assert_eq!(aggregate.retain(3).len(), 2);
        assert_eq!(aggregate.retain(4).len(), 1);
        assert!(aggregate.retain(4).contains(&money));
        assert!(aggregate.retain(5).is_empty());
    }
}
