//! Identifier collision audit.
//!
//! Groups distinct (word, sense) pairs by the identifier they hash to. Any
//! identifier shared by more than one pair is a collision. Collisions are
//! findings, not failures: the audit always completes and reports a count.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::concept::{ConceptId, ConceptIdentifier};
use crate::record::WordSense;

/// A (word, sense) pair as seen by the identifier scheme.
pub type SensePair = (String, String);

/// Identifier groups computed over a batch of pairs.
#[derive(Debug, Clone, Default)]
pub struct CollisionReport {
    groups: BTreeMap<ConceptId, BTreeSet<SensePair>>,
}

impl CollisionReport {
    /// Groups with more than one distinct pair.
    pub fn collisions(&self) -> impl Iterator<Item = (&ConceptId, &BTreeSet<SensePair>)> {
        self.groups.iter().filter(|(_, pairs)| pairs.len() > 1)
    }

    /// Number of identifiers shared by more than one pair.
    pub fn collision_count(&self) -> usize {
        self.collisions().count()
    }

    /// Number of distinct identifiers.
    pub fn identifier_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of distinct pairs audited.
    pub fn pair_count(&self) -> usize {
        self.groups.values().map(BTreeSet::len).sum()
    }

    /// All pairs that produced `id`.
    pub fn pairs_for(&self, id: &ConceptId) -> Option<&BTreeSet<SensePair>> {
        self.groups.get(id)
    }
}

impl fmt::Display for CollisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, pairs) in self.collisions() {
            writeln!(f, "collision {id}")?;
            for (word, sense) in pairs {
                writeln!(f, "  {word}\t{sense}")?;
            }
        }
        writeln!(f, "Found {} collisions", self.collision_count())
    }
}

/// Compute identifiers for every distinct pair and group them.
pub fn audit<I, P>(identifier: &I, pairs: P) -> CollisionReport
where
    I: ConceptIdentifier + ?Sized,
    P: IntoIterator<Item = SensePair>,
{
    let distinct: BTreeSet<SensePair> = pairs.into_iter().collect();

    let mut groups: BTreeMap<ConceptId, BTreeSet<SensePair>> = BTreeMap::new();
    for pair in distinct {
        let id = identifier.identify(&pair.0, &pair.1);
        groups.entry(id).or_default().insert(pair);
    }

    let report = CollisionReport { groups };
    for (id, pairs) in report.collisions() {
        tracing::warn!(%id, pairs = pairs.len(), "identifier collision");
    }
    tracing::info!(
        pairs = report.pair_count(),
        identifiers = report.identifier_count(),
        collisions = report.collision_count(),
        "collision audit complete"
    );
    report
}

/// Audit the (sense, gloss) columns of extracted rows.
///
/// These are the same two columns annotation hashes, so the report covers
/// exactly the identifiers the graph will see.
pub fn audit_word_senses<'a, I, R>(identifier: &I, rows: R) -> CollisionReport
where
    I: ConceptIdentifier + ?Sized,
    R: IntoIterator<Item = &'a WordSense>,
{
    audit(
        identifier,
        rows.into_iter()
            .map(|row| (row.sense.clone(), row.gloss.clone())),
    )
}
