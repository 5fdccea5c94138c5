//! Concept identity.
//!
//! A concept is a word-sense, identified by a short printable string derived
//! from the (word, sense) pair alone: the pair is joined with a tab, hashed
//! with 64-bit FNV-1a and rendered in base-58. Glosses ride along for
//! display but never influence the identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::base58;
use crate::fnv::fnv_1a_64;

/// Printable, content-addressed concept identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptId(String);

impl ConceptId {
    /// Wrap an identifier read from an annotated record.
    ///
    /// No validation happens here: graph input may use any string as a
    /// concept key as long as equal keys denote equal concepts.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the 64-bit digest, if this identifier is base-58.
    pub fn digest(&self) -> Option<Vec<u8>> {
        base58::decode(&self.0).ok()
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ConceptId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A graph node: identifier plus display data.
///
/// Field order defines the derived total order (identifier, then sense,
/// then gloss), which canonicalizes undirected edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Concept {
    pub id: ConceptId,
    /// Sense label (the headword the gloss belongs to).
    pub sense: String,
    pub gloss: String,
}

impl Concept {
    pub fn new(id: ConceptId, sense: impl Into<String>, gloss: impl Into<String>) -> Self {
        Self {
            id,
            sense: sense.into(),
            gloss: gloss.into(),
        }
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}: {})", self.id, self.sense, self.gloss)
    }
}

/// A scheme that maps (word, sense) pairs to concept identifiers.
pub trait ConceptIdentifier {
    fn identify(&self, word: &str, sense: &str) -> ConceptId;
}

/// The production scheme: base-58 of the 64-bit FNV-1a digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fnv58;

impl ConceptIdentifier for Fnv58 {
    fn identify(&self, word: &str, sense: &str) -> ConceptId {
        concept_id(word, sense)
    }
}

impl<F> ConceptIdentifier for F
where
    F: Fn(&str, &str) -> ConceptId,
{
    fn identify(&self, word: &str, sense: &str) -> ConceptId {
        self(word, sense)
    }
}

/// Bytes that get hashed for a (word, sense) pair.
pub fn concept_key(word: &str, sense: &str) -> String {
    let mut key = String::with_capacity(word.len() + 1 + sense.len());
    key.push_str(word);
    key.push('\t');
    key.push_str(sense);
    key
}

/// Compute the identifier of a word-sense.
///
/// Neither argument may contain a tab; records are sanitized before they
/// reach this point, and a tab inside `word` or `sense` would make distinct
/// pairs share a key.
pub fn concept_id(word: &str, sense: &str) -> ConceptId {
    let digest = fnv_1a_64(concept_key(word, sense).as_bytes());
    ConceptId(base58::encode(&digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_identifiers() {
        assert_eq!(concept_id("bank", "financial institution").as_str(), "BW2yRJKhqL6");
        assert_eq!(concept_id("bank", "edge of a river").as_str(), "2jiPKhTUDw6");
        assert_eq!(concept_id("a", "b").as_str(), "fRfbhfifMWe");
    }

    #[test]
    fn deterministic() {
        assert_eq!(concept_id("rive", "shore"), concept_id("rive", "shore"));
        assert_eq!(Fnv58.identify("rive", "shore"), concept_id("rive", "shore"));
    }

    #[test]
    fn word_and_sense_are_not_interchangeable() {
        assert_ne!(concept_id("a", "b"), concept_id("b", "a"));
        assert_ne!(concept_id("ab", ""), concept_id("a", "b"));
    }

    #[test]
    fn identifiers_are_printable_and_tab_free() {
        let id = concept_id("Bank", "a long gloss with\u{00e9}accents");
        assert!(!id.as_str().is_empty());
        assert!(id.as_str().bytes().all(|b| base58::ALPHABET.contains(&b)));
    }

    #[test]
    fn digest_roundtrip() {
        let id = concept_id("bank", "edge of a river");
        assert_eq!(
            id.digest().unwrap(),
            fnv_1a_64(b"bank\tedge of a river").to_vec()
        );
        assert!(ConceptId::new("moneyBank!").digest().is_none());
    }

    #[test]
    fn closures_are_identifiers() {
        let stub = |_: &str, _: &str| ConceptId::new("same");
        assert_eq!(stub.identify("x", "y"), stub.identify("z", "w"));
    }

    #[test]
    fn concept_order_is_id_then_sense_then_gloss() {
        let a = Concept::new(ConceptId::new("a"), "z", "z");
        let b = Concept::new(ConceptId::new("b"), "a", "a");
        let b2 = Concept::new(ConceptId::new("b"), "a", "b");
        assert!(a < b);
        assert!(b < b2);
    }
}
