//! Translation extraction from machine-readable Wiktionary dumps.
//!
//! Input is JSON Lines in the kaikki.org layout, one headword per line.
//! Every usable translation of a headword becomes a
//! `(language, word, headword, gloss)` row, and the headword itself is
//! emitted once per distinct gloss so its own language is represented.
//! Data-quality problems are logged and the offending translation skipped;
//! they never abort extraction.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::io::BufRead;

use serde::{Deserialize, Deserializer};

use crate::error::IngestError;
use crate::record::{IngestResult, WordSense};

/// Placeholder gloss some entries use for their untitled translation table.
const PLACEHOLDER_GLOSS: &str = "Translations";

/// One headword entry.
#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryEntry {
    pub word: String,
    #[serde(default)]
    pub pos: String,
    /// Language name.
    #[serde(default)]
    pub lang: String,
    /// Language code.
    pub lang_code: String,
    #[serde(default)]
    pub senses: Vec<SenseEntry>,
    #[serde(default)]
    pub translations: Vec<TranslationEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SenseEntry {
    #[serde(default)]
    pub translations: Vec<TranslationEntry>,
    #[serde(default)]
    pub synonyms: Vec<SynonymEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslationEntry {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub roman: Option<String>,
    /// Gloss of the translated sense.
    #[serde(default)]
    pub sense: SenseField,
}

/// The `sense` key of a translation. An absent key glosses as the headword
/// itself; an explicit `null` glosses as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SenseField {
    #[default]
    Absent,
    Null,
    Text(String),
}

impl SenseField {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Absent | Self::Null => None,
        }
    }

    /// Gloss for a translation of `headword`.
    pub fn gloss(&self, headword: &str) -> String {
        match self {
            Self::Text(text) if text != PLACEHOLDER_GLOSS => text.clone(),
            Self::Text(_) | Self::Absent => headword.to_owned(),
            Self::Null => String::new(),
        }
    }
}

impl<'de> Deserialize<'de> for SenseField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(text) => Self::Text(text),
            None => Self::Null,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SynonymEntry {
    #[serde(default)]
    pub word: String,
}

/// Data-quality problems in a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationIssue {
    MissingCode,
    MissingWord,
    MissingSense,
}

impl TranslationIssue {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingCode => "missing-code",
            Self::MissingWord => "missing-word",
            Self::MissingSense => "missing-sense",
        }
    }

    /// Whether the translation is unusable.
    pub fn is_fatal(self) -> bool {
        matches!(self, Self::MissingCode | Self::MissingWord)
    }
}

/// Check a translation for missing fields. An empty sense is fine.
pub fn check_translation(translation: &TranslationEntry) -> Option<TranslationIssue> {
    let blank = |field: &Option<String>| field.as_deref().is_none_or(str::is_empty);
    if blank(&translation.code) {
        Some(TranslationIssue::MissingCode)
    } else if blank(&translation.word) {
        Some(TranslationIssue::MissingWord)
    } else if translation.sense.as_text().is_none() {
        Some(TranslationIssue::MissingSense)
    } else {
        None
    }
}

/// A translation that passed [`check_translation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub code: String,
    pub word: String,
    pub sense: SenseField,
}

impl DictionaryEntry {
    fn usable(&self, translation: &TranslationEntry) -> Option<Translation> {
        if let Some(issue) = check_translation(translation) {
            tracing::warn!(
                kind = issue.as_str(),
                language = %self.lang_code,
                word = %self.word,
                translation = ?translation,
                "translation data problem"
            );
            if issue.is_fatal() {
                return None;
            }
        }
        Some(Translation {
            code: translation.code.clone().unwrap_or_default(),
            word: translation.word.clone().unwrap_or_default(),
            sense: translation.sense.clone(),
        })
    }

    /// All usable translations, entry-level first, then per sense.
    ///
    /// A sense's synonyms count as translations into the entry's own
    /// language, glossed with the sense of the first translation listed
    /// under that sense. A sense with no glossed translation contributes no
    /// synonyms, and one empty synonym discards the whole list.
    pub fn translations(&self) -> Vec<Translation> {
        let mut out: Vec<Translation> = self
            .translations
            .iter()
            .filter_map(|t| self.usable(t))
            .collect();

        for sense in &self.senses {
            let mut description: Option<String> = None;
            for translation in sense.translations.iter().filter_map(|t| self.usable(t)) {
                if description.is_none() {
                    description = translation.sense.as_text().map(str::to_owned);
                }
                out.push(translation);
            }

            let Some(description) = description else {
                continue;
            };
            if sense.synonyms.iter().any(|s| s.word.is_empty()) {
                continue;
            }
            out.extend(sense.synonyms.iter().map(|synonym| Translation {
                code: self.lang_code.clone(),
                word: synonym.word.clone(),
                sense: SenseField::Text(description.clone()),
            }));
        }
        out
    }

    /// Rows for this entry: every translation, then the headword once per
    /// distinct gloss.
    pub fn word_senses(&self) -> Vec<WordSense> {
        let mut rows = Vec::new();
        let mut glosses: BTreeSet<String> = BTreeSet::new();

        for translation in self.translations() {
            let gloss = translation.sense.gloss(&self.word);
            glosses.insert(gloss.clone());
            rows.push(WordSense {
                language: translation.code,
                word: translation.word,
                sense: self.word.clone(),
                gloss,
            });
        }

        rows.extend(glosses.into_iter().map(|gloss| WordSense {
            language: self.lang_code.clone(),
            word: self.word.clone(),
            sense: self.word.clone(),
            gloss,
        }));
        rows
    }

    fn is_complete(&self) -> bool {
        !self.pos.is_empty() && !self.lang.is_empty() && !self.senses.is_empty()
    }
}

/// Parse one dump line.
pub fn parse_entry(line: &str, number: usize) -> IngestResult<DictionaryEntry> {
    serde_json::from_str(line).map_err(|e| IngestError::Json {
        line: number,
        message: e.to_string(),
    })
}

/// Read every entry of a dump and extract sanitized rows.
///
/// `source` names the input in I/O errors. Entries without a part of
/// speech, language name or senses are skipped with a warning.
pub fn extract<R: BufRead>(reader: R, source: &str) -> IngestResult<Vec<WordSense>> {
    let mut rows = Vec::new();
    let mut entries = 0usize;
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.map_err(|e| IngestError::Io {
            path: source.to_string(),
            source: e,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let entry = parse_entry(&line, number)?;
        if !entry.is_complete() {
            tracing::warn!(line = number, word = %entry.word, "incomplete entry");
            skipped += 1;
            continue;
        }
        entries += 1;
        rows.extend(entry.word_senses().into_iter().map(sanitize_row));
    }

    tracing::info!(source, entries, skipped, rows = rows.len(), "extracted word senses");
    Ok(rows)
}

/// Make a field safe for TSV output.
///
/// Text from the first newline on is dropped (it is usually an editor's
/// comment) and tabs become spaces. Returns `Cow::Owned` only when the text
/// changed.
pub fn sanitize_field(text: &str) -> Cow<'_, str> {
    let line = match text.find('\n') {
        Some(newline) => &text[..newline],
        None => text,
    };
    if line.contains('\t') {
        Cow::Owned(line.replace('\t', " "))
    } else if line.len() != text.len() {
        Cow::Owned(line.to_owned())
    } else {
        Cow::Borrowed(text)
    }
}

fn sanitize(field: String) -> String {
    match sanitize_field(&field) {
        Cow::Borrowed(_) => field,
        Cow::Owned(fixed) => {
            tracing::warn!(field = ?field, "invalid whitespace");
            fixed
        }
    }
}

/// Sanitize every field of a row.
pub fn sanitize_row(row: WordSense) -> WordSense {
    WordSense {
        language: sanitize(row.language),
        word: sanitize(row.word),
        sense: sanitize(row.sense),
        gloss: sanitize(row.gloss),
    }
}
