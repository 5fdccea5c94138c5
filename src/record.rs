//! Tab-separated record ingestion and output.
//!
//! Every file in the pipeline is line-oriented TSV with a fixed column
//! count. Rows with the wrong shape are handled according to a
//! [`RecordMode`] chosen by the caller: skipped in lenient mode, fatal in
//! strict mode.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::concept::{concept_id, Concept, ConceptId};
use crate::error::IngestError;

/// Result type for ingestion operations.
pub type IngestResult<T> = std::result::Result<T, IngestError>;

/// What to do with a row that has the wrong number of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordMode {
    /// Skip it and keep going.
    #[default]
    Lenient,
    /// Abort with [`IngestError::MalformedRecord`].
    Strict,
}

/// A type that can be read from one TSV row.
pub trait FromRow: Sized {
    /// Exact number of columns.
    const WIDTH: usize;

    /// Build a value from exactly `WIDTH` fields.
    fn from_fields(fields: Vec<String>, line: usize) -> IngestResult<Self>;
}

/// A type that can be written as one TSV row.
pub trait ToRow {
    fn fields(&self) -> Vec<Cow<'_, str>>;
}

/// Extracted row: (language, word, sense, gloss).
///
/// `word` is the surface form in `language`; `sense` is the headword whose
/// meaning it translates and `gloss` describes that meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordSense {
    pub language: String,
    pub word: String,
    pub sense: String,
    pub gloss: String,
}

impl WordSense {
    /// Attach a concept identifier, producing a graph input record.
    pub fn annotate(self) -> TranslationRecord {
        let concept = concept_id(&self.sense, &self.gloss);
        TranslationRecord {
            language: self.language,
            word: self.word,
            concept,
            sense: self.sense,
            gloss: self.gloss,
        }
    }
}

impl FromRow for WordSense {
    const WIDTH: usize = 4;

    fn from_fields(fields: Vec<String>, line: usize) -> IngestResult<Self> {
        let [language, word, sense, gloss]: [String; 4] = fields
            .try_into()
            .map_err(|f: Vec<String>| malformed(line, Self::WIDTH, f.len()))?;
        Ok(Self {
            language,
            word,
            sense,
            gloss,
        })
    }
}

impl ToRow for WordSense {
    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.language.as_str()),
            Cow::Borrowed(self.word.as_str()),
            Cow::Borrowed(self.sense.as_str()),
            Cow::Borrowed(self.gloss.as_str()),
        ]
    }
}

/// Graph input row: (language, word, concept id, sense, gloss).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationRecord {
    pub language: String,
    pub word: String,
    pub concept: ConceptId,
    pub sense: String,
    pub gloss: String,
}

impl TranslationRecord {
    pub fn new(
        language: impl Into<String>,
        word: impl Into<String>,
        concept: impl Into<String>,
        sense: impl Into<String>,
        gloss: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            word: word.into(),
            concept: ConceptId::new(concept),
            sense: sense.into(),
            gloss: gloss.into(),
        }
    }

    /// The concept this record's word denotes.
    pub fn to_concept(&self) -> Concept {
        Concept::new(self.concept.clone(), self.sense.as_str(), self.gloss.as_str())
    }
}

impl FromRow for TranslationRecord {
    const WIDTH: usize = 5;

    fn from_fields(fields: Vec<String>, line: usize) -> IngestResult<Self> {
        let [language, word, concept, sense, gloss]: [String; 5] = fields
            .try_into()
            .map_err(|f: Vec<String>| malformed(line, Self::WIDTH, f.len()))?;
        Ok(Self {
            language,
            word,
            concept: ConceptId::new(concept),
            sense,
            gloss,
        })
    }
}

impl ToRow for TranslationRecord {
    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.language.as_str()),
            Cow::Borrowed(self.word.as_str()),
            Cow::Borrowed(self.concept.as_str()),
            Cow::Borrowed(self.sense.as_str()),
            Cow::Borrowed(self.gloss.as_str()),
        ]
    }
}

fn malformed(line: usize, expected: usize, found: usize) -> IngestError {
    IngestError::MalformedRecord {
        line,
        expected,
        found,
    }
}

/// Open a file for buffered line reading.
pub fn open(path: &Path) -> IngestResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| IngestError::Io {
            path: path.display().to_string(),
            source,
        })
}

/// Split one line into tab-separated fields, dropping a trailing `\r`.
pub fn split_line(line: &str) -> Vec<String> {
    line.strip_suffix('\r')
        .unwrap_or(line)
        .split('\t')
        .map(str::to_owned)
        .collect()
}

/// Read every row of `reader` as a `T`.
///
/// `source` names the input in I/O errors. Blank lines are ignored in both
/// modes.
pub fn read_rows<T, R>(reader: R, mode: RecordMode, source: &str) -> IngestResult<Vec<T>>
where
    T: FromRow,
    R: BufRead,
{
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.map_err(|e| IngestError::Io {
            path: source.to_string(),
            source: e,
        })?;
        if line.is_empty() {
            continue;
        }

        let fields = split_line(&line);
        let parsed = if fields.len() == T::WIDTH {
            T::from_fields(fields, number)
        } else {
            Err(malformed(number, T::WIDTH, fields.len()))
        };

        match parsed {
            Ok(row) => rows.push(row),
            Err(e) if mode == RecordMode::Lenient => {
                tracing::debug!(line = number, error = %e, "skipping malformed row");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(source, rows = rows.len(), skipped, "read records");
    Ok(rows)
}

/// Read rows from a file on disk.
pub fn read_file<T: FromRow>(path: &Path, mode: RecordMode) -> IngestResult<Vec<T>> {
    read_rows(open(path)?, mode, &path.display().to_string())
}

/// Write rows as TSV, one per line.
pub fn write_rows<'a, T, W, I>(writer: &mut W, rows: I) -> std::io::Result<()>
where
    T: ToRow + 'a,
    W: Write,
    I: IntoIterator<Item = &'a T>,
{
    for row in rows {
        let fields = row.fields();
        writeln!(writer, "{}", fields.join("\t"))?;
    }
    writer.flush()
}
