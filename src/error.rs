//! Error types for colexify.
//!
//! One enum per stage of the pipeline (hashing, identifiers, ingestion,
//! configuration, statistics). Codes follow `colex::<stage>::<kind>`.

use miette::Diagnostic;
use thiserror::Error;

/// Any colexify error. Codes and help text of the wrapped error show through.
#[derive(Debug, Error, Diagnostic)]
pub enum ColexError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Base58(#[from] Base58Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Stats(#[from] StatsError),
}

// ---------------------------------------------------------------------------
// Hash errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum HashError {
    #[error("unsupported digest width: {width} bytes")]
    #[diagnostic(
        code(colex::hash::unsupported_width),
        help(
            "FNV-1a digests are computed in a 128-bit accumulator. \
             Choose a width between 1 and 16 bytes (4, 8 and 16 have standard constants)."
        )
    )]
    UnsupportedWidth { width: usize },
}

// ---------------------------------------------------------------------------
// Base-58 errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum Base58Error {
    #[error("invalid base-58 character {character:?} at position {position}")]
    #[diagnostic(
        code(colex::base58::invalid_char),
        help(
            "Concept identifiers use the Bitcoin alphabet, which omits 0, O, I and l. \
             Check that the identifier was not mistyped or truncated."
        )
    )]
    InvalidCharacter { character: char, position: usize },
}

// ---------------------------------------------------------------------------
// Ingestion errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum IngestError {
    #[error("I/O error while reading {path}")]
    #[diagnostic(
        code(colex::ingest::io),
        help("Check that the file exists, is readable, and is UTF-8 encoded.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record on line {line}: expected {expected} fields, found {found}")]
    #[diagnostic(
        code(colex::ingest::malformed_record),
        help(
            "Strict mode aborts on rows with the wrong number of tab-separated columns. \
             Fix the row, or rerun without --strict to skip malformed rows."
        )
    )]
    MalformedRecord {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid weight {value:?} on line {line}")]
    #[diagnostic(
        code(colex::ingest::invalid_weight),
        help("The last column of a graph file must be a non-negative decimal integer.")
    )]
    InvalidWeight { line: usize, value: String },

    #[error("invalid dictionary entry on line {line}: {message}")]
    #[diagnostic(
        code(colex::ingest::json),
        help(
            "Each line of the dictionary dump must be one JSON object with at least \
             `word`, `pos`, `lang`, `lang_code` and `senses` fields."
        )
    )]
    Json { line: usize, message: String },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(colex::config::read),
        help("Ensure the config file exists and is valid TOML.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}")]
    #[diagnostic(
        code(colex::config::parse),
        help("Check the TOML syntax. Known keys are `sense_cutoff` and `edge_cutoff`.")
    )]
    Parse { path: String, message: String },
}

// ---------------------------------------------------------------------------
// Statistics errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StatsError {
    #[error("need at least 2 data points, got {count}")]
    #[diagnostic(
        code(colex::stats::too_few_points),
        help("Quantiles need at least two edges. Lower the cutoffs to keep more edges.")
    )]
    TooFewPoints { count: usize },
}

/// Convenience result alias for colexify operations.
pub type ColexResult<T> = std::result::Result<T, ColexError>;
