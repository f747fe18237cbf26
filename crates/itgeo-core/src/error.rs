//! Error types for the deck derivation engine.
//!
//! Every fatal condition carries enough context (offending code, level,
//! data row, label) to let the deck author fix the source table. Nothing
//! here is retried: the build is a deterministic transform over static
//! input, so a failed run is rerun only after the input changes.

use std::path::PathBuf;

use thiserror::Error;

use crate::entity::NutsCode;
use crate::level::NutsLevel;

/// Errors that can occur while loading the entity table or deriving the deck.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The entity table file was not found.
    #[error("entity table not found: {path}")]
    TableNotFound { path: PathBuf },

    /// A row failed validation; `source` holds the underlying defect.
    #[error("row {row}: {source}")]
    Row {
        /// 1-based data row number (headers excluded).
        row: usize,
        source: Box<CoreError>,
    },

    /// The NUTS level cell did not parse as 1, 2 or 3.
    #[error("invalid NUTS level {value:?} (expected 1, 2 or 3)")]
    InvalidLevel { value: String },

    /// A code cell contained characters outside ASCII alphanumerics.
    #[error("invalid NUTS code {code:?} (codes are ASCII alphanumeric, matched exactly)")]
    InvalidCode { code: String },

    /// A required code column was empty.
    #[error("no {level} code for {label:?}")]
    MissingCode { level: NutsLevel, label: String },

    /// A code column deeper than the row's own level was non-empty.
    #[error("unexpected {level} code {code} for {label:?}")]
    UnexpectedCode {
        level: NutsLevel,
        code: NutsCode,
        label: String,
    },

    /// Two rows share the same level and code.
    #[error("duplicate {level} code {code} in the entity table")]
    DuplicateCode { level: NutsLevel, code: NutsCode },

    /// An ancestor reference matched no row at the target level.
    #[error("no {level} entity with code {code}")]
    AncestorNotFound { level: NutsLevel, code: NutsCode },

    /// A label reduced to an empty slug, so no tag segment can name it.
    #[error("label {label:?} derives an empty tag slug")]
    EmptySlug { label: String },

    /// Two retained rows derived the same note identity.
    #[error("duplicate note identity {guid} for {label:?}")]
    DuplicateGuid { guid: String, label: String },

    /// Canonical serialization of the deck payload failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// CSV-level read or decode failure (carries the csv crate's position).
    #[error("entity table error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for derivation operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors from the canonical byte pipeline.
#[derive(Debug, Error)]
pub enum CanonicalizationError {
    /// Floats have no stable canonical rendering and never appear in deck
    /// payloads; their presence means a modelling bug.
    #[error("float values are not canonicalizable: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
