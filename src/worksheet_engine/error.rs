//! Error types for catalog loading and sentence lookup.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the worksheet engine.
///
/// Advancing a completed sentence or resetting an untouched one is not an
/// error; both are plain no-op-safe operations.
#[derive(Debug, Error)]
pub enum WorksheetError {
    // === Lookup ===
    /// No lesson with this day number exists in the catalog.
    #[error("lesson day {day} not found in catalog")]
    DayNotFound { day: u32 },

    /// The lesson exists but has no sentence at this index.
    #[error("sentence {index} not found in lesson day {day}")]
    SentenceNotFound { day: u32, index: usize },

    /// Navigation target outside the configured day range.
    #[error("day {day} is outside the range {first}..={last}")]
    DayOutOfRange { day: u32, first: u32, last: u32 },

    // === Data contract ===
    /// Two lessons share one day number.
    #[error("duplicate lesson day {day} in catalog")]
    DuplicateDay { day: u32 },

    /// The lesson data does not match the expected shape, e.g. a sentence
    /// without its manipulation block.
    #[error("malformed lesson data: {0}")]
    MalformedCatalog(#[from] serde_json::Error),

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, WorksheetError>;
