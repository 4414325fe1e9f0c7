//! Library error type.

use crate::page::SectionId;

/// Errors produced while building pages and applying visibility batches.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum Error {
    /// Threshold outside `0.0..=1.0` (or NaN).
    #[error("intersection threshold must be within 0.0..=1.0, got {0}")]
    InvalidThreshold(f64),

    /// A record named a section with no navigation entry and the
    /// highlighter runs with [`MissingEntryPolicy::Halt`].
    ///
    /// [`MissingEntryPolicy::Halt`]: crate::highlight::MissingEntryPolicy::Halt
    #[error("no navigation entry `{entry}` for section `{section}`")]
    MissingEntry { section: SectionId, entry: String },

    /// Two sections of one page share an id.
    #[error("duplicate section id `{0}`")]
    DuplicateSection(String),
}

pub type Result<T> = std::result::Result<T, Error>;
