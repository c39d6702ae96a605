//! Error types for docstruct.

use std::io;
use thiserror::Error;

/// Result type alias for docstruct operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while structuring a document.
///
/// Exceeding a resource limit is never an error: the structurer truncates
/// and reports what it actually read.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The bytes are not recognized as a PDF document.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header carries a version we do not understand.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The uploaded filename does not name a PDF file.
    #[error("Only PDF files are supported: {0}")]
    NotPdfFile(String),

    /// The PDF engine rejected the document.
    #[error("Failed to read PDF: {0}")]
    Unreadable(String),

    /// A required input collection was empty.
    #[error("{0} is required and cannot be empty")]
    EmptyInput(&'static str),

    /// Chunk size must be at least one character.
    #[error("invalid chunk size: {0} (must be > 0)")]
    InvalidChunkSize(usize),

    /// A single page could not be extracted.
    #[error("Page {page}: text extraction failed: {reason}")]
    PageExtract {
        /// 1-based page index
        page: u32,
        /// Collaborator-supplied cause
        reason: String,
    },

    /// The embedding backend failed.
    #[error("embedding failed: {0}")]
    Embedding(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Error decoding an extracted-document JSON payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error is caused by the caller's input rather than by a
    /// collaborator or the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownFormat
                | Error::UnsupportedVersion(_)
                | Error::NotPdfFile(_)
                | Error::Unreadable(_)
                | Error::EmptyInput(_)
                | Error::InvalidChunkSize(_)
        )
    }
}
