//! Error types for conceptmap operations.
//!
//! Loading a section never fails outright: missing and malformed documents
//! degrade to the next fallback and are reported as
//! [`LoadWarning`](crate::warning::LoadWarning)s. The errors here surface
//! from the lower-level pieces (document sources, configuration, offline
//! tooling) before that degradation is applied.

use std::io;
use thiserror::Error;

/// The error type for conceptmap operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A document could not be fetched.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A document was fetched but is not valid JSON for the expected shape.
    #[error("Malformed document '{document}': {source}")]
    Malformed {
        /// Name of the document
        document: String,
        /// The parse failure
        #[source]
        source: serde_json::Error,
    },

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure to fetch a document from a [`DocumentSource`](crate::source::DocumentSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// The document does not exist at the source.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// The source could not be reached or returned an error status.
    #[error("Document '{document}' unreachable: {reason}")]
    Unreachable {
        /// Name of the document
        document: String,
        /// Description of the failure
        reason: String,
    },

    /// Local IO failure other than a missing file.
    #[error("IO error reading '{document}': {source}")]
    Io {
        /// Name of the document
        document: String,
        /// The underlying IO error
        #[source]
        source: io::Error,
    },
}

impl SourceError {
    /// Name of the document the failure refers to.
    #[must_use]
    pub fn document(&self) -> &str {
        match self {
            Self::NotFound(document)
            | Self::Unreachable { document, .. }
            | Self::Io { document, .. } => document,
        }
    }
}

/// A specialized Result type for conceptmap operations.
pub type Result<T> = std::result::Result<T, Error>;
