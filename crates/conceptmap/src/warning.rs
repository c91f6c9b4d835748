//! Non-fatal warnings raised while loading documents.
//!
//! Loading degrades instead of failing: each document that cannot be used is
//! recorded as a [`LoadWarning`] and the next fallback is tried. Callers get
//! the warnings next to the graph and decide whether to show them.
//!
//! # Examples
//!
//! ```
//! use conceptmap::warning::LoadWarning;
//!
//! let warning = LoadWarning::DocumentMissing {
//!     document: "graph_sec2-0.json".to_string(),
//!     error: "Document not found: graph_sec2-0.json".to_string(),
//! };
//! assert_eq!(warning.kind(), "document_missing");
//! assert!(warning.description().contains("graph_sec2-0.json"));
//! ```

use crate::error::{Error, SourceError};

/// A document that could not be used during a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The document was missing or its source was unreachable.
    ///
    /// **Effect**: the loader moves on to the next fallback stage.
    DocumentMissing {
        /// Name of the document
        document: String,
        /// Description of the fetch failure
        error: String,
    },

    /// The document was fetched but could not be parsed.
    ///
    /// **Effect**: the loader moves on to the next fallback stage.
    MalformedDocument {
        /// Name of the document
        document: String,
        /// Description of the parse failure
        error: String,
    },
}

impl LoadWarning {
    /// Returns the name of the document the warning refers to.
    #[must_use]
    pub fn document(&self) -> &str {
        match self {
            Self::DocumentMissing { document, .. } | Self::MalformedDocument { document, .. } => {
                document
            }
        }
    }

    /// Returns a human-readable description of the warning.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::DocumentMissing { document, error } => {
                format!("{document}: unavailable: {error}")
            }
            Self::MalformedDocument { document, error } => {
                format!("{document}: malformed JSON: {error}")
            }
        }
    }

    /// Returns a static string identifying the warning kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DocumentMissing { .. } => "document_missing",
            Self::MalformedDocument { .. } => "malformed_document",
        }
    }
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for LoadWarning {}

impl From<SourceError> for LoadWarning {
    fn from(err: SourceError) -> Self {
        Self::DocumentMissing {
            document: err.document().to_string(),
            error: err.to_string(),
        }
    }
}

impl From<Error> for LoadWarning {
    fn from(err: Error) -> Self {
        match err {
            Error::Source(source) => source.into(),
            Error::Malformed { document, source } => Self::MalformedDocument {
                document,
                error: source.to_string(),
            },
            other => Self::DocumentMissing {
                document: String::new(),
                error: other.to_string(),
            },
        }
    }
}
