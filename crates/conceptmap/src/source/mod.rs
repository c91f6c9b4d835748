//! Document sources for concept map data.
//!
//! Every document the system reads (per-section graphs, the merged graph and
//! the cross-chapter link list) is a static JSON file addressed by name.
//! This module provides the trait all backends implement:
//!
//! - **Directory**: files under a local directory ([`DirSource`])
//! - **HTTP**: files under a static base URL ([`HttpSource`], feature `http`)
//! - **Memory**: an in-process map, used by tests and bundled data ([`MemorySource`])
//!
//! # Example
//!
//! ```no_run
//! use conceptmap::source::{DirSource, DocumentSource, section_document};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let source = DirSource::new("public");
//!     let body = source.fetch(&section_document("sec3-0")).await?;
//!     println!("{} bytes", body.len());
//!     Ok(())
//! }
//! ```

mod dir;
#[cfg(feature = "http")]
mod http;
mod memory;

pub use dir::DirSource;
#[cfg(feature = "http")]
pub use http::HttpSource;
pub use memory::MemorySource;

use crate::error::{Error, Result, SourceError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Name of the pre-built full-graph document
pub const MERGED_DOCUMENT: &str = "graph_merged.json";

/// Name of the cross-chapter link document
pub const LINKS_DOCUMENT: &str = "cross_chapter_links.json";

/// Name of the per-section document for `section`.
///
/// ```
/// assert_eq!(conceptmap::source::section_document("sec3-0"), "graph_sec3-0.json");
/// ```
#[must_use]
pub fn section_document(section: &str) -> String {
    format!("graph_{section}.json")
}

/// Read-only access to named JSON documents.
///
/// Implementations must be `Send + Sync` so a source can sit behind the
/// orchestrator in any async context. Fetches are plain reads with no
/// caching; caching is the caller's concern.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the raw body of the named document.
    ///
    /// # Errors
    ///
    /// - `SourceError::NotFound` if the document does not exist
    /// - `SourceError::Unreachable` if the source cannot serve it
    /// - `SourceError::Io` for other local read failures
    async fn fetch(&self, name: &str) -> std::result::Result<String, SourceError>;

    /// Short human-readable description of where documents come from.
    fn describe(&self) -> String;
}

/// Fetch a document and parse it as JSON.
///
/// # Errors
///
/// Returns `Error::Source` if the fetch fails and `Error::Malformed` if the
/// body does not parse as `T`.
pub async fn fetch_json<T: DeserializeOwned>(source: &dyn DocumentSource, name: &str) -> Result<T> {
    let body = source.fetch(name).await?;
    serde_json::from_str(&body).map_err(|source| Error::Malformed {
        document: name.to_string(),
        source,
    })
}
