//! Load-once cache for the cross-chapter link document.

use crate::domain::CrossChapterLinksData;
use crate::error::{Error, Result};
use crate::source::{DocumentSource, LINKS_DOCUMENT, fetch_json};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Holds the cross-chapter link document after its first successful fetch.
///
/// A failed fetch is not cached: the caller gets an empty document and the
/// next [`get`](Self::get) tries again. There is no refresh; call
/// [`reset`](Self::reset) to force a reload.
#[derive(Debug)]
pub struct LinkCache {
    document: String,
    cell: OnceCell<Arc<CrossChapterLinksData>>,
}

impl LinkCache {
    /// Create an empty cache for the named document
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            cell: OnceCell::new(),
        }
    }

    /// Name of the cached document
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Whether a document has been cached
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Return the cached links, fetching them on first use.
    ///
    /// Never fails: an unavailable or malformed document yields an empty one.
    pub async fn get(&self, source: &dyn DocumentSource) -> Arc<CrossChapterLinksData> {
        match self.try_get(source).await {
            Ok(data) => data,
            Err(err) => {
                warn!(document = %self.document, error = %err, "Failed to load cross-chapter links");
                Arc::new(CrossChapterLinksData::default())
            }
        }
    }

    /// Return the cached links, fetching them on first use.
    ///
    /// # Errors
    ///
    /// Returns the fetch or parse error when nothing is cached yet and the
    /// document cannot be loaded.
    pub async fn try_get(&self, source: &dyn DocumentSource) -> Result<Arc<CrossChapterLinksData>> {
        self.cell
            .get_or_try_init(|| async {
                let data: CrossChapterLinksData = fetch_json(source, &self.document).await?;
                info!(
                    document = %self.document,
                    links = data.cross_chapter_links.len(),
                    "Loaded cross-chapter links"
                );
                Ok::<_, Error>(Arc::new(data))
            })
            .await
            .cloned()
    }

    /// Drop the cached document
    pub fn reset(&mut self) {
        self.cell.take();
    }
}

impl Default for LinkCache {
    fn default() -> Self {
        Self::new(LINKS_DOCUMENT)
    }
}
