//! Documents served over HTTP(S) from a static host.

use super::DocumentSource;
use crate::error::SourceError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Fetches documents with `GET <base_url>/<name>`.
///
/// No authentication or content negotiation is performed; the documents are
/// plain static JSON.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    /// Create a source for documents under `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a source that reuses an existing client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Full URL of the named document
    #[must_use]
    pub fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, name: &str) -> Result<String, SourceError> {
        let url = self.url_for(name);
        tracing::debug!(url = %url, "Fetching document");

        let unreachable = |reason: String| SourceError::Unreachable {
            document: name.to_string(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| unreachable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                response.text().await.map_err(|e| unreachable(e.to_string()))
            }
            StatusCode::NOT_FOUND => Err(SourceError::NotFound(name.to_string())),
            status => Err(unreachable(format!("HTTP {status}"))),
        }
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
