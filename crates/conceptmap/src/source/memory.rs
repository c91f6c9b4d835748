//! In-process document source.

use super::DocumentSource;
use crate::error::SourceError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Serves documents from a map held in memory.
///
/// Besides plain documents, names can be marked unreachable to simulate a
/// host that is down. Every fetch is recorded so tests can assert on the
/// order in which the loader tried its fallbacks.
#[derive(Debug, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
    unreachable: HashSet<String>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    /// Create an empty source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document
    #[must_use]
    pub fn with_document(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.documents.insert(name.into(), body.into());
        self
    }

    /// Add a document serialized from `value`
    ///
    /// # Panics
    ///
    /// Panics if `value` cannot be serialized to JSON.
    #[must_use]
    pub fn with_json<T: serde::Serialize>(self, name: impl Into<String>, value: &T) -> Self {
        let body = serde_json::to_string(value).expect("document value should serialize");
        self.with_document(name, body)
    }

    /// Mark a document as unreachable
    #[must_use]
    pub fn with_unreachable(mut self, name: impl Into<String>) -> Self {
        self.unreachable.insert(name.into());
        self
    }

    /// Names fetched so far, in order
    ///
    /// # Panics
    ///
    /// Panics if the request log mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("request log mutex should not be poisoned")
            .clone()
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn fetch(&self, name: &str) -> Result<String, SourceError> {
        self.requests
            .lock()
            .expect("request log mutex should not be poisoned")
            .push(name.to_string());

        if self.unreachable.contains(name) {
            return Err(SourceError::Unreachable {
                document: name.to_string(),
                reason: "marked unreachable".to_string(),
            });
        }

        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(name.to_string()))
    }

    fn describe(&self) -> String {
        format!("memory ({} documents)", self.documents.len())
    }
}
