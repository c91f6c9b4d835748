//! Documents served from a local directory.

use super::DocumentSource;
use crate::error::SourceError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Reads documents as files under a root directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Create a source rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DocumentSource for DirSource {
    async fn fetch(&self, name: &str) -> Result<String, SourceError> {
        let path = self.root.join(name);
        tracing::debug!(path = %path.display(), "Reading document");

        fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => SourceError::NotFound(name.to_string()),
            _ => SourceError::Io {
                document: name.to_string(),
                source: e,
            },
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
