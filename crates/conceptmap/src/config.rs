//! Configuration file handling.
//!
//! The configuration lives in `conceptmap.yaml`. Every field has a default,
//! so an empty file (or no file at all) is a valid configuration.

use crate::error::{Error, Result};
use crate::fallback::Fallback;
use crate::loader::{DEFAULT_SECTION, LoaderSettings};
use crate::sections::{SectionCatalogue, SectionEntry, SourceLinks};
use crate::source::{DirSource, DocumentSource, LINKS_DOCUMENT, MERGED_DOCUMENT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "conceptmap.yaml";

/// Default directory holding the graph documents
pub const DEFAULT_DATA_DIR: &str = "public";

/// Kind of document source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Documents are files in a local directory
    #[default]
    Dir,

    /// Documents are served under a base URL
    Http,
}

/// Where graph documents are read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source kind
    #[serde(default)]
    pub kind: SourceKind,

    /// Directory path or base URL
    pub location: String,
}

impl SourceConfig {
    /// A directory source
    pub fn dir(location: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Dir,
            location: location.into(),
        }
    }

    /// An HTTP source
    pub fn http(location: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Http,
            location: location.into(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::dir(DEFAULT_DATA_DIR)
    }
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConceptMapConfig {
    /// Document source
    pub source: SourceConfig,

    /// Section loaded when none is requested
    pub default_section: String,

    /// Name of the merged full-graph document
    pub merged_document: String,

    /// Name of the cross-chapter link document
    pub links_document: String,

    /// Graph served when no document loads
    pub fallback: Fallback,

    /// Links back to the published text
    pub source_links: SourceLinks,

    /// Section catalogue; the built-in one when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<SectionEntry>>,
}

impl Default for ConceptMapConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            default_section: DEFAULT_SECTION.to_string(),
            merged_document: MERGED_DOCUMENT.to_string(),
            links_document: LINKS_DOCUMENT.to_string(),
            fallback: Fallback::default(),
            source_links: SourceLinks::default(),
            sections: None,
        }
    }
}

impl ConceptMapConfig {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// fails [`validate`](Self::validate).
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, or the defaults if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded.
    pub async fn load_or_default(path: &Path) -> Result<Self> {
        if fs::try_exists(path).await? {
            Self::load(path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check the values that serde cannot
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty source location, default
    /// section or document name.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("source.location", &self.source.location),
            ("default_section", &self.default_section),
            ("merged_document", &self.merged_document),
            ("links_document", &self.links_document),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }

    /// Settings for the section loader
    #[must_use]
    pub fn loader_settings(&self) -> LoaderSettings {
        LoaderSettings {
            default_section: self.default_section.clone(),
            merged_document: self.merged_document.clone(),
            fallback: self.fallback,
        }
    }

    /// The configured section catalogue
    #[must_use]
    pub fn catalogue(&self) -> SectionCatalogue {
        self.sections
            .clone()
            .map_or_else(SectionCatalogue::builtin, SectionCatalogue::new)
    }

    /// Build the configured document source.
    ///
    /// A relative directory location is resolved against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an HTTP source when the crate was built
    /// without the `http` feature.
    pub fn build_source(&self, base_dir: &Path) -> Result<Arc<dyn DocumentSource>> {
        match self.source.kind {
            SourceKind::Dir => Ok(Arc::new(DirSource::new(
                base_dir.join(&self.source.location),
            ))),
            #[cfg(feature = "http")]
            SourceKind::Http => Ok(Arc::new(crate::source::HttpSource::new(
                self.source.location.clone(),
            ))),
            #[cfg(not(feature = "http"))]
            SourceKind::Http => Err(Error::Config(
                "HTTP sources require the `http` feature".to_string(),
            )),
        }
    }
}
