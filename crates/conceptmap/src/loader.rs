//! Section loading with a fallback chain.
//!
//! [`SectionLoader::load`] always returns a usable [`GraphData`]. The chain
//! tried for a section key is:
//!
//! 1. the requested section's document (`graph_<key>.json`)
//! 2. the default section's document
//! 3. the configured in-memory [`Fallback`] graph
//!
//! The special key [`MERGED_KEY`] replaces step 1 with the pre-built merged
//! document. Each failed stage is recorded as a [`LoadWarning`] and logged;
//! nothing is surfaced to the caller as an error.

use crate::domain::GraphData;
use crate::fallback::Fallback;
use crate::source::{DocumentSource, MERGED_DOCUMENT, fetch_json, section_document};
use crate::warning::LoadWarning;
use std::sync::Arc;
use tracing::{info, warn};

/// Section used when no key is given
pub const DEFAULT_SECTION: &str = "sec1-0";

/// Key selecting the pre-built full graph
pub const MERGED_KEY: &str = "merged";

/// Where the graph returned by a load came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphOrigin {
    /// The requested section's own document
    Requested(String),

    /// The default section's document, served in place of the requested one
    DefaultSection(String),

    /// The merged full-graph document
    Merged,

    /// The in-memory fallback graph
    Fallback,
}

impl GraphOrigin {
    /// The section key whose document was served, if it was a section document
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        match self {
            Self::Requested(section) | Self::DefaultSection(section) => Some(section),
            Self::Merged | Self::Fallback => None,
        }
    }
}

/// Result of a load, with the warnings raised along the way
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// The loaded graph
    pub graph: GraphData,

    /// Which stage produced the graph
    pub origin: GraphOrigin,

    /// Documents that were tried and could not be used, in order
    pub warnings: Vec<LoadWarning>,
}

/// Settings for [`SectionLoader`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderSettings {
    /// Section tried when the requested one is unavailable
    pub default_section: String,

    /// Name of the merged document
    pub merged_document: String,

    /// Graph returned when every document fails
    pub fallback: Fallback,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            default_section: DEFAULT_SECTION.to_string(),
            merged_document: MERGED_DOCUMENT.to_string(),
            fallback: Fallback::default(),
        }
    }
}

/// Loads a section's graph document, degrading through fallbacks.
pub struct SectionLoader {
    source: Arc<dyn DocumentSource>,
    settings: LoaderSettings,
}

impl std::fmt::Debug for SectionLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionLoader")
            .field("source", &self.source.describe())
            .field("settings", &self.settings)
            .finish()
    }
}

impl SectionLoader {
    /// Create a loader over `source`
    pub fn new(source: Arc<dyn DocumentSource>, settings: LoaderSettings) -> Self {
        Self { source, settings }
    }

    /// The loader settings
    #[must_use]
    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    /// Load a section's graph.
    ///
    /// An absent or blank key loads the default section. This never fails;
    /// see [`load_report`](Self::load_report) for the warnings.
    pub async fn load(&self, section: Option<&str>) -> GraphData {
        self.load_report(section).await.graph
    }

    /// Load a section's graph and report which stage produced it.
    pub async fn load_report(&self, section: Option<&str>) -> LoadReport {
        let mut warnings = Vec::new();
        let key = section.map(str::trim).filter(|s| !s.is_empty());
        let default = self.settings.default_section.as_str();

        if key == Some(MERGED_KEY) {
            if let Some(graph) = self
                .try_document(&self.settings.merged_document, &mut warnings)
                .await
            {
                return LoadReport {
                    graph,
                    origin: GraphOrigin::Merged,
                    warnings,
                };
            }
        } else {
            let requested = key.unwrap_or(default);
            if let Some(graph) = self
                .try_document(&section_document(requested), &mut warnings)
                .await
            {
                return LoadReport {
                    graph,
                    origin: GraphOrigin::Requested(requested.to_string()),
                    warnings,
                };
            }
            if requested == default {
                return self.fallback(warnings);
            }
        }

        if let Some(graph) = self
            .try_document(&section_document(default), &mut warnings)
            .await
        {
            info!(section = %default, "Serving default section in place of requested one");
            return LoadReport {
                graph,
                origin: GraphOrigin::DefaultSection(default.to_string()),
                warnings,
            };
        }

        self.fallback(warnings)
    }

    async fn try_document(&self, name: &str, warnings: &mut Vec<LoadWarning>) -> Option<GraphData> {
        match fetch_json::<GraphData>(self.source.as_ref(), name).await {
            Ok(graph) => {
                info!(document = %name, nodes = graph.nodes.len(), edges = graph.edges.len(), "Loaded graph document");
                Some(graph)
            }
            Err(err) => {
                let warning = LoadWarning::from(err);
                warn!(document = %name, "{}", warning);
                warnings.push(warning);
                None
            }
        }
    }

    fn fallback(&self, warnings: Vec<LoadWarning>) -> LoadReport {
        warn!(fallback = ?self.settings.fallback, "No graph documents available, using fallback graph");
        LoadReport {
            graph: self.settings.fallback.graph(),
            origin: GraphOrigin::Fallback,
            warnings,
        }
    }
}
