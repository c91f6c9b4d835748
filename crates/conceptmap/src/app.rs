//! Application context tying loading, linking and assembly together.
//!
//! # Example
//!
//! ```no_run
//! use conceptmap::app::ConceptMap;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let map = ConceptMap::from_directory(Path::new(".")).await?;
//!     let graph = map.load_section(Some("sec3-0")).await;
//!     println!("{} concepts", graph.nodes.len());
//!     Ok(())
//! }
//! ```

use crate::assembler::assemble;
use crate::commands::init::find_config_root;
use crate::config::{CONFIG_FILE_NAME, ConceptMapConfig};
use crate::domain::{CrossChapterLinksData, Evidence, GraphData};
use crate::error::Result;
use crate::link_cache::LinkCache;
use crate::linker::{CrossChapterAdditions, synthesize};
use crate::loader::{GraphOrigin, SectionLoader};
use crate::sections::SectionCatalogue;
use crate::source::DocumentSource;
use crate::warning::LoadWarning;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// An assembled section with the details of how it was produced
#[derive(Debug, Clone)]
pub struct SectionView {
    /// The assembled graph: section nodes and edges plus cross-chapter additions
    pub graph: GraphData,

    /// Which loader stage produced the section graph
    pub origin: GraphOrigin,

    /// Documents that could not be used on the way
    pub warnings: Vec<LoadWarning>,

    /// Number of external placeholder concepts added
    pub virtual_nodes: usize,

    /// Number of bridging edges added
    pub cross_edges: usize,
}

/// Application context for concept map operations.
///
/// Owns the document source, the section loader and the cross-chapter link
/// cache. The cache lives as long as this value.
pub struct ConceptMap {
    source: Arc<dyn DocumentSource>,
    loader: SectionLoader,
    links: LinkCache,
    config: ConceptMapConfig,
}

impl std::fmt::Debug for ConceptMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConceptMap")
            .field("source", &self.source.describe())
            .field("links", &self.links)
            .field("config", &self.config)
            .finish()
    }
}

impl ConceptMap {
    /// Create a context over an explicit source
    pub fn new(config: ConceptMapConfig, source: Arc<dyn DocumentSource>) -> Self {
        let loader = SectionLoader::new(source.clone(), config.loader_settings());
        let links = LinkCache::new(config.links_document.clone());
        Self {
            source,
            loader,
            links,
            config,
        }
    }

    /// Create a context from a configuration, resolving a directory source
    /// against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured source cannot be built.
    pub fn from_config(config: ConceptMapConfig, base_dir: &Path) -> Result<Self> {
        let source = config.build_source(base_dir)?;
        Ok(Self::new(config, source))
    }

    /// Create a context from the nearest `conceptmap.yaml` at or above
    /// `working_dir`, or from the defaults rooted at `working_dir` when
    /// there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be loaded.
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root = find_config_root(working_dir).unwrap_or_else(|| working_dir.to_path_buf());
        let config = ConceptMapConfig::load_or_default(&root.join(CONFIG_FILE_NAME)).await?;
        Self::from_config(config, &root)
    }

    /// The configuration in use
    #[must_use]
    pub fn config(&self) -> &ConceptMapConfig {
        &self.config
    }

    /// The document source in use
    #[must_use]
    pub fn source(&self) -> &dyn DocumentSource {
        self.source.as_ref()
    }

    /// The section catalogue
    #[must_use]
    pub fn catalogue(&self) -> SectionCatalogue {
        self.config.catalogue()
    }

    /// Load a section and bring in its cross-chapter references.
    ///
    /// Never fails; see [`load_section_view`](Self::load_section_view) for
    /// how the graph was produced.
    pub async fn load_section(&self, section: Option<&str>) -> GraphData {
        self.load_section_view(section).await.graph
    }

    /// Load a section, bring in its cross-chapter references and report how.
    ///
    /// Linking uses the section whose document was actually served, so a
    /// request that fell back to the default section gets the default
    /// section's links. The merged graph and the fallback graph are
    /// returned without linking.
    pub async fn load_section_view(&self, section: Option<&str>) -> SectionView {
        let report = self.loader.load_report(section).await;

        let additions = match report.origin.section() {
            Some(served) => {
                let links = self.links.get(self.source.as_ref()).await;
                synthesize(&links.cross_chapter_links, served, &report.graph.nodes)
            }
            None => {
                debug!(origin = ?report.origin, "Skipping cross-chapter linking");
                CrossChapterAdditions::default()
            }
        };

        SectionView {
            graph: assemble(&report.graph, &additions.virtual_nodes, &additions.cross_edges),
            origin: report.origin,
            warnings: report.warnings,
            virtual_nodes: additions.virtual_nodes.len(),
            cross_edges: additions.cross_edges.len(),
        }
    }

    /// The cross-chapter link document, loaded once
    pub async fn links(&self) -> Arc<CrossChapterLinksData> {
        self.links.get(self.source.as_ref()).await
    }

    /// Drop the cached link document so the next use reloads it
    pub fn reset_link_cache(&mut self) {
        self.links.reset();
    }

    /// URL of a section's published text, optionally pointing at evidence
    #[must_use]
    pub fn source_url(&self, section: &str, evidence: Option<&Evidence>) -> String {
        self.config.source_links.source_url(section, evidence)
    }
}
