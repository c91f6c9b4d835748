//! Display state for one viewer of the concept map.
//!
//! A section change is split into [`SectionSession::request`], which stamps
//! the request with a new generation, and [`SectionSession::complete`],
//! which applies the loaded graph only if no newer request has been made
//! since. Loads may therefore finish in any order without an older section
//! overwriting a newer one.

use crate::app::ConceptMap;
use crate::domain::{Concept, Edge, GraphData};
use crate::linker::section_key;
use tracing::debug;

/// A pending section change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRequest {
    generation: u64,
    section: Option<String>,
}

impl SectionRequest {
    /// Generation this request was issued at
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Requested section key; `None` for the default section
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }
}

/// What is currently selected. A concept and an edge are never selected
/// together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing selected
    #[default]
    None,

    /// A concept, by id
    Concept(String),

    /// An edge, by position in the displayed graph's `edges` list.
    ///
    /// The position counts every edge in document order, including edges
    /// whose endpoints do not resolve to a concept.
    Edge(usize),
}

/// Outcome of [`SectionSession::complete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The graph is now displayed
    Applied,

    /// A newer request superseded this one; the graph was dropped
    Stale,
}

/// Displayed section, graph and selection
#[derive(Debug, Clone, Default)]
pub struct SectionSession {
    generation: u64,
    section: Option<String>,
    graph: GraphData,
    selection: Selection,
    loading: bool,
}

impl SectionSession {
    /// An empty session with nothing loaded
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a section change.
    ///
    /// Clears the selection and marks the session as loading. The returned
    /// request must be passed back to [`complete`](Self::complete).
    pub fn request(&mut self, section: Option<&str>) -> SectionRequest {
        self.generation += 1;
        self.section = section.map(str::to_string);
        self.selection = Selection::None;
        self.loading = true;
        SectionRequest {
            generation: self.generation,
            section: self.section.clone(),
        }
    }

    /// Apply a loaded graph if `request` is still the latest one.
    ///
    /// An applied graph clears the selection, since a selection made while
    /// loading refers to the previous graph.
    pub fn complete(&mut self, request: &SectionRequest, graph: GraphData) -> Completion {
        if request.generation != self.generation {
            debug!(
                stale = request.generation,
                current = self.generation,
                "Dropping result of superseded section request"
            );
            return Completion::Stale;
        }
        self.graph = graph;
        self.selection = Selection::None;
        self.loading = false;
        Completion::Applied
    }

    /// Request a section, load it through `map` and apply it
    pub async fn change_section(&mut self, map: &ConceptMap, section: Option<&str>) -> Completion {
        let request = self.request(section);
        let graph = map.load_section(request.section()).await;
        self.complete(&request, graph)
    }

    /// Select a concept by id, clearing any edge selection.
    ///
    /// Returns `false` and leaves the selection unchanged when the displayed
    /// graph has no such concept.
    pub fn select_concept(&mut self, id: &str) -> bool {
        if self.graph.node(id).is_none() {
            return false;
        }
        self.selection = Selection::Concept(id.to_string());
        true
    }

    /// Select an edge by index, clearing any concept selection.
    ///
    /// Returns `false` and leaves the selection unchanged when the index is
    /// out of range.
    pub fn select_edge(&mut self, index: usize) -> bool {
        if index >= self.graph.edges.len() {
            return false;
        }
        self.selection = Selection::Edge(index);
        true
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    /// Start loading the home section of an external concept.
    ///
    /// Returns `None` when `id` is not a displayed external concept.
    pub fn navigate_to_external(&mut self, id: &str) -> Option<SectionRequest> {
        let home = self
            .graph
            .node(id)?
            .external_reference
            .as_ref()
            .map(|r| section_key(&r.section))?;
        Some(self.request(Some(&home)))
    }

    /// Current generation
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Section key of the latest request
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    /// Displayed graph
    #[must_use]
    pub fn graph(&self) -> &GraphData {
        &self.graph
    }

    /// Whether the latest request is still pending
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current selection
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The selected concept, if any
    #[must_use]
    pub fn selected_concept(&self) -> Option<&Concept> {
        match &self.selection {
            Selection::Concept(id) => self.graph.node(id),
            _ => None,
        }
    }

    /// The selected edge, if any
    #[must_use]
    pub fn selected_edge(&self) -> Option<&Edge> {
        match self.selection {
            Selection::Edge(index) => self.graph.edges.get(index),
            _ => None,
        }
    }
}
