//! Combining per-section graph documents into the merged document.
//!
//! Node ids that occur more than once across the inputs are renamed to
//! `<id>_sec<section>` so every section keeps its own copy. Each merged node
//! records its `original_id` and `source_section`; each edge is remapped
//! through its own section's renaming and deduplicated on
//! `(source, target, relation)`.

use crate::domain::{Concept, Edge, GraphData};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

const SECTION_FILE_PREFIX: &str = "graph_sec";
const SECTION_FILE_SUFFIX: &str = ".json";

/// One input of a merge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedSource {
    /// Bare section id
    pub section_id: String,

    /// File the section was read from
    pub file: String,
}

/// Counts describing a merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStatistics {
    /// Nodes in the merged graph
    pub total_nodes: usize,

    /// Edges in the merged graph
    pub total_edges: usize,

    /// Distinct ids that had to be renamed
    pub id_collisions_resolved: usize,

    /// Distinct node ids in the merged graph
    pub unique_node_ids: usize,
}

/// Provenance block written next to the merged nodes and edges
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeMetadata {
    /// Inputs in merge order
    pub merged_from: Vec<MergedSource>,

    /// Number of merged sections
    pub total_sections: usize,

    /// Result counts
    pub statistics: MergeStatistics,
}

/// The merged document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedGraph {
    /// Merged concepts and relations
    #[serde(flatten)]
    pub graph: GraphData,

    /// Provenance
    pub metadata: MergeMetadata,
}

/// A section graph ready to be merged
#[derive(Debug, Clone, PartialEq)]
pub struct SectionGraph {
    /// Bare section id
    pub section_id: String,

    /// File name the graph was read from
    pub file: String,

    /// The section's graph
    pub graph: GraphData,
}

/// Extract the section id from a `graph_sec<id>.json` file name
#[must_use]
pub fn section_id_from_file_name(name: &str) -> Option<&str> {
    name.strip_prefix(SECTION_FILE_PREFIX)?
        .strip_suffix(SECTION_FILE_SUFFIX)
        .filter(|id| !id.is_empty())
}

/// Read every `graph_sec*.json` file in `dir`, ordered by file name.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or a section file
/// cannot be read or parsed.
pub async fn read_section_files(dir: &Path) -> Result<Vec<SectionGraph>> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let file_name = entry.file_name();
        if let Some(name) = file_name.to_str()
            && section_id_from_file_name(name).is_some()
        {
            names.push(name.to_string());
        }
    }
    names.sort();

    let mut sections = Vec::with_capacity(names.len());
    for file in names {
        let content = tokio::fs::read_to_string(dir.join(&file)).await?;
        let graph: GraphData = serde_json::from_str(&content).map_err(|source| Error::Malformed {
            document: file.clone(),
            source,
        })?;
        let section_id = section_id_from_file_name(&file).unwrap_or_default().to_string();
        sections.push(SectionGraph {
            section_id,
            file,
            graph,
        });
    }
    Ok(sections)
}

/// Merge section graphs in the given order
#[must_use]
pub fn merge_sections(sections: &[SectionGraph]) -> MergedGraph {
    let collisions = colliding_ids(sections);
    if !collisions.is_empty() {
        info!(collisions = collisions.len(), "Renaming colliding concept ids");
    }

    let renames: Vec<HashMap<&str, String>> = sections
        .iter()
        .map(|section| {
            section
                .graph
                .nodes
                .iter()
                .map(|node| {
                    let id = if collisions.contains(node.id.as_str()) {
                        format!("{}_sec{}", node.id, section.section_id)
                    } else {
                        node.id.clone()
                    };
                    (node.id.as_str(), id)
                })
                .collect()
        })
        .collect();

    let mut nodes: Vec<Concept> = Vec::new();
    let mut node_ids: HashSet<String> = HashSet::new();
    for (section, rename) in sections.iter().zip(&renames) {
        for node in &section.graph.nodes {
            let id = rename[node.id.as_str()].clone();
            if node_ids.insert(id.clone()) {
                nodes.push(Concept {
                    id,
                    original_id: Some(node.id.clone()),
                    source_section: Some(section.section_id.clone()),
                    ..node.clone()
                });
            }
        }
    }

    let mut edges: Vec<Edge> = Vec::new();
    let mut edge_keys: HashSet<(String, String, String)> = HashSet::new();
    for (section, rename) in sections.iter().zip(&renames) {
        for edge in &section.graph.edges {
            let source = rename
                .get(edge.source.as_str())
                .cloned()
                .unwrap_or_else(|| edge.source.clone());
            let target = rename
                .get(edge.target.as_str())
                .cloned()
                .unwrap_or_else(|| edge.target.clone());
            let key = (
                source.clone(),
                target.clone(),
                edge.relation.clone().unwrap_or_default(),
            );
            if edge_keys.insert(key) {
                edges.push(Edge {
                    source,
                    target,
                    source_section: Some(section.section_id.clone()),
                    ..edge.clone()
                });
            }
        }
    }

    let statistics = MergeStatistics {
        total_nodes: nodes.len(),
        total_edges: edges.len(),
        id_collisions_resolved: collisions.len(),
        unique_node_ids: node_ids.len(),
    };

    MergedGraph {
        graph: GraphData::new(nodes, edges),
        metadata: MergeMetadata {
            merged_from: sections
                .iter()
                .map(|s| MergedSource {
                    section_id: s.section_id.clone(),
                    file: s.file.clone(),
                })
                .collect(),
            total_sections: sections.len(),
            statistics,
        },
    }
}

/// Ids occurring more than once across all inputs, counting repeats inside
/// one section as well
fn colliding_ids(sections: &[SectionGraph]) -> HashSet<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for section in sections {
        for node in &section.graph.nodes {
            *counts.entry(node.id.as_str()).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, _)| id)
        .collect()
}

/// A structural problem found in a graph document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphIssue {
    /// A node id occurs more than once
    DuplicateNodeId {
        /// The repeated id
        id: String,
    },

    /// An edge's source is not a node id
    DanglingSource {
        /// Index of the edge in the document
        edge: usize,
        /// The unresolved id
        id: String,
    },

    /// An edge's target is not a node id
    DanglingTarget {
        /// Index of the edge in the document
        edge: usize,
        /// The unresolved id
        id: String,
    },
}

impl fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateNodeId { id } => write!(f, "duplicate node id '{id}'"),
            Self::DanglingSource { edge, id } => {
                write!(f, "edge {edge} references non-existent source '{id}'")
            }
            Self::DanglingTarget { edge, id } => {
                write!(f, "edge {edge} references non-existent target '{id}'")
            }
        }
    }
}

/// Check a graph for duplicate node ids and dangling edge endpoints.
///
/// Each duplicated id is reported once. Issues are ordered: duplicates first,
/// then edges in document order.
#[must_use]
pub fn validate_graph(graph: &GraphData) -> Vec<GraphIssue> {
    let mut issues = Vec::new();

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for node in &graph.nodes {
        if !seen.insert(node.id.as_str()) && reported.insert(node.id.as_str()) {
            issues.push(GraphIssue::DuplicateNodeId {
                id: node.id.clone(),
            });
        }
    }

    for (index, edge) in graph.edges.iter().enumerate() {
        if !seen.contains(edge.source.as_str()) {
            issues.push(GraphIssue::DanglingSource {
                edge: index,
                id: edge.source.clone(),
            });
        }
        if !seen.contains(edge.target.as_str()) {
            issues.push(GraphIssue::DanglingTarget {
                edge: index,
                id: edge.target.clone(),
            });
        }
    }

    if !issues.is_empty() {
        warn!(issues = issues.len(), "Graph validation found issues");
    }
    issues
}
