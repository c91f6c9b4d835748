//! Merging a section graph with its cross-chapter additions.

use crate::domain::{Concept, Edge, GraphData};

/// Build the renderable graph for a section.
///
/// Nodes are the section's nodes followed by the virtual nodes; edges are the
/// section's edges followed by the cross edges. Order within each part is
/// kept. No deduplication or validation happens here: id uniqueness relies on
/// [`synthesize`](crate::linker::synthesize) having been given the section's
/// nodes.
#[must_use]
pub fn assemble(
    section: &GraphData,
    virtual_nodes: &[Concept],
    cross_edges: &[Edge],
) -> GraphData {
    let mut nodes = Vec::with_capacity(section.nodes.len() + virtual_nodes.len());
    nodes.extend_from_slice(&section.nodes);
    nodes.extend_from_slice(virtual_nodes);

    let mut edges = Vec::with_capacity(section.edges.len() + cross_edges.len());
    edges.extend_from_slice(&section.edges);
    edges.extend_from_slice(cross_edges);

    GraphData { nodes, edges }
}
