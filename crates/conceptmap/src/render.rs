//! Resolved, queryable form of an assembled graph.
//!
//! [`GraphData`] references concepts by id. Before display those references
//! are resolved once into a `petgraph` directed graph; edges naming an id that
//! is not a node are dropped here and counted, never passed on.
//!
//! # Graph Representation
//!
//! Nodes carry the [`Concept`], edges carry the [`Edge`]. Edge direction is
//! the document's `source -> target`.

use crate::domain::{Concept, Edge, GraphData};
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Which way an edge points relative to the concept being inspected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationDirection {
    /// The concept is the edge's source
    Outgoing,

    /// The concept is the edge's target
    Incoming,
}

/// An edge incident to a concept, with the concept on its other end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relation<'a> {
    /// The edge
    pub edge: &'a Edge,

    /// The concept on the other end
    pub neighbour: &'a Concept,

    /// Direction relative to the inspected concept
    pub direction: RelationDirection,
}

/// A graph with every edge endpoint resolved to a node
#[derive(Debug, Clone, Default)]
pub struct RenderGraph {
    graph: DiGraph<Concept, Edge>,
    node_map: HashMap<String, NodeIndex>,
    unresolved: usize,
    duplicate_nodes: usize,
}

impl RenderGraph {
    /// Resolve `data` into a render graph.
    ///
    /// The first node with a given id wins; later duplicates are skipped and
    /// counted. Edges with an endpoint that does not resolve are dropped and
    /// counted in [`unresolved`](Self::unresolved).
    #[must_use]
    pub fn resolve(data: &GraphData) -> Self {
        let mut graph = DiGraph::with_capacity(data.nodes.len(), data.edges.len());
        let mut node_map = HashMap::with_capacity(data.nodes.len());
        let mut duplicate_nodes = 0;

        for concept in &data.nodes {
            if node_map.contains_key(&concept.id) {
                duplicate_nodes += 1;
                continue;
            }
            let index = graph.add_node(concept.clone());
            node_map.insert(concept.id.clone(), index);
        }

        let mut unresolved = 0;
        for edge in &data.edges {
            match (node_map.get(&edge.source), node_map.get(&edge.target)) {
                (Some(&source), Some(&target)) => {
                    graph.add_edge(source, target, edge.clone());
                }
                _ => {
                    debug!(source = %edge.source, target = %edge.target, "Dropping edge with unresolved endpoint");
                    unresolved += 1;
                }
            }
        }

        if unresolved > 0 || duplicate_nodes > 0 {
            warn!(unresolved, duplicate_nodes, "Graph has referential gaps");
        }

        Self {
            graph,
            node_map,
            unresolved,
            duplicate_nodes,
        }
    }

    /// Number of resolved concepts
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of resolved edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of edges dropped because an endpoint did not resolve
    #[must_use]
    pub fn unresolved(&self) -> usize {
        self.unresolved
    }

    /// Number of nodes skipped because their id was already taken
    #[must_use]
    pub fn duplicate_nodes(&self) -> usize {
        self.duplicate_nodes
    }

    /// Look up a concept by id
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Concept> {
        self.node_map.get(id).map(|&index| &self.graph[index])
    }

    /// Resolved concepts in document order
    pub fn nodes(&self) -> impl Iterator<Item = &Concept> {
        self.graph.node_weights()
    }

    /// Resolved edges in document order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_weights()
    }

    /// Edges incident to the concept `id`, in document order.
    ///
    /// A self-loop is reported once, as outgoing. Unknown ids yield nothing.
    #[must_use]
    pub fn relations(&self, id: &str) -> Vec<Relation<'_>> {
        let Some(&index) = self.node_map.get(id) else {
            return Vec::new();
        };

        let mut incident: Vec<(EdgeIndex, NodeIndex, RelationDirection)> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .map(|e| (e.id(), e.target(), RelationDirection::Outgoing))
            .chain(
                self.graph
                    .edges_directed(index, Direction::Incoming)
                    .filter(|e| e.source() != index)
                    .map(|e| (e.id(), e.source(), RelationDirection::Incoming)),
            )
            .collect();
        incident.sort_by_key(|(edge, _, _)| *edge);

        incident
            .into_iter()
            .map(|(edge, neighbour, direction)| Relation {
                edge: &self.graph[edge],
                neighbour: &self.graph[neighbour],
                direction,
            })
            .collect()
    }
}
