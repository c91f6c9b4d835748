//! Integration tests for cross-chapter reference synthesis and assembly.

use conceptmap::assembler::assemble;
use conceptmap::domain::{Concept, GraphData, Tier};
use conceptmap::linker::{external_node_id, synthesize};
use proptest::prelude::*;
use std::collections::HashSet;

mod common;
use common::{concept, link, section_graph};

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_outgoing_and_incoming_links_bridge_to_placeholders() {
    let section = section_graph(&["plurality", "voting"]);
    let links = vec![
        link(("3-0", "plurality"), ("5-6", "quadratic")),
        link(("2-0", "gap"), ("3-0", "voting")),
        link(("4-0", "unrelated"), ("5-0", "other")),
    ];

    let additions = synthesize(&links, "sec3-0", &section.nodes);
    let graph = assemble(&section, &additions.virtual_nodes, &additions.cross_edges);

    let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["plurality", "voting", "external_5-6_quadratic", "external_2-0_gap"]
    );

    let endpoints: Vec<_> = graph
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(
        endpoints,
        vec![
            ("plurality", "external_5-6_quadratic"),
            ("external_2-0_gap", "voting"),
        ]
    );
    assert!(graph.edges.iter().all(|e| e.is_cross_chapter()));
}

#[test]
fn test_placeholders_carry_their_home_section() {
    let section = section_graph(&["plurality"]);
    let links = vec![link(("3-0", "plurality"), ("5-6", "quadratic"))];

    let additions = synthesize(&links, "3-0", &section.nodes);

    let placeholder = &additions.virtual_nodes[0];
    assert_eq!(placeholder.tier, Tier::External);
    assert_eq!(placeholder.label, "quadratic");
    let reference = placeholder.external_reference.as_ref().unwrap();
    assert_eq!(reference.section, "5-6");
    assert_eq!(reference.original_concept, "quadratic");
    assert!((reference.confidence - 0.75).abs() < f64::EPSILON);
}

#[test]
fn test_links_to_the_same_remote_concept_share_one_placeholder() {
    let section = section_graph(&["a", "b"]);
    let links = vec![
        link(("3-0", "a"), ("5-6", "shared")),
        link(("3-0", "b"), ("5-6", "shared")),
    ];

    let additions = synthesize(&links, "sec3-0", &section.nodes);

    assert_eq!(additions.virtual_nodes.len(), 1);
    assert_eq!(additions.cross_edges.len(), 2);
}

#[test]
fn test_local_concept_found_by_label() {
    let section = GraphData::new(vec![Concept::new("qv", "Quadratic Voting", Tier::Core)], vec![]);
    let links = vec![link(("3-0", "Quadratic Voting"), ("1-0", "Plurality"))];

    let additions = synthesize(&links, "sec3-0", &section.nodes);

    assert_eq!(additions.cross_edges[0].source, "qv");
    assert_eq!(additions.cross_edges[0].target, external_node_id("1-0", "Plurality"));
}

#[test]
fn test_unknown_local_concept_keeps_placeholder_without_edge() {
    let section = section_graph(&["a"]);
    let links = vec![link(("3-0", "missing"), ("5-6", "x"))];

    let additions = synthesize(&links, "sec3-0", &section.nodes);

    assert_eq!(additions.virtual_nodes.len(), 1);
    assert!(additions.cross_edges.is_empty());
}

#[test]
fn test_existing_placeholder_is_not_duplicated() {
    let mut section = section_graph(&["a"]);
    section.nodes.push(Concept::new(external_node_id("5-6", "x"), "x", Tier::External));
    let links = vec![link(("3-0", "a"), ("5-6", "x"))];

    let additions = synthesize(&links, "sec3-0", &section.nodes);

    assert!(additions.virtual_nodes.is_empty());
    assert_eq!(additions.cross_edges.len(), 1);
}

// ============================================================================
// Property Tests
// ============================================================================

const SECTIONS: [&str; 3] = ["1-0", "2-0", "3-0"];
const CONCEPTS: [&str; 4] = ["a", "b", "c", "d"];

fn arb_link() -> impl Strategy<Value = conceptmap::domain::CrossChapterLink> {
    (0..SECTIONS.len(), 0..CONCEPTS.len(), 0..SECTIONS.len(), 0..CONCEPTS.len()).prop_map(
        |(fs, fc, ts, tc)| link((SECTIONS[fs], CONCEPTS[fc]), (SECTIONS[ts], CONCEPTS[tc])),
    )
}

fn arb_section() -> impl Strategy<Value = GraphData> {
    proptest::sample::subsequence(CONCEPTS.to_vec(), 0..=CONCEPTS.len())
        .prop_map(|ids| GraphData::new(ids.into_iter().map(concept).collect(), vec![]))
}

proptest! {
    #[test]
    fn prop_assembled_ids_are_unique(
        links in proptest::collection::vec(arb_link(), 0..20),
        section in arb_section(),
    ) {
        let additions = synthesize(&links, "sec3-0", &section.nodes);
        let graph = assemble(&section, &additions.virtual_nodes, &additions.cross_edges);
        prop_assert!(graph.has_unique_ids());
    }

    #[test]
    fn prop_cross_edges_resolve(
        links in proptest::collection::vec(arb_link(), 0..20),
        section in arb_section(),
    ) {
        let additions = synthesize(&links, "sec3-0", &section.nodes);
        let graph = assemble(&section, &additions.virtual_nodes, &additions.cross_edges);
        let ids: HashSet<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        for edge in &graph.edges {
            prop_assert!(ids.contains(edge.source.as_str()));
            prop_assert!(ids.contains(edge.target.as_str()));
        }
    }

    #[test]
    fn prop_relinking_adds_no_placeholders(
        links in proptest::collection::vec(arb_link(), 0..20),
        section in arb_section(),
    ) {
        let first = synthesize(&links, "sec3-0", &section.nodes);
        let assembled = assemble(&section, &first.virtual_nodes, &first.cross_edges);

        let second = synthesize(&links, "sec3-0", &assembled.nodes);
        prop_assert!(second.virtual_nodes.is_empty());
        prop_assert!(second.cross_edges.len() >= first.cross_edges.len());
    }
}
