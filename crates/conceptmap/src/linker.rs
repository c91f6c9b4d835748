//! Cross-chapter reference synthesis.
//!
//! A section's graph only holds its own concepts. Relations recorded between
//! sections are brought in as *external* placeholder concepts plus bridging
//! edges, so a reader can see where a concept leads without loading the
//! other section.
//!
//! All functions here are pure: they read the link list and the section's
//! nodes and return new values.

use crate::domain::{
    Concept, ConceptLinks, CrossChapterLink, Edge, Evidence, ExternalReference,
};
use std::collections::HashSet;
use tracing::debug;

/// Prefix carried by section keys but not by link records
pub const SECTION_KEY_PREFIX: &str = "sec";

/// Virtual nodes and bridging edges for one section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossChapterAdditions {
    /// External placeholder concepts, in link order
    pub virtual_nodes: Vec<Concept>,

    /// Edges between section concepts and placeholders, in link order
    pub cross_edges: Vec<Edge>,
}

impl CrossChapterAdditions {
    /// Whether nothing was synthesized
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.virtual_nodes.is_empty() && self.cross_edges.is_empty()
    }
}

/// Strip the optional `sec` prefix from a section key.
///
/// ```
/// use conceptmap::linker::normalize_section;
///
/// assert_eq!(normalize_section("sec3-0"), "3-0");
/// assert_eq!(normalize_section("3-0"), "3-0");
/// ```
#[must_use]
pub fn normalize_section(key: &str) -> &str {
    key.strip_prefix(SECTION_KEY_PREFIX).unwrap_or(key)
}

/// Key used to load the section a bare section id refers to.
///
/// ```
/// assert_eq!(conceptmap::linker::section_key("2-1"), "sec2-1");
/// ```
#[must_use]
pub fn section_key(section: &str) -> String {
    format!("{SECTION_KEY_PREFIX}{}", normalize_section(section))
}

/// Id of the placeholder for `concept` in `section`
#[must_use]
pub fn external_node_id(section: &str, concept: &str) -> String {
    format!("external_{section}_{concept}")
}

/// Links whose source concept lives in `section` (bare id)
pub fn outgoing_links<'a>(
    links: &'a [CrossChapterLink],
    section: &'a str,
) -> impl Iterator<Item = &'a CrossChapterLink> + 'a {
    links.iter().filter(move |l| l.source_section == section)
}

/// Links whose target concept lives in `section` (bare id)
pub fn incoming_links<'a>(
    links: &'a [CrossChapterLink],
    section: &'a str,
) -> impl Iterator<Item = &'a CrossChapterLink> + 'a {
    links.iter().filter(move |l| l.target_section == section)
}

/// Links that start or end at the concept with the given label
#[must_use]
pub fn concept_links<'a>(links: &'a [CrossChapterLink], label: &str) -> ConceptLinks<'a> {
    ConceptLinks {
        outgoing: links.iter().filter(|l| l.source_concept == label).collect(),
        incoming: links.iter().filter(|l| l.target_concept == label).collect(),
    }
}

/// Which end of a link is local to the section being assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Outgoing,
    Incoming,
}

/// Synthesize external nodes and bridging edges for a section.
///
/// For each link leaving the section a placeholder is made for the link's
/// target, and an edge is drawn from the local source concept to it. Links
/// entering the section are handled symmetrically. A `(section, concept)`
/// pair yields at most one placeholder per call, and never one whose id is
/// already in `existing_nodes`. When the local concept cannot be found by
/// label or id, the placeholder is still created but the edge is dropped.
#[must_use]
pub fn synthesize(
    links: &[CrossChapterLink],
    section_key: &str,
    existing_nodes: &[Concept],
) -> CrossChapterAdditions {
    let section = normalize_section(section_key);
    debug!(
        section = %section,
        total_links = links.len(),
        existing_nodes = existing_nodes.len(),
        "Synthesizing cross-chapter references"
    );

    let mut seen: HashSet<String> = existing_nodes.iter().map(|n| n.id.clone()).collect();
    let mut additions = CrossChapterAdditions::default();

    let outgoing: Vec<_> = outgoing_links(links, section).collect();
    debug!(section = %section, count = outgoing.len(), "Outgoing cross-chapter links");
    for link in outgoing {
        bridge(link, Direction::Outgoing, existing_nodes, &mut seen, &mut additions);
    }

    let incoming: Vec<_> = incoming_links(links, section).collect();
    debug!(section = %section, count = incoming.len(), "Incoming cross-chapter links");
    for link in incoming {
        bridge(link, Direction::Incoming, existing_nodes, &mut seen, &mut additions);
    }

    additions
}

fn bridge(
    link: &CrossChapterLink,
    direction: Direction,
    existing_nodes: &[Concept],
    seen: &mut HashSet<String>,
    additions: &mut CrossChapterAdditions,
) {
    let (remote_section, remote_concept, local_concept) = match direction {
        Direction::Outgoing => (&link.target_section, &link.target_concept, &link.source_concept),
        Direction::Incoming => (&link.source_section, &link.source_concept, &link.target_concept),
    };

    let virtual_id = external_node_id(remote_section, remote_concept);
    if seen.insert(virtual_id.clone()) {
        additions
            .virtual_nodes
            .push(external_concept(&virtual_id, link, remote_section, remote_concept));
    }

    let Some(local) = existing_nodes.iter().find(|n| n.matches(local_concept)) else {
        debug!(
            concept = %local_concept,
            virtual_id = %virtual_id,
            "No local concept for cross-chapter link, edge skipped"
        );
        return;
    };

    let (source, target) = match direction {
        Direction::Outgoing => (local.id.clone(), virtual_id),
        Direction::Incoming => (virtual_id, local.id.clone()),
    };

    let mut edge = Edge::new(source, target, link.confidence);
    edge.relation = Some(link.relation.clone());
    edge.relation_description = Some(link.relation_description.clone());
    edge.evidence = vec![Evidence::new(format!(
        "Cross-chapter link: {} → {}",
        link.source_section, link.target_section
    ))];
    edge.cross_chapter = Some(true);
    edge.target_section = Some(remote_section.clone());
    additions.cross_edges.push(edge);
}

fn external_concept(
    id: &str,
    link: &CrossChapterLink,
    section: &str,
    concept: &str,
) -> Concept {
    Concept::external(
        id,
        concept,
        format!(
            "Concept from another section ({section}): {}",
            link.relation_description
        ),
        ExternalReference {
            section: section.to_string(),
            original_concept: concept.to_string(),
            confidence: link.confidence,
            pattern: link.pattern,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tier;
    use rstest::rstest;

    fn link(src_sec: &str, src: &str, tgt_sec: &str, tgt: &str) -> CrossChapterLink {
        CrossChapterLink {
            source_section: src_sec.to_string(),
            source_concept: src.to_string(),
            target_section: tgt_sec.to_string(),
            target_concept: tgt.to_string(),
            relation: "uses".to_string(),
            relation_description: format!("{src} uses {tgt}"),
            confidence: 0.8,
            pattern: Some(2),
        }
    }

    #[rstest]
    #[case("sec3-0", "3-0")]
    #[case("3-0", "3-0")]
    #[case("", "")]
    fn test_normalize_strips_prefix(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(normalize_section(key), expected);
    }

    #[test]
    fn test_outgoing_link_creates_node_and_edge() {
        let links = vec![link("1-0", "A", "2-0", "B")];
        let nodes = vec![Concept::new("A", "A", Tier::Core)];

        let additions = synthesize(&links, "1-0", &nodes);

        assert_eq!(additions.virtual_nodes.len(), 1);
        let node = &additions.virtual_nodes[0];
        assert_eq!(node.id, "external_2-0_B");
        assert_eq!(node.label, "B");
        assert_eq!(node.tier, Tier::External);
        assert_eq!(node.definition, "Concept from another section (2-0): A uses B");
        let reference = node.external_reference.as_ref().unwrap();
        assert_eq!(reference.section, "2-0");
        assert_eq!(reference.original_concept, "B");
        assert_eq!(reference.pattern, Some(2));

        assert_eq!(additions.cross_edges.len(), 1);
        let edge = &additions.cross_edges[0];
        assert_eq!(edge.source, "A");
        assert_eq!(edge.target, "external_2-0_B");
        assert_eq!(edge.relation.as_deref(), Some("uses"));
        assert_eq!(edge.target_section.as_deref(), Some("2-0"));
        assert!(edge.is_cross_chapter());
        assert_eq!(edge.evidence[0].text, "Cross-chapter link: 1-0 → 2-0");
    }

    #[test]
    fn test_incoming_link_points_at_local_concept() {
        let links = vec![link("1-0", "A", "2-0", "B")];
        let nodes = vec![Concept::new("B", "B", Tier::Core)];

        let additions = synthesize(&links, "sec2-0", &nodes);

        assert_eq!(additions.virtual_nodes.len(), 1);
        assert_eq!(additions.virtual_nodes[0].id, "external_1-0_A");
        let edge = &additions.cross_edges[0];
        assert_eq!(edge.source, "external_1-0_A");
        assert_eq!(edge.target, "B");
        assert_eq!(edge.target_section.as_deref(), Some("1-0"));
    }

    #[test]
    fn test_unmatched_anchor_keeps_node_but_drops_edge() {
        let links = vec![link("1-0", "Missing", "2-0", "B")];
        let nodes = vec![Concept::new("A", "A", Tier::Core)];

        let additions = synthesize(&links, "1-0", &nodes);

        assert_eq!(additions.virtual_nodes.len(), 1);
        assert!(additions.cross_edges.is_empty());
    }

    #[test]
    fn test_anchor_matches_by_label_or_id() {
        let links = vec![
            link("1-0", "Label A", "2-0", "B"),
            link("1-0", "c_id", "2-0", "D"),
        ];
        let nodes = vec![
            Concept::new("a_id", "Label A", Tier::Core),
            Concept::new("c_id", "Label C", Tier::Supplementary),
        ];

        let additions = synthesize(&links, "1-0", &nodes);

        let sources: Vec<_> = additions.cross_edges.iter().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, vec!["a_id", "c_id"]);
    }

    #[test]
    fn test_repeated_target_yields_one_node_and_every_edge() {
        let links = vec![
            link("1-0", "A", "2-0", "B"),
            link("1-0", "C", "2-0", "B"),
        ];
        let nodes = vec![
            Concept::new("A", "A", Tier::Core),
            Concept::new("C", "C", Tier::Core),
        ];

        let additions = synthesize(&links, "1-0", &nodes);

        assert_eq!(additions.virtual_nodes.len(), 1);
        assert_eq!(additions.cross_edges.len(), 2);
        assert!(additions.cross_edges.iter().all(|e| e.target == "external_2-0_B"));
    }

    #[test]
    fn test_dedup_spans_both_passes() {
        // 2-0:B is reached once outgoing and once incoming.
        let links = vec![
            link("1-0", "A", "2-0", "B"),
            link("2-0", "B", "1-0", "C"),
        ];
        let nodes = vec![
            Concept::new("A", "A", Tier::Core),
            Concept::new("C", "C", Tier::Core),
        ];

        let additions = synthesize(&links, "1-0", &nodes);

        assert_eq!(additions.virtual_nodes.len(), 1);
        assert_eq!(additions.virtual_nodes[0].id, "external_2-0_B");
        assert_eq!(additions.cross_edges.len(), 2);
        assert_eq!(additions.cross_edges[1].source, "external_2-0_B");
        assert_eq!(additions.cross_edges[1].target, "C");
    }

    #[test]
    fn test_existing_id_suppresses_virtual_node() {
        let links = vec![link("1-0", "A", "2-0", "B")];
        let nodes = vec![
            Concept::new("A", "A", Tier::Core),
            Concept::new("external_2-0_B", "B", Tier::Core),
        ];

        let additions = synthesize(&links, "1-0", &nodes);

        assert!(additions.virtual_nodes.is_empty());
        assert_eq!(additions.cross_edges.len(), 1);
    }

    #[test]
    fn test_unrelated_section_gets_nothing() {
        let links = vec![link("1-0", "A", "2-0", "B")];
        let additions = synthesize(&links, "sec5-5", &[]);
        assert!(additions.is_empty());
    }

    #[test]
    fn test_concept_links_split_by_direction() {
        let links = vec![
            link("1-0", "A", "2-0", "B"),
            link("3-0", "B", "1-0", "A"),
            link("4-0", "C", "2-0", "D"),
        ];

        let found = concept_links(&links, "A");
        assert_eq!(found.outgoing.len(), 1);
        assert_eq!(found.incoming.len(), 1);
        assert_eq!(found.incoming[0].source_section, "3-0");
    }

    #[test]
    fn test_section_key_adds_prefix_once() {
        assert_eq!(section_key("2-1"), "sec2-1");
        assert_eq!(section_key("sec2-1"), "sec2-1");
    }
}
