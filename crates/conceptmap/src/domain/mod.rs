//! Domain types for concept maps.
//!
//! This module contains the shared schema exchanged between the loader,
//! the cross-chapter linker and the assembler. Values are treated as
//! immutable snapshots: every transformation produces a new [`GraphData`].

mod links;

pub use links::{ConceptLinks, CrossChapterLink, CrossChapterLinksData, LinkSummary};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A quoted excerpt supporting a concept or relation.
///
/// Older documents store evidence as a bare string; both shapes deserialize
/// into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EvidenceRepr")]
pub struct Evidence {
    /// The quoted text
    pub text: String,

    /// Section the quote was taken from (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl Evidence {
    /// Create evidence with no section attribution
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            section: None,
        }
    }

    /// Create evidence attributed to a section
    pub fn in_section(text: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            section: Some(section.into()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EvidenceRepr {
    Text(String),
    Full {
        text: String,
        #[serde(default)]
        section: Option<String>,
    },
}

impl From<EvidenceRepr> for Evidence {
    fn from(repr: EvidenceRepr) -> Self {
        match repr {
            EvidenceRepr::Text(text) => Self::new(text),
            EvidenceRepr::Full { text, section } => Self { text, section },
        }
    }
}

/// Classification of a concept's importance or origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Central concept of the section
    #[default]
    Core,

    /// Supporting concept
    Supplementary,

    /// Specialist concept
    Advanced,

    /// Placeholder for a concept that lives in another section
    External,
}

impl Tier {
    /// All tiers, in display order
    pub const ALL: [Tier; 4] = [
        Tier::Core,
        Tier::Supplementary,
        Tier::Advanced,
        Tier::External,
    ];

    /// The lowercase name used in documents
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Core => "core",
            Tier::Supplementary => "supplementary",
            Tier::Advanced => "advanced",
            Tier::External => "external",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pointer from a synthesized external concept back to its home section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalReference {
    /// Bare section id the concept belongs to
    pub section: String,

    /// Label of the concept in its home section
    pub original_concept: String,

    /// Confidence of the originating cross-chapter link
    pub confidence: f64,

    /// Link pattern number (optional)
    #[serde(
        default,
        deserialize_with = "lenient_pattern",
        skip_serializing_if = "Option::is_none"
    )]
    pub pattern: Option<u32>,
}

/// Read a link pattern number.
///
/// Link documents are generated and sometimes carry the pattern as a string
/// (`"2"`) or as free text. A number or numeric string is kept; anything else
/// reads as `None` instead of rejecting the whole document.
pub(crate) fn lenient_pattern<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// A node representing one idea extracted from the source text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    /// Identifier, unique within one assembled graph
    pub id: String,

    /// Display label
    pub label: String,

    /// Definition text
    #[serde(default)]
    pub definition: String,

    /// Importance or origin tier
    #[serde(default)]
    pub tier: Tier,

    /// Alternative names, in document order
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Supporting quotes
    #[serde(default)]
    pub evidence: Vec<Evidence>,

    /// Home section reference; present exactly when `tier` is external
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<ExternalReference>,

    /// Id before collision renaming in a merged document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_id: Option<String>,

    /// Section this concept was merged from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_section: Option<String>,
}

impl Concept {
    /// Create a concept with the given id, label and tier and no other data
    pub fn new(id: impl Into<String>, label: impl Into<String>, tier: Tier) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            definition: String::new(),
            tier,
            aliases: Vec::new(),
            evidence: Vec::new(),
            external_reference: None,
            original_id: None,
            source_section: None,
        }
    }

    /// Create an external placeholder concept.
    ///
    /// The tier is always [`Tier::External`] and the reference is always set.
    pub fn external(
        id: impl Into<String>,
        label: impl Into<String>,
        definition: impl Into<String>,
        reference: ExternalReference,
    ) -> Self {
        Self {
            definition: definition.into(),
            external_reference: Some(reference),
            ..Self::new(id, label, Tier::External)
        }
    }

    /// Builder-style setter for the definition
    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    /// Whether this concept was synthesized for another section
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.tier == Tier::External
    }

    /// Whether `key` names this concept by label or by id
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.label == key || self.id == key
    }
}

/// A relation between two concepts, referenced by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Id of the source concept
    pub source: String,

    /// Id of the target concept
    pub target: String,

    /// Legacy relation label
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub legacy_type: Option<String>,

    /// Short relation label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,

    /// Full sentence describing the relation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_description: Option<String>,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// Supporting quotes
    #[serde(default)]
    pub evidence: Vec<Evidence>,

    /// Set on edges bridging to an external concept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_chapter: Option<bool>,

    /// Section on the non-local side of a cross-chapter edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_section: Option<String>,

    /// Section this edge was merged from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_section: Option<String>,
}

impl Edge {
    /// Create an edge with the given endpoints and confidence and no other data
    pub fn new(source: impl Into<String>, target: impl Into<String>, confidence: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            legacy_type: None,
            relation: None,
            relation_description: None,
            confidence,
            evidence: Vec::new(),
            cross_chapter: None,
            target_section: None,
            source_section: None,
        }
    }

    /// Whether this edge bridges to a concept in another section
    #[must_use]
    pub fn is_cross_chapter(&self) -> bool {
        self.cross_chapter == Some(true)
    }

    /// Short label: `relation`, falling back to the legacy `type`
    #[must_use]
    pub fn short_label(&self) -> Option<&str> {
        self.relation.as_deref().or(self.legacy_type.as_deref())
    }

    /// Text shown for this edge: the full description, then the short label
    #[must_use]
    pub fn display_text(&self) -> Option<&str> {
        self.relation_description
            .as_deref()
            .or_else(|| self.short_label())
    }
}

/// The unit exchanged between every component boundary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    /// Concepts
    #[serde(default)]
    pub nodes: Vec<Concept>,

    /// Relations
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphData {
    /// Create a graph from its parts
    #[must_use]
    pub fn new(nodes: Vec<Concept>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Find a concept by id
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Concept> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Find the first concept whose label or id equals `key`
    #[must_use]
    pub fn find_concept(&self, key: &str) -> Option<&Concept> {
        self.nodes.iter().find(|n| n.matches(key))
    }

    /// Whether every node id occurs once
    #[must_use]
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        self.nodes.iter().all(|n| seen.insert(n.id.as_str()))
    }

    /// Whether the graph has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_evidence_accepts_bare_string() {
        let evidence: Vec<Evidence> =
            serde_json::from_str(r#"["plain quote", {"text": "full", "section": "3-0"}]"#)
                .unwrap();

        assert_eq!(evidence[0], Evidence::new("plain quote"));
        assert_eq!(evidence[1], Evidence::in_section("full", "3-0"));
    }

    #[test]
    fn test_concept_defaults_optional_fields() {
        let concept: Concept = serde_json::from_str(r#"{"id": "a", "label": "A"}"#).unwrap();

        assert_eq!(concept.tier, Tier::Core);
        assert!(concept.definition.is_empty());
        assert!(concept.aliases.is_empty());
        assert!(concept.external_reference.is_none());
    }

    #[test]
    fn test_edge_reads_legacy_type_field() {
        let edge: Edge = serde_json::from_str(
            r#"{"source": "a", "target": "b", "type": "part_of", "confidence": 0.9}"#,
        )
        .unwrap();

        assert_eq!(edge.legacy_type.as_deref(), Some("part_of"));
        assert_eq!(edge.short_label(), Some("part_of"));
        assert!(!edge.is_cross_chapter());

        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["type"], "part_of");
        assert!(json.get("cross_chapter").is_none());
    }

    #[test]
    fn test_display_text_prefers_description() {
        let mut edge = Edge::new("a", "b", 0.5);
        assert_eq!(edge.display_text(), None);

        edge.legacy_type = Some("legacy".to_string());
        assert_eq!(edge.display_text(), Some("legacy"));

        edge.relation = Some("uses".to_string());
        assert_eq!(edge.display_text(), Some("uses"));

        edge.relation_description = Some("A uses B".to_string());
        assert_eq!(edge.display_text(), Some("A uses B"));
    }

    #[test]
    fn test_external_constructor_sets_tier_and_reference() {
        let concept = Concept::external(
            "external_2-0_B",
            "B",
            "elsewhere",
            ExternalReference {
                section: "2-0".to_string(),
                original_concept: "B".to_string(),
                confidence: 0.8,
                pattern: None,
            },
        );

        assert!(concept.is_external());
        assert_eq!(concept.external_reference.unwrap().section, "2-0");
    }

    #[rstest]
    #[case::number(r#"3"#, Some(3))]
    #[case::numeric_string(r#""2""#, Some(2))]
    #[case::free_text(r#""上記パターン1-5のどれに該当するか""#, None)]
    #[case::negative(r#"-1"#, None)]
    #[case::null(r#"null"#, None)]
    fn test_external_reference_pattern_is_lenient(
        #[case] pattern: &str,
        #[case] expected: Option<u32>,
    ) {
        let json = format!(
            r#"{{"section": "2-0", "original_concept": "B", "confidence": 0.8, "pattern": {pattern}}}"#
        );
        let reference: ExternalReference = serde_json::from_str(&json).unwrap();
        assert_eq!(reference.pattern, expected);
    }

    #[test]
    fn test_links_document_keeps_links_next_to_string_pattern() {
        let json = r#"{
            "cross_chapter_links": [
                {"source_section": "1-0", "source_concept": "A", "target_section": "2-0",
                 "target_concept": "B", "relation": "extends",
                 "relation_description": "A extends B", "confidence": 0.8},
                {"source_section": "1-0", "source_concept": "A", "target_section": "3-0",
                 "target_concept": "C", "relation": "extends",
                 "relation_description": "A extends C", "confidence": 0.7,
                 "pattern": "2"}
            ]
        }"#;

        let document: CrossChapterLinksData = serde_json::from_str(json).unwrap();

        assert_eq!(document.cross_chapter_links.len(), 2);
        assert_eq!(document.cross_chapter_links[0].pattern, None);
        assert_eq!(document.cross_chapter_links[1].pattern, Some(2));
    }

    #[test]
    fn test_unique_id_check() {
        let mut graph = GraphData::new(
            vec![
                Concept::new("a", "A", Tier::Core),
                Concept::new("b", "B", Tier::Core),
            ],
            vec![],
        );
        assert!(graph.has_unique_ids());

        graph.nodes.push(Concept::new("a", "A again", Tier::Advanced));
        assert!(!graph.has_unique_ids());
    }

    #[test]
    fn test_tier_names_round_trip_through_serde() {
        for tier in Tier::ALL {
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{}\"", tier.as_str()));
        }
    }
}
