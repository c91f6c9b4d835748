//! Cross-chapter link records.

use serde::{Deserialize, Serialize};

/// A recorded relation between concepts in different sections.
///
/// This is read-only reference data: virtual nodes and edges are derived
/// from it but it is never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossChapterLink {
    /// Bare id of the section holding the source concept
    pub source_section: String,

    /// Source concept, by label or id
    pub source_concept: String,

    /// Bare id of the section holding the target concept
    pub target_section: String,

    /// Target concept, by label or id
    pub target_concept: String,

    /// Short relation label
    pub relation: String,

    /// Full sentence describing the relation
    pub relation_description: String,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// Link pattern number (optional)
    #[serde(
        default,
        deserialize_with = "super::lenient_pattern",
        skip_serializing_if = "Option::is_none"
    )]
    pub pattern: Option<u32>,
}

/// Summary block of the cross-chapter link document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkSummary {
    /// Number of links in the document
    #[serde(default)]
    pub total_links: usize,

    /// Concepts that bridge many sections
    #[serde(default)]
    pub key_bridge_concepts: Vec<String>,

    /// Free-form notes about the link network
    #[serde(default)]
    pub network_insights: String,
}

/// The cross-chapter link document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossChapterLinksData {
    /// All link records
    #[serde(default)]
    pub cross_chapter_links: Vec<CrossChapterLink>,

    /// Document summary
    #[serde(default)]
    pub summary: LinkSummary,
}

impl CrossChapterLinksData {
    /// Whether the document holds no links
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cross_chapter_links.is_empty()
    }
}

/// Links touching one concept, split by direction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConceptLinks<'a> {
    /// Links whose source concept is the queried concept
    pub outgoing: Vec<&'a CrossChapterLink>,

    /// Links whose target concept is the queried concept
    pub incoming: Vec<&'a CrossChapterLink>,
}
