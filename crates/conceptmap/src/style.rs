//! Presentation lookups kept out of the data model.

use crate::domain::{Concept, Edge, Tier};
use std::cmp::Ordering;

/// How a tier is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierStyle {
    /// Node radius in pixels
    pub radius: u32,

    /// Fill colour as a hex string
    pub color: &'static str,

    /// Human-readable tier name
    pub label: &'static str,
}

const CORE: TierStyle = TierStyle {
    radius: 12,
    color: "#2563eb",
    label: "Core",
};

const SUPPLEMENTARY: TierStyle = TierStyle {
    radius: 10,
    color: "#16a34a",
    label: "Supplementary",
};

const ADVANCED: TierStyle = TierStyle {
    radius: 8,
    color: "#9333ea",
    label: "Advanced",
};

const EXTERNAL: TierStyle = TierStyle {
    radius: 10,
    color: "#64748b",
    label: "Other section",
};

/// Look up the style of a tier
#[must_use]
pub const fn tier_style(tier: Tier) -> TierStyle {
    match tier {
        Tier::Core => CORE,
        Tier::Supplementary => SUPPLEMENTARY,
        Tier::Advanced => ADVANCED,
        Tier::External => EXTERNAL,
    }
}

/// Sentence describing `edge` as seen from `concept`.
///
/// Uses the edge's own description when present, otherwise
/// `"<concept> <relation> <related>."`.
#[must_use]
pub fn describe_relation(concept: &Concept, related_label: &str, edge: &Edge) -> String {
    if let Some(description) = edge.relation_description.as_deref() {
        return description.to_string();
    }
    let relation = edge.short_label().unwrap_or("relates to");
    format!("{} {} {}.", concept.label, relation, related_label)
}

/// Ordering for concept lists: core concepts first, then by label
#[must_use]
pub fn concept_order(a: &Concept, b: &Concept) -> Ordering {
    let rank = |c: &Concept| u8::from(c.tier != Tier::Core);
    rank(a).cmp(&rank(b)).then_with(|| a.label.cmp(&b.label))
}

/// Sort a concept list in place with [`concept_order`]
pub fn concept_sort(concepts: &mut [&Concept]) {
    concepts.sort_by(|a, b| concept_order(a, b));
}
