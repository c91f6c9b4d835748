//! In-memory graphs served when no document can be loaded.

use crate::domain::{Concept, Edge, Evidence, GraphData, Tier};
use serde::{Deserialize, Serialize};

/// Id of the placeholder concept
pub const PLACEHOLDER_ID: &str = "loading";

/// Which in-memory graph ends the loader's fallback chain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
    /// A single "loading" node
    #[default]
    Placeholder,

    /// The bundled three-concept sample graph
    Sample,
}

impl Fallback {
    /// Build the fallback graph
    #[must_use]
    pub fn graph(self) -> GraphData {
        match self {
            Fallback::Placeholder => placeholder_graph(),
            Fallback::Sample => sample_graph(),
        }
    }
}

/// A graph holding one placeholder node and no edges
#[must_use]
pub fn placeholder_graph() -> GraphData {
    GraphData::new(
        vec![
            Concept::new(PLACEHOLDER_ID, "データ読み込み中...", Tier::Core)
                .with_definition("グラフデータが読み込まれるまでお待ちください"),
        ],
        Vec::new(),
    )
}

/// The bundled sample graph
#[must_use]
pub fn sample_graph() -> GraphData {
    let mut plurality = Concept::new("plurality", "プラリティ", Tier::Core)
        .with_definition("多様性と協力を両立させる社会技術の概念");
    plurality.aliases = vec!["多様性協力".to_string(), "Plurality".to_string()];
    plurality.evidence = vec![Evidence::in_section(
        "プラリティは、多様性と協力という一見矛盾する要素を技術によって両立させることを目指す概念です。",
        "第1章",
    )];

    let mut democracy = Concept::new("digital_democracy", "デジタル民主主義", Tier::Supplementary)
        .with_definition("デジタル技術を活用した民主的意思決定の仕組み");
    democracy.aliases = vec!["電子民主主義".to_string(), "Digital Democracy".to_string()];
    democracy.evidence = vec![Evidence::in_section(
        "デジタル民主主義は、インターネットやAIを活用して、より多くの人々が政治プロセスに参加できる仕組みを作ります。",
        "第2章",
    )];

    let mut voting = Concept::new("quadratic_voting", "二次投票", Tier::Advanced)
        .with_definition("投票コストが票数の二乗に比例する投票制度");
    voting.aliases = vec!["QV".to_string(), "Quadratic Voting".to_string()];
    voting.evidence = vec![Evidence::in_section(
        "二次投票では、より多くの票を投じるほどコストが二次関数的に増加し、強い選好を持つ意見により大きな重みを与えます。",
        "第3章",
    )];

    let mut part_of = Edge::new("digital_democracy", "plurality", 0.9);
    part_of.legacy_type = Some("part_of".to_string());
    part_of.evidence = vec![Evidence::new(
        "デジタル民主主義は、プラリティの実現手段の一つとして重要な役割を果たします。",
    )];

    let mut example_of = Edge::new("quadratic_voting", "digital_democracy", 0.8);
    example_of.legacy_type = Some("example_of".to_string());
    example_of.evidence = vec![Evidence::new(
        "二次投票は、デジタル民主主義の具体的な実装例として注目されています。",
    )];

    GraphData::new(vec![plurality, democracy, voting], vec![part_of, example_of])
}
