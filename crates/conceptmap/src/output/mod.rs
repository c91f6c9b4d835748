//! Output formatting for CLI commands.
//!
//! Every command prints either human-readable text or JSON. The text
//! writers are generic over [`Write`] so they can be exercised against a
//! buffer.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (tier colors, icons)

pub mod color;

use crate::app::SectionView;
use crate::domain::{Concept, CrossChapterLink, LinkSummary};
use crate::loader::GraphOrigin;
use crate::merge::{GraphIssue, MergeMetadata};
use crate::render::{RelationDirection, RenderGraph};
use crate::sections::{SectionCatalogue, SourceLinks};
use crate::style::{concept_sort, describe_relation, tier_style};
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, info, success, warning};

use color::{arrow, bold, colored_tier_icon, colorize_tier, dimmed};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `CONCEPTMAP_MAX_WIDTH`: Maximum content width (default: 80), capped
    ///   at the terminal width when stdout is a terminal
    /// - `CONCEPTMAP_ASCII`: Set to "1" or "true" for ASCII-only icons
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `CONCEPTMAP_COLOR`: Set to "0" or "false" to disable colors
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::from_vars(|name| env::var(name).ok());
        if let Some(width) = terminal_width() {
            config.max_width = config.max_width.min(width);
        }
        config
    }

    /// Build a config from a variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_width = match lookup("CONCEPTMAP_MAX_WIDTH") {
            Some(s) if !s.is_empty() => s.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    env_var = "CONCEPTMAP_MAX_WIDTH",
                    value = %s,
                    default = DEFAULT_MAX_CONTENT_WIDTH,
                    "Invalid value, using default"
                );
                DEFAULT_MAX_CONTENT_WIDTH
            }),
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = lookup("CONCEPTMAP_ASCII")
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        // https://no-color.org/
        let use_colors = lookup("NO_COLOR").is_none()
            && lookup("CONCEPTMAP_COLOR")
                .is_none_or(|v| v != "0" && !v.eq_ignore_ascii_case("false"));

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

// ============================================================================
// Terminal Width Detection
// ============================================================================

/// Width of the attached terminal, if stdout is one.
fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| usize::from(w.0))
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Lookups shared by the section and concept views
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    /// Section titles
    pub catalogue: &'a SectionCatalogue,
    /// Where the source text lives
    pub source_links: &'a SourceLinks,
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print an assembled section
pub fn print_section(
    section: Option<&str>,
    view: &SectionView,
    context: ViewContext<'_>,
    mode: OutputMode,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => {
            write_section_text(&mut handle, view, context, &OutputConfig::from_env())
        }
        OutputMode::Json => write_json(&mut handle, &section_json(section, view)),
    }
}

/// Print one concept of an assembled section with its relations
pub fn print_concept(
    view: &SectionView,
    concept: &Concept,
    context: ViewContext<'_>,
    mode: OutputMode,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_concept_text(
            &mut handle,
            view,
            concept,
            context,
            &OutputConfig::from_env(),
        ),
        OutputMode::Json => write_json(&mut handle, &concept_json(view, concept, context)),
    }
}

/// Print cross-chapter links
pub fn print_links(
    links: &[&CrossChapterLink],
    summary: &LinkSummary,
    mode: OutputMode,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => {
            write_links_text(&mut handle, links, summary, &OutputConfig::from_env())
        }
        OutputMode::Json => write_json(
            &mut handle,
            &serde_json::json!({ "links": links, "summary": summary }),
        ),
    }
}

/// Print the section catalogue
pub fn print_sections(catalogue: &SectionCatalogue, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_sections_text(&mut handle, catalogue, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, &catalogue.entries()),
    }
}

/// Print the outcome of a merge
pub fn print_merge_report(
    output: &str,
    metadata: &MergeMetadata,
    issues: &[GraphIssue],
    mode: OutputMode,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => {
            write_merge_text(&mut handle, output, metadata, issues, &OutputConfig::from_env())
        }
        OutputMode::Json => write_json(
            &mut handle,
            &serde_json::json!({ "output": output, "metadata": metadata, "issues": issues }),
        ),
    }
}

/// Print validation issues for a document
pub fn print_issues(document: &str, issues: &[GraphIssue], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => {
            write_issues_text(&mut handle, document, issues, &OutputConfig::from_env())
        }
        OutputMode::Json => write_json(
            &mut handle,
            &serde_json::json!({
                "document": document,
                "valid": issues.is_empty(),
                "issues": issues,
            }),
        ),
    }
}

/// Print a simple message
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{msg}")
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

// ============================================================================
// JSON Shapes
// ============================================================================

#[derive(Serialize)]
struct SectionJson<'a> {
    section: Option<&'a str>,
    origin: String,
    warnings: Vec<String>,
    virtual_nodes: usize,
    cross_edges: usize,
    #[serde(flatten)]
    graph: &'a crate::domain::GraphData,
}

fn section_json<'a>(section: Option<&'a str>, view: &'a SectionView) -> SectionJson<'a> {
    SectionJson {
        section,
        origin: origin_text(&view.origin),
        warnings: view.warnings.iter().map(ToString::to_string).collect(),
        virtual_nodes: view.virtual_nodes,
        cross_edges: view.cross_edges,
        graph: &view.graph,
    }
}

#[derive(Serialize)]
struct RelationJson {
    direction: &'static str,
    neighbour: String,
    description: String,
    cross_chapter: bool,
}

#[derive(Serialize)]
struct ConceptJson<'a> {
    concept: &'a Concept,
    relations: Vec<RelationJson>,
    source_urls: Vec<String>,
}

fn concept_json<'a>(
    view: &'a SectionView,
    concept: &'a Concept,
    context: ViewContext<'_>,
) -> ConceptJson<'a> {
    let graph = RenderGraph::resolve(&view.graph);
    let relations = graph
        .relations(&concept.id)
        .into_iter()
        .map(|relation| RelationJson {
            direction: match relation.direction {
                RelationDirection::Outgoing => "outgoing",
                RelationDirection::Incoming => "incoming",
            },
            neighbour: relation.neighbour.id.clone(),
            description: describe_relation(concept, &relation.neighbour.label, relation.edge),
            cross_chapter: relation.edge.is_cross_chapter(),
        })
        .collect();

    ConceptJson {
        concept,
        relations,
        source_urls: evidence_urls(concept, context),
    }
}

fn evidence_urls(concept: &Concept, context: ViewContext<'_>) -> Vec<String> {
    concept
        .evidence
        .iter()
        .filter_map(|evidence| {
            let section = evidence
                .section
                .as_deref()
                .or(concept.source_section.as_deref())?;
            Some(context.source_links.source_url(section, Some(evidence)))
        })
        .collect()
}

// ============================================================================
// Text Formatting
// ============================================================================

fn origin_text(origin: &GraphOrigin) -> String {
    match origin {
        GraphOrigin::Requested(section) => format!("section {section}"),
        GraphOrigin::DefaultSection(section) => format!("default section {section}"),
        GraphOrigin::Merged => "merged graph".to_string(),
        GraphOrigin::Fallback => "fallback graph".to_string(),
    }
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width.max(1))
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}

fn write_section_text<W: Write>(
    w: &mut W,
    view: &SectionView,
    context: ViewContext<'_>,
    config: &OutputConfig,
) -> io::Result<()> {
    let title = match view.origin.section() {
        Some(section) => context.catalogue.label(section),
        None => origin_text(&view.origin),
    };
    writeln!(
        w,
        "{}  {}",
        bold(&title, config),
        dimmed(&format!("({})", origin_text(&view.origin)), config)
    )?;

    for load_warning in &view.warnings {
        writeln!(w, "  {} {}", warning("!", config), load_warning)?;
    }

    let graph = RenderGraph::resolve(&view.graph);
    writeln!(
        w,
        "{} concepts ({} from other sections), {} relations",
        graph.node_count(),
        view.virtual_nodes,
        graph.edge_count()
    )?;

    let mut concepts: Vec<&Concept> = graph.nodes().collect();
    concept_sort(&mut concepts);

    if !concepts.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}:", bold("Concepts", config))?;
    }
    for concept in concepts {
        writeln!(
            w,
            "  {} {} {}",
            colored_tier_icon(concept.tier, config),
            colorize_tier(&concept.label, concept.tier, config),
            dimmed(&format!("[{}]", concept.id), config)
        )?;
        for line in wrap_text(&concept.definition, config.max_width.saturating_sub(6)) {
            writeln!(w, "      {line}")?;
        }
    }

    if graph.edge_count() > 0 {
        writeln!(w)?;
        writeln!(w, "{}:", bold("Relations", config))?;
    }
    for edge in graph.edges() {
        let label = |id: &str| {
            graph
                .node(id)
                .map_or_else(|| id.to_string(), |c| c.label.clone())
        };
        let mut line = format!(
            "  {} {} {}",
            label(&edge.source),
            arrow(true, config),
            label(&edge.target)
        );
        if let Some(text) = edge.display_text() {
            line.push_str(&format!(": {text}"));
        }
        if edge.is_cross_chapter()
            && let Some(section) = edge.target_section.as_deref()
        {
            let home = format!("  ({})", context.catalogue.label(section));
            line.push_str(&dimmed(&home, config));
        }
        writeln!(w, "{line}")?;
    }

    if graph.unresolved() > 0 {
        writeln!(w)?;
        writeln!(
            w,
            "{}",
            warning(
                &format!("{} relation(s) skipped: endpoint not in graph", graph.unresolved()),
                config
            )
        )?;
    }

    Ok(())
}

fn write_concept_text<W: Write>(
    w: &mut W,
    view: &SectionView,
    concept: &Concept,
    context: ViewContext<'_>,
    config: &OutputConfig,
) -> io::Result<()> {
    let width = config.max_width.saturating_sub(2);

    writeln!(
        w,
        "{} {} {}",
        colored_tier_icon(concept.tier, config),
        colorize_tier(&concept.label, concept.tier, config),
        dimmed(&format!("[{}]", concept.id), config)
    )?;
    writeln!(w, "{} {}", dimmed("Tier:", config), tier_style(concept.tier).label)?;

    if !concept.aliases.is_empty() {
        writeln!(w, "{} {}", dimmed("Aliases:", config), concept.aliases.join(", "))?;
    }

    if let Some(reference) = &concept.external_reference {
        writeln!(
            w,
            "{} {} {}",
            dimmed("Home section:", config),
            context.catalogue.label(&reference.section),
            dimmed(&format!("(sec{})", reference.section), config)
        )?;
    }

    if !concept.definition.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}:", bold("Definition", config))?;
        for line in wrap_text(&concept.definition, width) {
            writeln!(w, "  {line}")?;
        }
    }

    if !concept.evidence.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}:", bold("Evidence", config))?;
        for evidence in &concept.evidence {
            for line in wrap_text(&format!("\"{}\"", evidence.text), width) {
                writeln!(w, "  {line}")?;
            }
            let section = evidence.section.as_deref().or(concept.source_section.as_deref());
            if let Some(section) = section {
                writeln!(
                    w,
                    "    {}",
                    info(&context.source_links.source_url(section, Some(evidence)), config)
                )?;
            }
        }
    }

    let graph = RenderGraph::resolve(&view.graph);
    let relations = graph.relations(&concept.id);
    if !relations.is_empty() {
        writeln!(w)?;
        writeln!(w, "{} ({}):", bold("Relations", config), relations.len())?;
        for relation in relations {
            let outgoing = relation.direction == RelationDirection::Outgoing;
            let mut line = format!(
                "  {} {}",
                arrow(outgoing, config),
                describe_relation(concept, &relation.neighbour.label, relation.edge)
            );
            if relation.edge.is_cross_chapter()
                && let Some(section) = relation.edge.target_section.as_deref()
            {
                let home = format!("  ({})", context.catalogue.label(section));
                line.push_str(&dimmed(&home, config));
            }
            writeln!(w, "{line}")?;
        }
    }

    Ok(())
}

fn write_links_text<W: Write>(
    w: &mut W,
    links: &[&CrossChapterLink],
    summary: &LinkSummary,
    config: &OutputConfig,
) -> io::Result<()> {
    if links.is_empty() {
        writeln!(w, "No cross-chapter links found.")?;
        return Ok(());
    }

    writeln!(w, "Found {} cross-chapter link(s):", links.len())?;
    writeln!(w)?;
    for link in links {
        writeln!(
            w,
            "  {} {} {} {} {}  {} {}",
            info(&link.source_section, config),
            link.source_concept,
            arrow(true, config),
            info(&link.target_section, config),
            link.target_concept,
            link.relation,
            dimmed(&format!("({:.2})", link.confidence), config)
        )?;
    }

    if !summary.key_bridge_concepts.is_empty() {
        writeln!(w)?;
        writeln!(
            w,
            "{} {}",
            dimmed("Bridge concepts:", config),
            summary.key_bridge_concepts.join(", ")
        )?;
    }
    if !summary.network_insights.is_empty() {
        writeln!(w)?;
        for line in wrap_text(&summary.network_insights, config.max_width) {
            writeln!(w, "{line}")?;
        }
    }

    Ok(())
}

fn write_sections_text<W: Write>(
    w: &mut W,
    catalogue: &SectionCatalogue,
    config: &OutputConfig,
) -> io::Result<()> {
    for entry in catalogue.entries() {
        writeln!(
            w,
            "  {:<8} {}",
            info(&format!("sec{}", entry.id), config),
            entry.title
        )?;
    }
    Ok(())
}

fn write_merge_text<W: Write>(
    w: &mut W,
    output: &str,
    metadata: &MergeMetadata,
    issues: &[GraphIssue],
    config: &OutputConfig,
) -> io::Result<()> {
    let stats = &metadata.statistics;
    writeln!(
        w,
        "{} {} section(s) into {}",
        success("Merged", config),
        metadata.total_sections,
        output
    )?;
    writeln!(w, "  {} {}", dimmed("Total nodes:", config), stats.total_nodes)?;
    writeln!(w, "  {} {}", dimmed("Total edges:", config), stats.total_edges)?;
    writeln!(
        w,
        "  {} {}",
        dimmed("ID collisions resolved:", config),
        stats.id_collisions_resolved
    )?;
    if !issues.is_empty() {
        writeln!(w)?;
        write_issue_lines(w, issues, config)?;
    }
    Ok(())
}

fn write_issues_text<W: Write>(
    w: &mut W,
    document: &str,
    issues: &[GraphIssue],
    config: &OutputConfig,
) -> io::Result<()> {
    if issues.is_empty() {
        writeln!(w, "{} {document}: no issues found", success("✓", config))?;
        return Ok(());
    }
    writeln!(w, "{document}: {} issue(s)", issues.len())?;
    write_issue_lines(w, issues, config)
}

fn write_issue_lines<W: Write>(
    w: &mut W,
    issues: &[GraphIssue],
    config: &OutputConfig,
) -> io::Result<()> {
    for issue in issues {
        writeln!(w, "  {} {issue}", warning("-", config))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Edge, Evidence, GraphData, Tier};
    use crate::fallback::sample_graph;
    use crate::merge::MergeStatistics;
    use crate::warning::LoadWarning;

    fn plain() -> OutputConfig {
        OutputConfig::new(80, false, false)
    }

    fn view(graph: GraphData, origin: GraphOrigin) -> SectionView {
        SectionView {
            graph,
            origin,
            warnings: Vec::new(),
            virtual_nodes: 0,
            cross_edges: 0,
        }
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    // ========== OutputConfig Tests ==========

    #[test]
    fn test_from_vars_defaults() {
        let config = OutputConfig::from_vars(|_| None);
        assert_eq!(config, OutputConfig::default());
    }

    #[test]
    fn test_no_color_disables_colors() {
        let config = OutputConfig::from_vars(|name| (name == "NO_COLOR").then(String::new));
        assert!(!config.use_colors);
    }

    #[test]
    fn test_conceptmap_color_false_disables_colors() {
        let config = OutputConfig::from_vars(|name| {
            (name == "CONCEPTMAP_COLOR").then(|| "false".to_string())
        });
        assert!(!config.use_colors);
    }

    #[test]
    fn test_invalid_width_falls_back() {
        let config = OutputConfig::from_vars(|name| match name {
            "CONCEPTMAP_MAX_WIDTH" => Some("wide".to_string()),
            "CONCEPTMAP_ASCII" => Some("1".to_string()),
            _ => None,
        });
        assert_eq!(config.max_width, DEFAULT_MAX_CONTENT_WIDTH);
        assert!(config.use_ascii);
    }

    // ========== Section View Tests ==========

    #[test]
    fn test_section_text_lists_concepts_core_first() {
        let catalogue = SectionCatalogue::builtin();
        let links = SourceLinks::default();
        let context = ViewContext {
            catalogue: &catalogue,
            source_links: &links,
        };
        let view = view(sample_graph(), GraphOrigin::Requested("sec1-0".to_string()));

        let out = render(|w| write_section_text(w, &view, context, &plain()));

        assert!(out.starts_with("1-0 多元性を見る  (section sec1-0)"));
        assert!(out.contains("3 concepts (0 from other sections), 2 relations"));
        let core = out.find("プラリティ").unwrap();
        let advanced = out.find("二次投票").unwrap();
        assert!(core < advanced);
    }

    #[test]
    fn test_section_text_reports_unresolved_and_warnings() {
        let catalogue = SectionCatalogue::builtin();
        let links = SourceLinks::default();
        let context = ViewContext {
            catalogue: &catalogue,
            source_links: &links,
        };
        let mut graph = sample_graph();
        graph.edges.push(Edge::new("plurality", "ghost", 0.5));
        let mut view = view(graph, GraphOrigin::DefaultSection("sec1-0".to_string()));
        view.warnings.push(LoadWarning::DocumentMissing {
            document: "graph_sec9-9.json".to_string(),
            error: "Document not found: graph_sec9-9.json".to_string(),
        });

        let out = render(|w| write_section_text(w, &view, context, &plain()));

        assert!(out.contains("(default section sec1-0)"));
        assert!(out.contains("! graph_sec9-9.json"));
        assert!(out.contains("1 relation(s) skipped"));
    }

    #[test]
    fn test_section_json_flattens_graph() {
        let view = view(sample_graph(), GraphOrigin::Merged);
        let value = serde_json::to_value(section_json(Some("merged"), &view)).unwrap();

        assert_eq!(value["origin"], "merged graph");
        assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(value["section"], "merged");
    }

    // ========== Concept View Tests ==========

    #[test]
    fn test_concept_text_shows_relations_and_source_links() {
        let catalogue = SectionCatalogue::builtin();
        let links = SourceLinks::default();
        let context = ViewContext {
            catalogue: &catalogue,
            source_links: &links,
        };
        let mut graph = sample_graph();
        graph.nodes[1].evidence = vec![Evidence::in_section("plural world", "3-1")];
        let view = view(graph.clone(), GraphOrigin::Requested("sec1-0".to_string()));

        let out = render(|w| write_concept_text(w, &view, &graph.nodes[1], context, &plain()));

        assert!(out.contains("Relations (2):"));
        assert!(out.contains("https://www.plurality.net/v/chapters/3-1/jpn/#:~:text=plural%20world"));
    }

    // ========== Other Views ==========

    #[test]
    fn test_links_text_empty() {
        let out = render(|w| write_links_text(w, &[], &LinkSummary::default(), &plain()));
        assert_eq!(out, "No cross-chapter links found.\n");
    }

    #[test]
    fn test_sections_text_uses_keys() {
        let out = render(|w| write_sections_text(w, &SectionCatalogue::builtin(), &plain()));
        assert!(out.lines().next().unwrap().contains("sec0-2"));
    }

    #[test]
    fn test_issue_text() {
        let issues = vec![GraphIssue::DuplicateNodeId { id: "a".to_string() }];
        let out = render(|w| write_issues_text(w, "graph.json", &issues, &plain()));
        assert!(out.contains("graph.json: 1 issue(s)"));
        assert!(out.contains("duplicate node id 'a'"));

        let clean = render(|w| write_issues_text(w, "graph.json", &[], &plain()));
        assert!(clean.contains("no issues found"));
    }

    #[test]
    fn test_merge_text() {
        let metadata = MergeMetadata {
            merged_from: Vec::new(),
            total_sections: 2,
            statistics: MergeStatistics {
                total_nodes: 5,
                total_edges: 4,
                id_collisions_resolved: 1,
                unique_node_ids: 5,
            },
        };
        let out = render(|w| write_merge_text(w, "graph_merged.json", &metadata, &[], &plain()));
        assert!(out.starts_with("Merged 2 section(s) into graph_merged.json"));
        assert!(out.contains("ID collisions resolved: 1"));
    }

    #[test]
    fn test_wrap_text_keeps_blank_lines() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn test_tier_style_label_in_concept_view() {
        let catalogue = SectionCatalogue::builtin();
        let links = SourceLinks::default();
        let context = ViewContext {
            catalogue: &catalogue,
            source_links: &links,
        };
        let concept = Concept::new("x", "X", Tier::Advanced);
        let view = view(GraphData::new(vec![concept.clone()], vec![]), GraphOrigin::Fallback);

        let out = render(|w| write_concept_text(w, &view, &concept, context, &plain()));
        assert!(out.contains("Tier: Advanced"));
    }
}
