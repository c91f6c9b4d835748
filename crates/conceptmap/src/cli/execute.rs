//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::{Context, Result, bail};

use super::args::{
    InitArgs, LinksArgs, MergeArgs, SectionsArgs, ShowArgs, SourceUrlArgs, ValidateArgs,
};
use crate::app::ConceptMap;
use crate::config::SourceConfig;
use crate::domain::{CrossChapterLink, Evidence, GraphData};
use crate::output::{self, OutputMode, ViewContext};

/// Execute the init command
pub async fn execute_init(args: &InitArgs, source: Option<SourceConfig>) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;

    if !args.quiet {
        println!("Initializing concept map in {}...", current_dir.display());
    }

    let result = init::init(&current_dir, source).await?;

    if !args.quiet {
        println!("Initialized conceptmap");
        println!("  Config: {}", result.config_file.display());
        if let Some(data_dir) = &result.data_dir {
            println!("  Data:   {}", data_dir.display());
        }
    }

    Ok(())
}

/// Execute the show command
pub async fn execute_show(map: &ConceptMap, args: &ShowArgs, output_mode: OutputMode) -> Result<()> {
    let view = map.load_section_view(args.section.as_deref()).await;
    for warning in &view.warnings {
        tracing::warn!(document = warning.document(), "{warning}");
    }

    let catalogue = map.catalogue();
    let context = ViewContext {
        catalogue: &catalogue,
        source_links: &map.config().source_links,
    };

    match &args.concept {
        Some(key) => {
            let Some(concept) = view.graph.find_concept(key) else {
                bail!(
                    "Concept not found: '{key}' (searched {} concepts)",
                    view.graph.nodes.len()
                );
            };
            output::print_concept(&view, concept, context, output_mode)?;
        }
        None => output::print_section(args.section.as_deref(), &view, context, output_mode)?,
    }

    Ok(())
}

/// Execute the links command
pub async fn execute_links(
    map: &ConceptMap,
    args: &LinksArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::linker::{concept_links, normalize_section};

    let document = map.links().await;
    let mut selected: Vec<&CrossChapterLink> = match &args.concept {
        Some(label) => {
            let found = concept_links(&document.cross_chapter_links, label);
            found.outgoing.into_iter().chain(found.incoming).collect()
        }
        None => document.cross_chapter_links.iter().collect(),
    };

    if let Some(section) = &args.section {
        let section = normalize_section(section);
        selected.retain(|l| l.source_section == section || l.target_section == section);
    }

    output::print_links(&selected, &document.summary, output_mode)?;
    Ok(())
}

/// Execute the sections command
pub fn execute_sections(
    map: &ConceptMap,
    _args: &SectionsArgs,
    output_mode: OutputMode,
) -> Result<()> {
    output::print_sections(&map.catalogue(), output_mode)?;
    Ok(())
}

/// Execute the merge command
pub async fn execute_merge(args: &MergeArgs, output_mode: OutputMode) -> Result<()> {
    use crate::merge::{merge_sections, read_section_files, validate_graph};

    let sections = read_section_files(&args.dir).await?;
    if sections.is_empty() {
        bail!("No graph_sec*.json files found in {}", args.dir.display());
    }

    let merged = merge_sections(&sections);
    let issues = validate_graph(&merged.graph);

    let output_path = args.output_path();
    let json = serde_json::to_string_pretty(&merged)?;
    tokio::fs::write(&output_path, json)
        .await
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    tracing::info!(
        sections = sections.len(),
        nodes = merged.metadata.statistics.total_nodes,
        edges = merged.metadata.statistics.total_edges,
        "Merged section graphs"
    );

    output::print_merge_report(
        &output_path.display().to_string(),
        &merged.metadata,
        &issues,
        output_mode,
    )?;
    Ok(())
}

/// Execute the validate command
pub async fn execute_validate(args: &ValidateArgs, output_mode: OutputMode) -> Result<()> {
    use crate::merge::validate_graph;

    let content = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let graph: GraphData = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a graph document", args.file.display()))?;

    let issues = validate_graph(&graph);
    let document = args.file.display().to_string();
    output::print_issues(&document, &issues, output_mode)?;

    if !issues.is_empty() {
        bail!("{} problem(s) found in {document}", issues.len());
    }
    Ok(())
}

/// Execute the source-url command
pub fn execute_source_url(
    map: &ConceptMap,
    args: &SourceUrlArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let evidence = args.evidence.as_deref().map(Evidence::new);
    let url = map.source_url(&args.section, evidence.as_ref());

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({ "url": url }))?,
        OutputMode::Text => output::print_message(&url)?,
    }
    Ok(())
}
