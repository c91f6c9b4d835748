//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use conceptmap::domain::{Concept, CrossChapterLink, CrossChapterLinksData, GraphData, LinkSummary, Tier};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path of the built conceptmap binary
pub fn conceptmap_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_conceptmap"))
}

/// Run the conceptmap binary in the specified directory with colors off
pub fn run_conceptmap_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(conceptmap_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute conceptmap")
}

/// A core concept whose label equals its id
pub fn concept(id: &str) -> Concept {
    Concept::new(id, id, Tier::Core)
}

/// A graph of core concepts with no edges
pub fn section_graph(ids: &[&str]) -> GraphData {
    GraphData::new(ids.iter().map(|id| concept(id)).collect(), vec![])
}

/// A cross-chapter link between `(section, concept)` pairs
pub fn link(from: (&str, &str), to: (&str, &str)) -> CrossChapterLink {
    CrossChapterLink {
        source_section: from.0.to_string(),
        source_concept: from.1.to_string(),
        target_section: to.0.to_string(),
        target_concept: to.1.to_string(),
        relation: "related_to".to_string(),
        relation_description: format!("{} relates to {}", from.1, to.1),
        confidence: 0.75,
        pattern: None,
    }
}

/// A link document holding `links`
pub fn links_document(links: Vec<CrossChapterLink>) -> CrossChapterLinksData {
    CrossChapterLinksData {
        summary: LinkSummary {
            total_links: links.len(),
            ..LinkSummary::default()
        },
        cross_chapter_links: links,
    }
}

/// Write `value` as JSON to `dir/name`
pub fn write_json<T: serde::Serialize>(dir: &Path, name: &str, value: &T) {
    std::fs::create_dir_all(dir).expect("Failed to create data directory");
    let body = serde_json::to_string_pretty(value).expect("Failed to serialize document");
    std::fs::write(dir.join(name), body).expect("Failed to write document");
}
