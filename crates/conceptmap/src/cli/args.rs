//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;
use std::path::PathBuf;

use super::validators::{validate_concept_key, validate_section_key};
use crate::source::MERGED_DOCUMENT;

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Section key (e.g., sec3-0, or "merged" for the full graph)
    ///
    /// Defaults to the configured default section.
    #[arg(value_parser = validate_section_key)]
    pub section: Option<String>,

    /// Show a single concept (by label or id) with its relations
    #[arg(short, long, value_parser = validate_concept_key)]
    pub concept: Option<String>,
}

/// Arguments for the `links` command
#[derive(Parser, Debug, Clone)]
pub struct LinksArgs {
    /// Only links leaving or entering this section
    #[arg(short, long, value_parser = validate_section_key)]
    pub section: Option<String>,

    /// Only links whose source or target concept has this label
    #[arg(short, long, value_parser = validate_concept_key)]
    pub concept: Option<String>,
}

/// Arguments for the `sections` command
#[derive(Parser, Debug, Clone)]
pub struct SectionsArgs {}

/// Arguments for the `merge` command
#[derive(Parser, Debug, Clone)]
pub struct MergeArgs {
    /// Directory holding the `graph_sec*.json` files
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Output file (defaults to `graph_merged.json` inside the directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl MergeArgs {
    /// Path the merged document is written to
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.dir.join(MERGED_DOCUMENT))
    }
}

/// Arguments for the `validate` command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Graph document to check
    pub file: PathBuf,
}

/// Arguments for the `source-url` command
#[derive(Parser, Debug, Clone)]
pub struct SourceUrlArgs {
    /// Section id (e.g., 3-0, sec3-0 or extra-1)
    #[arg(value_parser = validate_section_key)]
    pub section: String,

    /// Quote to highlight on the page
    #[arg(short, long)]
    pub evidence: Option<String>,
}
