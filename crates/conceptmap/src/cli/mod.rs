//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for conceptmap using
//! clap's derive API.
//!
//! # Commands
//!
//! - `init`: Write a default `conceptmap.yaml`
//! - `show`: Show a section's assembled graph, or one concept in it
//! - `links`: List cross-chapter links
//! - `sections`: List the known sections
//! - `merge`: Combine section documents into the merged document
//! - `validate`: Check a graph document for structural problems
//! - `source-url`: Print the URL of a section's published text
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--config`: Use this config file instead of searching for one
//! - `--data-dir` / `--base-url`: Override the configured document source
//!
//! # Example
//!
//! ```bash
//! conceptmap show sec3-0
//! conceptmap show sec3-0 --concept 二次投票
//! conceptmap links --section 3-0
//! conceptmap merge --dir public
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

// Re-export argument structs
pub use args::{
    InitArgs, LinksArgs, MergeArgs, SectionsArgs, ShowArgs, SourceUrlArgs, ValidateArgs,
};

// Re-export validators for external use
pub use validators::{validate_concept_key, validate_section_key};

use crate::app::ConceptMap;
use crate::commands::init::find_config_root;
use crate::config::{CONFIG_FILE_NAME, ConceptMapConfig, SourceConfig};

/// Conceptmap - browse the concept map of a book, section by section
///
/// Loads per-section concept graphs, brings in concepts linked from other
/// sections, and prints them as text or JSON.
#[derive(Parser, Debug)]
#[command(name = "conceptmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to the nearest conceptmap.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Read documents from this directory
    #[arg(long, global = true, conflicts_with = "base_url")]
    pub data_dir: Option<PathBuf>,

    /// Read documents from this base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default conceptmap.yaml
    ///
    /// Creates the config file in the current directory, and the data
    /// directory it points at when the source is a directory.
    Init(InitArgs),

    /// Show a section's concept graph
    ///
    /// Loads the section (falling back to the default section and then to the
    /// built-in graph), adds concepts linked from other sections, and prints
    /// concepts and relations.
    Show(ShowArgs),

    /// List cross-chapter links
    Links(LinksArgs),

    /// List the known sections
    Sections(SectionsArgs),

    /// Merge section documents into one graph
    ///
    /// Reads every graph_sec*.json in a directory, renames colliding concept
    /// ids per section, and writes the merged document.
    Merge(MergeArgs),

    /// Check a graph document for duplicate ids and dangling edges
    Validate(ValidateArgs),

    /// Print the URL of a section's published text
    SourceUrl(SourceUrlArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => {
                let cwd = std::env::current_dir()?;
                execute::execute_init(args, self.source_override(&cwd)).await
            }
            Some(Commands::Show(args)) => {
                let map = self.load_map().await?;
                execute::execute_show(&map, args, output_mode).await
            }
            Some(Commands::Links(args)) => {
                let map = self.load_map().await?;
                execute::execute_links(&map, args, output_mode).await
            }
            Some(Commands::Sections(args)) => {
                let map = self.load_map().await?;
                execute::execute_sections(&map, args, output_mode)
            }
            Some(Commands::Merge(args)) => execute::execute_merge(args, output_mode).await,
            Some(Commands::Validate(args)) => execute::execute_validate(args, output_mode).await,
            Some(Commands::SourceUrl(args)) => {
                let map = self.load_map().await?;
                execute::execute_source_url(&map, args, output_mode)
            }
            None => {
                println!("Conceptmap concept map browser");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }

    /// Source given on the command line, with a relative directory resolved
    /// against `cwd`
    fn source_override(&self, cwd: &Path) -> Option<SourceConfig> {
        if let Some(url) = &self.base_url {
            return Some(SourceConfig::http(url.clone()));
        }
        self.data_dir
            .as_ref()
            .map(|dir| SourceConfig::dir(cwd.join(dir).display().to_string()))
    }

    /// Load the configuration and apply command-line overrides
    async fn load_config(&self) -> Result<(ConceptMapConfig, PathBuf)> {
        let cwd = std::env::current_dir()?;

        let (mut config, root) = match &self.config {
            Some(path) => {
                let root = path
                    .parent()
                    .map_or_else(|| cwd.clone(), |parent| cwd.join(parent));
                (ConceptMapConfig::load(path).await?, root)
            }
            None => {
                let root = find_config_root(&cwd).unwrap_or_else(|| cwd.clone());
                let config =
                    ConceptMapConfig::load_or_default(&root.join(CONFIG_FILE_NAME)).await?;
                (config, root)
            }
        };

        if let Some(source) = self.source_override(&cwd) {
            config.source = source;
        }

        Ok((config, root))
    }

    async fn load_map(&self) -> Result<ConceptMap> {
        let (config, root) = self.load_config().await?;
        tracing::debug!(root = %root.display(), source = ?config.source, "Loaded configuration");
        Ok(ConceptMap::from_config(config, &root)?)
    }
}
