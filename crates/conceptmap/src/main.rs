//! Conceptmap CLI binary.

use anyhow::Result;
use conceptmap::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the conceptmap CLI.
///
/// Uses tokio's current_thread runtime; every command is a short sequence
/// of I/O-bound steps.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=conceptmap=debug
    // Logs go to stderr so --json output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("conceptmap=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting conceptmap CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Conceptmap CLI completed successfully");
    Ok(())
}
