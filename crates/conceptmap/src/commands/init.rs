//! Implementation of the `init` command.
//!
//! Writes a default `conceptmap.yaml` and creates the data directory it
//! points at.

use crate::config::{CONFIG_FILE_NAME, ConceptMapConfig, SourceConfig, SourceKind};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Maximum directory depth to traverse when searching for a config file
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Data directory, when the source is a local directory
    pub data_dir: Option<PathBuf>,
}

/// Initialize a concept map project in `base_dir`.
///
/// # Errors
///
/// Returns an error if a config file already exists or a filesystem
/// operation fails.
pub async fn init(base_dir: &Path, source: Option<SourceConfig>) -> Result<InitResult> {
    let config_file = base_dir.join(CONFIG_FILE_NAME);
    if fs::try_exists(&config_file).await? {
        return Err(Error::Config(format!(
            "Concept map is already initialized in this directory. Found existing '{CONFIG_FILE_NAME}'"
        )));
    }

    let config = ConceptMapConfig {
        source: source.unwrap_or_default(),
        ..ConceptMapConfig::default()
    };
    config.validate()?;

    let data_dir = match config.source.kind {
        SourceKind::Dir => {
            let dir = base_dir.join(&config.source.location);
            fs::create_dir_all(&dir).await?;
            Some(dir)
        }
        SourceKind::Http => None,
    };

    config.save(&config_file).await?;

    Ok(InitResult {
        config_file,
        data_dir,
    })
}

/// Find the directory holding `conceptmap.yaml`, searching upwards.
///
/// Returns `None` when no config file exists within the depth limit.
pub fn find_config_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(CONFIG_FILE_NAME).exists() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DATA_DIR;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_writes_config_and_data_dir() {
        let temp_dir = TempDir::new().unwrap();

        let result = init(temp_dir.path(), None).await.unwrap();

        assert!(result.config_file.exists());
        assert_eq!(
            result.data_dir.as_deref(),
            Some(temp_dir.path().join(DEFAULT_DATA_DIR).as_path())
        );
        let config = ConceptMapConfig::load(&result.config_file).await.unwrap();
        assert_eq!(config, ConceptMapConfig::default());
    }

    #[tokio::test]
    async fn test_init_with_http_source_creates_no_directory() {
        let temp_dir = TempDir::new().unwrap();

        let result = init(
            temp_dir.path(),
            Some(SourceConfig::http("https://example.org/data")),
        )
        .await
        .unwrap();

        assert!(result.data_dir.is_none());
        let config = ConceptMapConfig::load(&result.config_file).await.unwrap();
        assert_eq!(config.source.kind, SourceKind::Http);
    }

    #[tokio::test]
    async fn test_init_fails_if_already_initialized() {
        let temp_dir = TempDir::new().unwrap();

        init(temp_dir.path(), None).await.unwrap();
        let result = init(temp_dir.path(), None).await;

        let err_msg = result.unwrap_err().to_string().to_lowercase();
        assert!(err_msg.contains("already initialized"));
    }

    #[tokio::test]
    async fn test_find_config_root_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        init(temp_dir.path(), None).await.unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).await.unwrap();

        assert_eq!(find_config_root(&nested), Some(temp_dir.path().to_path_buf()));
    }
}
