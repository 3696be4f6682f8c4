//! Path resolution for config and store files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, NotevaultConfig};

/// Resolve the config file path, checking NOTEVAULT_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("NOTEVAULT_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the store file path from CLI args or config.
pub fn resolve_store_path(cli: &Cli, config: &NotevaultConfig) -> PathBuf {
    match &cli.store {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(&config.store.path),
    }
}

/// Error message when config file is missing.
pub fn missing_config_message(config_path: &Path) -> String {
    format!("No notevault config found at {}", config_path.display())
}
