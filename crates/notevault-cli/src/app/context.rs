//! Application context for the Notevault CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config and key.

use std::path::PathBuf;

use log::debug;
use once_cell::unsync::OnceCell;

use notevault_core::storage::{EncryptedFileStore, NoteStore};
use notevault_core::{KeyManager, NoteRepository};

use crate::cli::Cli;
use crate::config::{read_config, NotevaultConfig};
use crate::errors::CliError;

use super::resolver::{missing_config_message, resolve_config_path, resolve_store_path};

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<NotevaultConfig>,
    keys: OnceCell<KeyManager>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
            keys: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the configuration, loading it lazily if needed.
    ///
    /// Without a config file, `--store` alone is enough; the key and
    /// backups then use their default locations.
    pub fn config(&self) -> anyhow::Result<&NotevaultConfig> {
        self.config.get_or_try_init(|| -> anyhow::Result<NotevaultConfig> {
            let config_path = resolve_config_path()?;
            if config_path.exists() {
                return read_config(&config_path);
            }
            if self.cli.store.is_some() {
                debug!("No config at {}; using defaults", config_path.display());
                return NotevaultConfig::with_defaults();
            }
            Err(CliError::not_found(
                missing_config_message(&config_path),
                "Hint: Run `notevault init`, or pass --store / NOTEVAULT_STORE.",
            )
            .into())
        })
    }

    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        Ok(resolve_store_path(self.cli, self.config()?))
    }

    pub fn backup_dir(&self) -> anyhow::Result<PathBuf> {
        self.config()?.backup_dir()
    }

    pub fn max_backups(&self) -> anyhow::Result<usize> {
        Ok(self.config()?.backup.max_backups)
    }

    /// Key manager for the configured key file. The key is created on first use.
    pub fn keys(&self) -> anyhow::Result<&KeyManager> {
        self.keys
            .get_or_try_init(|| -> anyhow::Result<KeyManager> {
                Ok(KeyManager::new(&self.config()?.key.path))
            })
    }

    /// Open the encrypted store with the installation key.
    pub fn open_store(&self) -> anyhow::Result<EncryptedFileStore> {
        let key = self.keys()?.ensure_key()?.clone();
        Ok(EncryptedFileStore::new(self.store_path()?, key))
    }

    /// Open the store and load every note.
    pub fn load(&self) -> anyhow::Result<(EncryptedFileStore, NoteRepository)> {
        let store = self.open_store()?;
        let repository = store.load()?;
        Ok((store, repository))
    }
}
