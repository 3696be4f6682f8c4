use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct NotevaultConfig {
    pub store: StoreSection,
    pub key: KeySection,
    #[serde(default)]
    pub backup: BackupSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KeySection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct BackupSection {
    pub dir: Option<String>,
    /// 0 keeps every backup
    #[serde(default)]
    pub max_backups: usize,
}

impl NotevaultConfig {
    pub fn new(
        store_path: PathBuf,
        key_path: PathBuf,
        backup_dir: Option<PathBuf>,
        max_backups: usize,
    ) -> Self {
        Self {
            store: StoreSection {
                path: store_path.to_string_lossy().to_string(),
            },
            key: KeySection {
                path: key_path.to_string_lossy().to_string(),
            },
            backup: BackupSection {
                dir: backup_dir.map(|path| path.to_string_lossy().to_string()),
                max_backups,
            },
        }
    }

    /// Config with every path at its XDG default.
    pub fn with_defaults() -> anyhow::Result<Self> {
        Ok(Self::new(
            default_store_path()?,
            default_key_path()?,
            Some(default_backup_dir()?),
            0,
        ))
    }

    pub fn backup_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.backup.dir {
            Some(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir)),
            _ => default_backup_dir(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("notes.vault"))
}

pub fn default_key_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("notevault.key"))
}

pub fn default_backup_dir() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("backups"))
}

pub fn read_config(path: &Path) -> anyhow::Result<NotevaultConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &NotevaultConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("notevault"));
        }
    }
    Ok(home_dir()?.join(".config").join("notevault"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("notevault"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("notevault"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = NotevaultConfig::new(
            PathBuf::from("/data/notes.vault"),
            PathBuf::from("/conf/notevault.key"),
            None,
            5,
        );

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();

        assert_eq!(loaded.store.path, "/data/notes.vault");
        assert_eq!(loaded.key.path, "/conf/notevault.key");
        assert!(loaded.backup.dir.is_none());
        assert_eq!(loaded.backup.max_backups, 5);
    }

    #[test]
    fn test_backup_section_is_optional() {
        let config: NotevaultConfig =
            toml::from_str("[store]\npath = \"/a\"\n\n[key]\npath = \"/b\"\n").unwrap();
        assert_eq!(config.backup.max_backups, 0);
        assert!(config.backup.dir.is_none());
    }

    #[test]
    fn test_unreadable_config_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        let err = read_config(&path).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config"));
    }
}
