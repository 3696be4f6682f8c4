//! Timestamped encrypted backups.
//!
//! A backup is a complete store file written under a new name in the backup
//! directory. Backups are never overwritten; a second backup within the same
//! second gets a numeric suffix instead.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, info, warn};
use tempfile::NamedTempFile;

use crate::crypto::StoreKey;
use crate::error::{NoteError, Result};
use crate::notes::NoteRepository;
use crate::storage::persistence::{seal, unseal};

const BACKUP_PREFIX: &str = "notes_backup_";
const BACKUP_EXTENSION: &str = "nvbak";
const MAX_SAME_SECOND_BACKUPS: u32 = 999;

/// A backup file found in the backup directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
}

/// Write an encrypted snapshot of `repository` into `backup_dir`.
///
/// Returns the path of the new backup.
pub fn create_backup(
    repository: &NoteRepository,
    key: &StoreKey,
    backup_dir: &Path,
) -> Result<PathBuf> {
    let sealed = seal(repository, key)?;
    fs::create_dir_all(backup_dir)?;

    let stamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
    let mut temp = NamedTempFile::new_in(backup_dir)?;
    temp.write_all(&sealed)?;
    temp.as_file().sync_all()?;

    for attempt in 0..=MAX_SAME_SECOND_BACKUPS {
        let candidate = backup_dir.join(backup_file_name(&stamp, attempt));
        match temp.persist_noclobber(&candidate) {
            Ok(_) => {
                info!(
                    "Backed up {} notes to {}",
                    repository.len(),
                    candidate.display()
                );
                return Ok(candidate);
            }
            Err(err) if err.error.kind() == ErrorKind::AlreadyExists => {
                debug!("Backup name {} taken", candidate.display());
                temp = err.file;
            }
            Err(err) => return Err(err.error.into()),
        }
    }

    Err(NoteError::Io {
        source: std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("Too many backups for timestamp {}", stamp),
        ),
    })
}

/// Decode the backup at `path`.
///
/// The live repository is not touched; callers replace it with the returned
/// value only when this succeeds.
///
/// # Errors
///
/// - `NoteError::Io` if the backup cannot be read (including a missing file)
/// - `NoteError::CorruptStore` if it fails authentication or schema checks
pub fn restore_backup(path: &Path, key: &StoreKey) -> Result<NoteRepository> {
    let sealed = fs::read(path)?;
    let repository = unseal(&sealed, key)?;
    info!(
        "Restored {} notes from {}",
        repository.len(),
        path.display()
    );
    Ok(repository)
}

/// Backups in `backup_dir`, oldest first. A missing directory has none.
pub fn list_backups(backup_dir: &Path) -> Result<Vec<BackupInfo>> {
    let entries = match fs::read_dir(backup_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut backups = Vec::new();
    for entry in entries {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().to_string();
        if !is_backup_name(&file_name) {
            continue;
        }
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        backups.push(BackupInfo {
            path: entry.path(),
            file_name,
            size_bytes: metadata.len(),
        });
    }
    backups.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(backups)
}

/// Delete the oldest backups so at most `keep` remain. `keep == 0` keeps all.
///
/// Returns how many backups were removed.
pub fn prune_backups(backup_dir: &Path, keep: usize) -> Result<usize> {
    if keep == 0 {
        return Ok(0);
    }
    let backups = list_backups(backup_dir)?;
    let excess = backups.len().saturating_sub(keep);

    let mut removed = 0;
    for backup in backups.iter().take(excess) {
        match fs::remove_file(&backup.path) {
            Ok(()) => {
                debug!("Removed old backup {}", backup.path.display());
                removed += 1;
            }
            Err(err) => warn!(
                "Failed to remove old backup {}: {}",
                backup.path.display(),
                err
            ),
        }
    }
    Ok(removed)
}

fn backup_file_name(stamp: &str, attempt: u32) -> String {
    if attempt == 0 {
        format!("{}{}.{}", BACKUP_PREFIX, stamp, BACKUP_EXTENSION)
    } else {
        format!(
            "{}{}_{:03}.{}",
            BACKUP_PREFIX, stamp, attempt, BACKUP_EXTENSION
        )
    }
}

fn is_backup_name(name: &str) -> bool {
    name.starts_with(BACKUP_PREFIX)
        && Path::new(name)
            .extension()
            .is_some_and(|ext| ext == BACKUP_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CorruptionKind;
    use crate::notes::NewNote;
    use tempfile::tempdir;

    fn repo() -> NoteRepository {
        let mut repo = NoteRepository::new();
        repo.add(NewNote::new("Buy milk", "").tags(["errand"]))
            .unwrap();
        repo
    }

    #[test]
    fn test_backup_names_sort_in_creation_order() {
        let names = [
            backup_file_name("20260101_000000", 0),
            backup_file_name("20260101_000000", 1),
            backup_file_name("20260101_000000", 12),
            backup_file_name("20260101_000001", 0),
        ];
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(sorted, names);
    }

    #[test]
    fn test_create_and_restore() {
        let dir = tempdir().unwrap();
        let key = StoreKey::generate().unwrap();
        let repo = repo();

        let path = create_backup(&repo, &key, &dir.path().join("backups")).unwrap();

        assert!(is_backup_name(path.file_name().unwrap().to_str().unwrap()));
        assert_eq!(restore_backup(&path, &key).unwrap(), repo);
    }

    #[test]
    fn test_same_second_backups_do_not_overwrite() {
        let dir = tempdir().unwrap();
        let key = StoreKey::generate().unwrap();
        let mut repo = repo();

        let mut paths = Vec::new();
        for _ in 0..3 {
            paths.push(create_backup(&repo, &key, dir.path()).unwrap());
            repo.add(NewNote::new("another", "")).unwrap();
        }

        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 3);
        let sizes: Vec<usize> = paths
            .iter()
            .map(|p| restore_backup(p, &key).unwrap().len())
            .collect();
        assert_eq!(sizes, vec![1, 2, 3]);
    }

    #[test]
    fn test_restore_missing_is_io() {
        let dir = tempdir().unwrap();
        let key = StoreKey::generate().unwrap();
        let err = restore_backup(&dir.path().join("nope.nvbak"), &key).unwrap_err();
        assert!(matches!(err, NoteError::Io { .. }));
    }

    #[test]
    fn test_restore_wrong_key_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = create_backup(&repo(), &StoreKey::generate().unwrap(), dir.path()).unwrap();
        let err = restore_backup(&path, &StoreKey::generate().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            NoteError::CorruptStore {
                kind: CorruptionKind::Authentication,
                ..
            }
        ));
    }

    #[test]
    fn test_list_ignores_other_files() {
        let dir = tempdir().unwrap();
        let key = StoreKey::generate().unwrap();
        fs::write(dir.path().join("notes.vault"), b"x").unwrap();
        fs::write(dir.path().join("notes_backup_readme.txt"), b"x").unwrap();
        let made = create_backup(&repo(), &key, dir.path()).unwrap();

        let listed = list_backups(dir.path()).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].path, made);
        assert!(listed[0].size_bytes > 0);
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        assert!(list_backups(&dir.path().join("none")).unwrap().is_empty());
    }

    #[test]
    fn test_prune_keeps_newest() {
        let dir = tempdir().unwrap();
        let key = StoreKey::generate().unwrap();
        let made: Vec<PathBuf> = (0..4)
            .map(|_| create_backup(&repo(), &key, dir.path()).unwrap())
            .collect();

        assert_eq!(prune_backups(dir.path(), 0).unwrap(), 0);
        assert_eq!(prune_backups(dir.path(), 2).unwrap(), 2);

        let remaining: Vec<PathBuf> = list_backups(dir.path())
            .unwrap()
            .into_iter()
            .map(|b| b.path)
            .collect();
        let mut expected = made;
        expected.sort();
        assert_eq!(remaining, expected[2..].to_vec());
    }
}
