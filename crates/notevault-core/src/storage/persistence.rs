//! Encrypted store file persistence.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::crypto::{decrypt, encrypt, StoreKey};
use crate::error::{CorruptionKind, NoteError, Result};
use crate::fs::write_atomic;
use crate::notes::NoteRepository;
use crate::storage::codec;
use crate::storage::traits::NoteStore;

/// Encode and encrypt `repository` entirely in memory.
pub(crate) fn seal(repository: &NoteRepository, key: &StoreKey) -> Result<Vec<u8>> {
    let plaintext = codec::encode(repository)?;
    encrypt(&plaintext, key)
}

/// Decrypt and decode a sealed payload.
///
/// Authentication failures are reported as `CorruptStore` so callers see one
/// error family for "this file cannot be trusted", with the kind telling
/// wrong-key/tampering apart from schema problems.
pub(crate) fn unseal(sealed: &[u8], key: &StoreKey) -> Result<NoteRepository> {
    let plaintext = decrypt(sealed, key).map_err(|e| match e {
        NoteError::Authentication(message) => NoteError::CorruptStore {
            kind: CorruptionKind::Authentication,
            message,
        },
        other => other,
    })?;
    codec::decode(&plaintext)
}

/// Write `repository` to `path` encrypted with `key`.
///
/// Nothing on disk changes unless encoding and encryption both succeed; the
/// file is then replaced atomically.
pub fn save(repository: &NoteRepository, key: &StoreKey, path: &Path) -> Result<()> {
    let sealed = seal(repository, key)?;
    write_atomic(path, &sealed)?;
    info!("Saved {} notes to {}", repository.len(), path.display());
    Ok(())
}

/// Read the store at `path`. A missing file is an empty repository.
///
/// # Errors
///
/// - `NoteError::Io` if the file exists but cannot be read
/// - `NoteError::CorruptStore` if the key is wrong, the file was modified or
///   truncated, or its contents do not match the note schema
pub fn load(path: &Path, key: &StoreKey) -> Result<NoteRepository> {
    let sealed = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("No store at {}; starting empty", path.display());
            return Ok(NoteRepository::new());
        }
        Err(err) => return Err(err.into()),
    };
    let repository = unseal(&sealed, key)?;
    info!("Loaded {} notes from {}", repository.len(), path.display());
    Ok(repository)
}

/// Store file at a fixed path, sealed with one key.
#[derive(Debug, Clone)]
pub struct EncryptedFileStore {
    path: PathBuf,
    key: StoreKey,
}

impl EncryptedFileStore {
    pub fn new(path: impl Into<PathBuf>, key: StoreKey) -> Self {
        Self {
            path: path.into(),
            key,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &StoreKey {
        &self.key
    }
}

impl NoteStore for EncryptedFileStore {
    fn load(&self) -> Result<NoteRepository> {
        load(&self.path, &self.key)
    }

    fn save(&self, repository: &NoteRepository) -> Result<()> {
        save(repository, &self.key, &self.path)
    }
}
