//! Store key lifecycle.
//!
//! One random 256-bit key per installation encrypts the store and every
//! backup. It is generated on first use, written to a key file that only the
//! owner can read, and loaded unchanged on every later run.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use once_cell::sync::OnceCell;
use tempfile::NamedTempFile;
use zeroize::ZeroizeOnDrop;

use crate::error::{NoteError, Result};
use crate::fs::set_owner_only;

/// Length of the store key in bytes (256 bits).
pub const KEY_LENGTH: usize = 32;

/// Raw symmetric key material.
///
/// This type ensures that key material is securely zeroized from memory
/// when dropped, reducing the window of exposure.
#[derive(Clone, PartialEq, Eq, ZeroizeOnDrop)]
pub struct StoreKey {
    key: [u8; KEY_LENGTH],
}

impl StoreKey {
    /// Generate a fresh key from the operating system CSPRNG.
    pub fn generate() -> Result<Self> {
        let mut key = [0u8; KEY_LENGTH];
        getrandom::getrandom(&mut key)
            .map_err(|e| NoteError::KeyIo(format!("Failed to generate key bytes: {}", e)))?;
        Ok(Self { key })
    }

    /// Build a key from raw bytes, rejecting any length other than [`KEY_LENGTH`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LENGTH] = bytes.try_into().map_err(|_| NoteError::KeyCorrupt {
            expected: KEY_LENGTH,
            actual: bytes.len(),
        })?;
        Ok(Self { key })
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Owns the key file location and the key loaded from it.
///
/// The key is read at most once per `KeyManager`; later calls hand out the
/// cached value.
#[derive(Debug)]
pub struct KeyManager {
    path: PathBuf,
    key: OnceCell<StoreKey>,
}

impl KeyManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: OnceCell::new(),
        }
    }

    /// Location of the key file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the key from disk, creating it first if the file does not exist.
    ///
    /// # Errors
    ///
    /// - `NoteError::KeyCorrupt` if the existing file is not exactly [`KEY_LENGTH`] bytes
    /// - `NoteError::KeyIo` if the directory, file, or permissions cannot be set up
    pub fn ensure_key(&self) -> Result<&StoreKey> {
        self.key.get_or_try_init(|| load_or_create(&self.path))
    }

    /// The key previously returned by [`KeyManager::ensure_key`].
    pub fn key(&self) -> Result<&StoreKey> {
        self.key.get().ok_or(NoteError::NotInitialized)
    }
}

fn load_or_create(path: &Path) -> Result<StoreKey> {
    match fs::read(path) {
        Ok(bytes) => {
            debug!("Loaded key file {}", path.display());
            StoreKey::from_slice(&bytes)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => create_key_file(path),
        Err(err) => Err(key_io("read key file", path, err)),
    }
}

fn create_key_file(path: &Path) -> Result<StoreKey> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| key_io("create key directory", parent, e))?;

    let key = StoreKey::generate()?;
    let write_err = |e| key_io("write key file", path, e);

    // The key file only ever appears at `path` complete and fsynced.
    let mut temp = NamedTempFile::new_in(parent).map_err(write_err)?;
    temp.write_all(key.as_bytes()).map_err(write_err)?;
    temp.as_file().sync_all().map_err(write_err)?;
    set_owner_only(temp.path()).map_err(write_err)?;

    match temp.persist_noclobber(path) {
        Ok(_) => {
            info!("Generated new store key at {}", path.display());
            Ok(key)
        }
        // Lost a race with another creator; theirs is the installation key.
        Err(err) if err.error.kind() == ErrorKind::AlreadyExists => {
            let bytes = fs::read(path).map_err(|e| key_io("read key file", path, e))?;
            StoreKey::from_slice(&bytes)
        }
        Err(err) => Err(write_err(err.error)),
    }
}

fn key_io(action: &str, path: &Path, err: std::io::Error) -> NoteError {
    NoteError::KeyIo(format!("Failed to {} {}: {}", action, path.display(), err))
}
