//! Error types for notevault core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for notevault operations.
pub type Result<T> = std::result::Result<T, NoteError>;

/// Why a store or backup file could not be turned back into notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptionKind {
    /// The ciphertext failed its integrity check (wrong key, tampering, truncation).
    Authentication,
    /// The plaintext decrypted but does not match the note schema.
    Schema,
}

impl fmt::Display for CorruptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorruptionKind::Authentication => write!(f, "authentication failed"),
            CorruptionKind::Schema => write!(f, "invalid contents"),
        }
    }
}

/// Core error type for notevault operations.
#[derive(Debug, Error)]
pub enum NoteError {
    /// Key directory or file could not be created, read, or restricted
    #[error("Key I/O error: {0}")]
    KeyIo(String),

    /// Key file exists but holds the wrong number of bytes
    #[error("Key file is corrupt: expected {expected} bytes, found {actual}")]
    KeyCorrupt { expected: usize, actual: usize },

    /// Key requested before it was ensured
    #[error("Key has not been initialized")]
    NotInitialized,

    /// Ciphertext integrity check failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Notes could not be serialized or sealed for writing
    #[error("Failed to encode store: {0}")]
    Encode(String),

    /// Store or backup file is unreadable as a note collection
    #[error("Corrupt store ({kind}): {message}")]
    CorruptStore {
        kind: CorruptionKind,
        message: String,
    },

    /// Filesystem error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Note not found by ID
    #[error("Note not found: {0}")]
    NotFound(Uuid),

    /// Malformed note fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// One malformed import row
    #[error("Import row {row}: {message}")]
    ImportRow { row: usize, message: String },

    /// Background store worker is no longer running
    #[error("Store worker has stopped")]
    WorkerStopped,
}

impl NoteError {
    pub(crate) fn corrupt_schema(message: impl Into<String>) -> Self {
        NoteError::CorruptStore {
            kind: CorruptionKind::Schema,
            message: message.into(),
        }
    }

    /// True for errors that mean a file cannot be trusted as a note store.
    pub fn is_corrupt_store(&self) -> bool {
        matches!(self, NoteError::CorruptStore { .. })
    }
}
