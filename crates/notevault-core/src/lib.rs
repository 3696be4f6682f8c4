//! # Notevault Core
//!
//! Core library for Notevault - an encrypted, local-only note store.
//!
//! This crate provides the note model, the encrypted store file, backups,
//! and CSV/HTML interchange, independent of any front-end.
//!
//! ## Architecture
//!
//! - **crypto**: installation key and authenticated encryption
//! - **notes**: note records and the in-memory repository
//! - **storage**: encrypted store file, atomic save, backups
//! - **interchange**: CSV import, CSV and HTML export
//! - **worker**: background thread for blocking store I/O
//! - **fs**: atomic file replacement and owner-only permissions

pub mod crypto;
pub mod error;
pub mod fs;
pub mod interchange;
pub mod notes;
pub mod storage;
pub mod worker;

pub use crypto::{KeyManager, StoreKey};
pub use error::{CorruptionKind, NoteError, Result};
pub use notes::{NewNote, Note, NoteFilter, NotePatch, NoteRepository, NoteStatistics, Priority};
pub use storage::{EncryptedFileStore, NoteStore};
pub use worker::StoreWorker;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
