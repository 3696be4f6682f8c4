//! Store interface.
//!
//! The `NoteStore` trait is what front-ends and the background worker hold
//! on to. It hides where the store lives and which key seals it.

use crate::error::Result;
use crate::notes::NoteRepository;

/// Persistent home for a note collection.
///
/// All implementations must ensure:
/// - Data is encrypted at rest
/// - `save` replaces the previous state atomically
/// - `load` never returns a partially populated repository
pub trait NoteStore: Send + Sync {
    /// Read the whole collection.
    ///
    /// A store that has never been saved yields an empty repository.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::CorruptStore` if:
    /// - The key is wrong
    /// - The file was modified or truncated
    /// - The contents do not match the note schema
    fn load(&self) -> Result<NoteRepository>;

    /// Replace the stored collection with `repository`.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::Io` if the file cannot be written. The previous
    /// contents are left intact in that case.
    fn save(&self, repository: &NoteRepository) -> Result<()>;
}
