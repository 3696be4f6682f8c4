//! Store file persistence and backups.
//!
//! # Layout
//!
//! - [`codec`]: plaintext envelope encoding
//! - [`persistence`]: encrypted store file, atomic save
//! - [`backup`]: timestamped backup copies
//! - [`traits`]: the [`NoteStore`] interface

pub mod backup;
pub mod codec;
pub mod persistence;
pub mod traits;

pub use backup::{create_backup, list_backups, prune_backups, restore_backup, BackupInfo};
pub use persistence::{load, save, EncryptedFileStore};
pub use traits::NoteStore;
