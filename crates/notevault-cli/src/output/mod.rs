//! Output formatting for notes, statistics, and backups.

pub mod json;
pub mod text;

pub use json::{backups_json, note_json, notes_json};
pub use text::{print_note, print_note_list};
