//! Note model and the in-memory repository that owns it.

pub mod repository;
pub mod types;
pub mod validation;

pub use repository::NoteRepository;
pub use types::{
    NewNote, Note, NoteFilter, NotePatch, NoteStatistics, Priority, DEFAULT_CATEGORY,
};
