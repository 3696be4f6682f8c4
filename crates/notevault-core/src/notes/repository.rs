//! In-memory note collection.

use std::collections::HashSet;

use chrono::Utc;
use log::debug;
use uuid::Uuid;

use crate::error::{NoteError, Result};
use crate::notes::types::{NewNote, Note, NoteFilter, NotePatch, NoteStatistics};
use crate::notes::validation::{
    normalize_category, normalize_tags, validate_attachments, validate_note,
};

/// Ordered collection of notes, the unit of persisted state.
///
/// Notes keep insertion order. Every mutation is validated before anything
/// changes, so a failed call leaves the repository as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteRepository {
    notes: Vec<Note>,
}

impl NoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from already-identified notes, e.g. a decoded store.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::Validation` on duplicate ids or any note that
    /// breaks a record invariant.
    pub fn from_notes(notes: Vec<Note>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(notes.len());
        for note in &notes {
            if !seen.insert(note.id) {
                return Err(NoteError::Validation(format!(
                    "Duplicate note id: {}",
                    note.id
                )));
            }
            validate_note(note)?;
        }
        Ok(Self { notes })
    }

    pub fn into_notes(self) -> Vec<Note> {
        self.notes
    }

    /// Append a new note and return its id.
    pub fn add(&mut self, new_note: NewNote) -> Result<Uuid> {
        let tags = normalize_tags(&new_note.tags)?;
        validate_attachments(&new_note.attachments)?;

        let now = Utc::now();
        let id = self.fresh_id();
        self.notes.push(Note {
            id,
            title: new_note.title,
            content: new_note.content,
            tags,
            priority: new_note.priority,
            category: normalize_category(new_note.category.as_deref()),
            due_date: new_note.due_date.unwrap_or(now),
            created_at: now,
            modified_at: now,
            is_favorite: new_note.is_favorite,
            is_archived: new_note.is_archived,
            attachments: new_note.attachments,
            reminder: new_note.reminder,
        });
        debug!("Added note {}", id);
        Ok(id)
    }

    /// Apply `patch` to the note with `id`, keeping its position.
    pub fn update(&mut self, id: Uuid, patch: NotePatch) -> Result<()> {
        let index = self.index_of(id)?;

        // Validate everything before touching the note.
        let tags = patch.tags.as_deref().map(normalize_tags).transpose()?;
        if let Some(attachments) = &patch.attachments {
            validate_attachments(attachments)?;
        }

        let note = &mut self.notes[index];
        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        if let Some(tags) = tags {
            note.tags = tags;
        }
        if let Some(priority) = patch.priority {
            note.priority = priority;
        }
        if let Some(category) = patch.category {
            note.category = normalize_category(Some(&category));
        }
        if let Some(due_date) = patch.due_date {
            note.due_date = due_date;
        }
        if let Some(is_favorite) = patch.is_favorite {
            note.is_favorite = is_favorite;
        }
        if let Some(is_archived) = patch.is_archived {
            note.is_archived = is_archived;
        }
        if let Some(attachments) = patch.attachments {
            note.attachments = attachments;
        }
        if let Some(reminder) = patch.reminder {
            note.reminder = reminder;
        }
        note.modified_at = Utc::now().max(note.created_at);

        debug!("Updated note {}", id);
        Ok(())
    }

    /// Remove the note with `id` and return it.
    pub fn delete(&mut self, id: Uuid) -> Result<Note> {
        let index = self.index_of(id)?;
        debug!("Deleted note {}", id);
        Ok(self.notes.remove(index))
    }

    pub fn get(&self, id: Uuid) -> Result<&Note> {
        self.notes
            .iter()
            .find(|note| note.id == id)
            .ok_or(NoteError::NotFound(id))
    }

    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    /// Notes matching `filter`, in collection order.
    pub fn filter(&self, filter: &NoteFilter) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|note| filter.matches(note))
            .collect()
    }

    pub fn statistics(&self) -> NoteStatistics {
        NoteStatistics {
            total: self.notes.len(),
            favorite_count: self.notes.iter().filter(|n| n.is_favorite).count(),
            archived_count: self.notes.iter().filter(|n| n.is_archived).count(),
        }
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for note in &self.notes {
            if !categories.contains(&note.category.as_str()) {
                categories.push(&note.category);
            }
        }
        categories
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn index_of(&self, id: Uuid) -> Result<usize> {
        self.notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(NoteError::NotFound(id))
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let id = Uuid::now_v7();
            if self.notes.iter().all(|note| note.id != id) {
                return id;
            }
        }
    }
}
