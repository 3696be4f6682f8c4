//! Field validation and normalization shared by add, update, and decode.

use crate::error::{NoteError, Result};
use crate::notes::types::{Note, DEFAULT_CATEGORY};

pub const MAX_TAG_BYTES: usize = 128;
pub const MAX_TAGS_PER_NOTE: usize = 100;

/// Trim tags, reject blanks, and drop case-insensitive duplicates.
///
/// The first spelling of a tag wins and order is preserved.
pub fn normalize_tags(tags: &[String]) -> Result<Vec<String>> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(NoteError::Validation(
                "Empty tag is not allowed".to_string(),
            ));
        }
        if trimmed.len() > MAX_TAG_BYTES {
            return Err(NoteError::Validation(format!(
                "Tag too long (max {} bytes)",
                MAX_TAG_BYTES
            )));
        }
        let lowered = trimmed.to_lowercase();
        if !normalized.iter().any(|t| t.to_lowercase() == lowered) {
            normalized.push(trimmed.to_string());
        }
    }

    if normalized.len() > MAX_TAGS_PER_NOTE {
        return Err(NoteError::Validation(format!(
            "Too many tags (max {})",
            MAX_TAGS_PER_NOTE
        )));
    }

    Ok(normalized)
}

/// Blank categories fall back to [`DEFAULT_CATEGORY`].
pub fn normalize_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

pub fn validate_attachments(attachments: &[String]) -> Result<()> {
    if attachments.iter().any(|path| path.trim().is_empty()) {
        return Err(NoteError::Validation(
            "Attachment path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Check a fully built note against every record invariant.
pub fn validate_note(note: &Note) -> Result<()> {
    if note.modified_at < note.created_at {
        return Err(NoteError::Validation(format!(
            "Note {} was modified before it was created",
            note.id
        )));
    }
    let tags = normalize_tags(&note.tags)?;
    if tags != note.tags {
        return Err(NoteError::Validation(format!(
            "Note {} has unnormalized tags",
            note.id
        )));
    }
    if note.category.trim().is_empty() {
        return Err(NoteError::Validation(format!(
            "Note {} has an empty category",
            note.id
        )));
    }
    validate_attachments(&note.attachments)
}
