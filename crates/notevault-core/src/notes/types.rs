//! Core data types for notes.
//!
//! The serialized names of [`Note`] fields are part of the store file
//! format and must not change.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NoteError;

/// Category assigned when none is given.
pub const DEFAULT_CATEGORY: &str = "general";

/// Note priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Parse a priority filter where `"all"` means no restriction.
    pub fn parse_filter(value: &str) -> Result<Option<Priority>, NoteError> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(NoteError::Validation(format!(
                "Unknown priority: {:?} (expected low, medium, or high)",
                other
            ))),
        }
    }
}

/// A single note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable identifier, assigned at creation
    pub id: Uuid,

    pub title: String,

    pub content: String,

    /// Tags in first-seen order; case preserved
    pub tags: Vec<String>,

    pub priority: Priority,

    pub category: String,

    pub due_date: DateTime<Utc>,

    pub created_at: DateTime<Utc>,

    /// Never earlier than `created_at`
    pub modified_at: DateTime<Utc>,

    pub is_favorite: bool,

    pub is_archived: bool,

    /// Opaque file references; the files themselves are not managed here
    pub attachments: Vec<String>,

    #[serde(default)]
    pub reminder: Option<DateTime<Utc>>,
}

impl Note {
    /// Case-insensitive substring match against title, content, and tags.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Builder for creating new notes.
///
/// Identity and timestamps are assigned by the repository.
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub priority: Priority,
    /// Defaults to [`DEFAULT_CATEGORY`]
    pub category: Option<String>,
    /// Defaults to the creation time
    pub due_date: Option<DateTime<Utc>>,
    pub is_favorite: bool,
    pub is_archived: bool,
    pub attachments: Vec<String>,
    pub reminder: Option<DateTime<Utc>>,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    pub fn archived(mut self, is_archived: bool) -> Self {
        self.is_archived = is_archived;
        self
    }

    pub fn attachments<I, S>(mut self, attachments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attachments = attachments.into_iter().map(Into::into).collect();
        self
    }

    pub fn reminder(mut self, reminder: DateTime<Utc>) -> Self {
        self.reminder = Some(reminder);
        self
    }
}

/// Partial update of a note. Fields left as `None` are not touched.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_favorite: Option<bool>,
    pub is_archived: Option<bool>,
    pub attachments: Option<Vec<String>>,
    /// `Some(None)` clears the reminder
    pub reminder: Option<Option<DateTime<Utc>>>,
}

impl NotePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = Some(is_favorite);
        self
    }

    pub fn archived(mut self, is_archived: bool) -> Self {
        self.is_archived = Some(is_archived);
        self
    }

    pub fn attachments<I, S>(mut self, attachments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attachments = Some(attachments.into_iter().map(Into::into).collect());
        self
    }

    pub fn reminder(mut self, reminder: Option<DateTime<Utc>>) -> Self {
        self.reminder = Some(reminder);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.tags.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.due_date.is_none()
            && self.is_favorite.is_none()
            && self.is_archived.is_none()
            && self.attachments.is_none()
            && self.reminder.is_none()
    }
}

/// Filter criteria for listing notes.
///
/// All set criteria combine with logical AND. `require_favorite` and
/// `require_archived` restrict only when true; false leaves that dimension
/// unfiltered.
#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    /// Case-insensitive substring of title, content, or any tag
    pub search_text: Option<String>,

    /// `None` means all priorities
    pub priority: Option<Priority>,

    /// Exact category; `None` means all categories
    pub category: Option<String>,

    pub require_favorite: bool,

    pub require_archived: bool,
}

impl NoteFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search_text = if text.is_empty() { None } else { Some(text) };
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restrict to one category; `"all"` (any case) clears the restriction.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.trim().eq_ignore_ascii_case("all") {
            None
        } else {
            Some(category)
        };
        self
    }

    pub fn favorites_only(mut self) -> Self {
        self.require_favorite = true;
        self
    }

    pub fn archived_only(mut self) -> Self {
        self.require_archived = true;
        self
    }

    /// Whether `note` satisfies every criterion.
    pub fn matches(&self, note: &Note) -> bool {
        if let Some(text) = &self.search_text {
            if !note.matches_text(&text.to_lowercase()) {
                return false;
            }
        }
        if self.priority.is_some_and(|p| p != note.priority) {
            return false;
        }
        if let Some(category) = &self.category {
            if &note.category != category {
                return false;
            }
        }
        if self.require_favorite && !note.is_favorite {
            return false;
        }
        if self.require_archived && !note.is_archived {
            return false;
        }
        true
    }
}

/// Aggregate counts over a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NoteStatistics {
    pub total: usize,
    pub favorite_count: usize,
    pub archived_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parse_is_case_insensitive() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" medium ".parse::<Priority>().unwrap(), Priority::Medium);
        assert!(matches!(
            "urgent".parse::<Priority>(),
            Err(NoteError::Validation(_))
        ));
    }

    #[test]
    fn test_priority_filter_all() {
        assert_eq!(Priority::parse_filter("All").unwrap(), None);
        assert_eq!(Priority::parse_filter("low").unwrap(), Some(Priority::Low));
        assert!(Priority::parse_filter("none").is_err());
    }

    #[test]
    fn test_category_all_clears_filter() {
        let filter = NoteFilter::new().category("ALL");
        assert!(filter.category.is_none());
        let filter = NoteFilter::new().category("work");
        assert_eq!(filter.category.as_deref(), Some("work"));
    }

    #[test]
    fn test_empty_search_text_is_no_filter() {
        assert!(NoteFilter::new().search_text("").search_text.is_none());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(NotePatch::new().is_empty());
        assert!(!NotePatch::new().reminder(None).is_empty());
    }
}
