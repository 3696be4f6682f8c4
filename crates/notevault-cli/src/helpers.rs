//! Parsing helper functions for the CLI.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use notevault_core::NoteRepository;

use crate::errors::CliError;

/// Parse a datetime string (ISO-8601 or YYYY-MM-DD).
pub fn parse_datetime(value: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
        }
    }

    Err(CliError::invalid_input(format!(
        "Invalid date/time (expected ISO-8601 or YYYY-MM-DD): {}",
        value
    ))
    .into())
}

/// Resolve a full note ID or a unique prefix of one.
pub fn resolve_note_id(repository: &NoteRepository, value: &str) -> anyhow::Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(value) {
        return Ok(id);
    }

    let prefix = value.trim().to_ascii_lowercase();
    if prefix.is_empty() {
        return Err(CliError::invalid_input("Note ID must not be empty").into());
    }
    let matches: Vec<Uuid> = repository
        .list()
        .iter()
        .map(|note| note.id)
        .filter(|id| id.to_string().starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(CliError::not_found(
            format!("No note matches ID {}", value),
            "Hint: Run `notevault list` to find note IDs.",
        )
        .into()),
        _ => Err(CliError::invalid_input(format!(
            "ID prefix {} matches {} notes; use more characters",
            value,
            matches.len()
        ))
        .into()),
    }
}
