//! JSON output formatting.

use notevault_core::storage::BackupInfo;
use notevault_core::Note;

/// Convert a note to JSON for output.
///
/// Uses the same field names as the store file.
pub fn note_json(note: &Note) -> anyhow::Result<serde_json::Value> {
    Ok(serde_json::to_value(note)?)
}

/// Convert multiple notes to a JSON array for output.
pub fn notes_json<'a>(
    notes: impl IntoIterator<Item = &'a Note>,
) -> anyhow::Result<serde_json::Value> {
    let values = notes
        .into_iter()
        .map(note_json)
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(serde_json::Value::Array(values))
}

pub fn backups_json(backups: &[BackupInfo]) -> serde_json::Value {
    serde_json::Value::Array(
        backups
            .iter()
            .map(|backup| {
                serde_json::json!({
                    "name": backup.file_name,
                    "path": backup.path,
                    "size_bytes": backup.size_bytes,
                })
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use notevault_core::{NewNote, NoteRepository};

    #[test]
    fn test_note_json_uses_store_field_names() {
        let mut repo = NoteRepository::new();
        repo.add(NewNote::new("Buy milk", "").tags(["errand"]))
            .unwrap();

        let value = notes_json(repo.list()).unwrap();
        assert_eq!(value[0]["title"], "Buy milk");
        assert_eq!(value[0]["isFavorite"], false);
        assert_eq!(value[0]["tags"][0], "errand");
    }
}
