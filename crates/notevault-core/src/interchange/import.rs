//! CSV import.

use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use log::{info, warn};
use uuid::Uuid;

use crate::error::{NoteError, Result};
use crate::notes::{NewNote, NoteRepository, Priority};

/// A row that could not be imported.
///
/// `row` counts data rows from 1; the header is not counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRowError {
    pub row: usize,
    pub message: String,
}

impl From<ImportRowError> for NoteError {
    fn from(err: ImportRowError) -> Self {
        NoteError::ImportRow {
            row: err.row,
            message: err.message,
        }
    }
}

/// Outcome of [`import_csv`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Ids of the notes added, in row order
    pub imported: Vec<Uuid>,
    pub errors: Vec<ImportRowError>,
}

impl ImportReport {
    pub fn skipped(&self) -> usize {
        self.errors.len()
    }
}

#[derive(Debug, Default)]
struct Columns {
    title: Option<usize>,
    content: Option<usize>,
    tags: Option<usize>,
    priority: Option<usize>,
    category: Option<usize>,
    due_date: Option<usize>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Result<Self> {
        let mut columns = Columns::default();
        for (index, name) in header.iter().enumerate() {
            let slot = match name.trim().to_ascii_lowercase().as_str() {
                "title" | "note" => &mut columns.title,
                "content" => &mut columns.content,
                "tags" => &mut columns.tags,
                "priority" => &mut columns.priority,
                "category" | "type" => &mut columns.category,
                "due_date" | "date_time" => &mut columns.due_date,
                _ => continue,
            };
            slot.get_or_insert(index);
        }
        if columns.title.is_none() && columns.content.is_none() {
            return Err(NoteError::Validation(
                "CSV header needs a title, note, or content column".to_string(),
            ));
        }
        Ok(columns)
    }
}

/// Add one note per CSV row to `repository`.
///
/// Bad rows are reported and skipped; the rest are still imported.
///
/// # Errors
///
/// Returns `NoteError::Validation` if the header is missing or names
/// neither a title nor a content column. Nothing is imported in that case.
pub fn import_csv<R: Read>(reader: R, repository: &mut NoteRepository) -> Result<ImportReport> {
    let mut csv = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let header = csv
        .headers()
        .map_err(|e| NoteError::Validation(format!("Unreadable CSV header: {}", e)))?
        .clone();
    let columns = Columns::from_header(&header)?;

    let mut report = ImportReport::default();
    for (index, record) in csv.records().enumerate() {
        let row = index + 1;
        let outcome = record
            .map_err(|e| e.to_string())
            .and_then(|record| parse_row(&columns, &record))
            .and_then(|note| repository.add(note).map_err(|e| e.to_string()));

        match outcome {
            Ok(id) => report.imported.push(id),
            Err(message) => {
                warn!("Skipping CSV row {}: {}", row, message);
                report.errors.push(ImportRowError { row, message });
            }
        }
    }

    info!(
        "Imported {} notes from CSV ({} rows skipped)",
        report.imported.len(),
        report.skipped()
    );
    Ok(report)
}

fn parse_row(columns: &Columns, record: &StringRecord) -> std::result::Result<NewNote, String> {
    let field = |column: Option<usize>| column.and_then(|i| record.get(i)).unwrap_or("");

    let title = field(columns.title);
    let content = field(columns.content);
    if title.trim().is_empty() && content.trim().is_empty() {
        return Err("row has neither title nor content".to_string());
    }

    let mut note = NewNote::new(title, content).tags(split_tags(field(columns.tags)));

    let priority = field(columns.priority);
    if !priority.trim().is_empty() {
        note = note.priority(priority.parse::<Priority>().map_err(|e| e.to_string())?);
    }

    let category = field(columns.category);
    if !category.trim().is_empty() {
        note = note.category(category);
    }

    let due_date = field(columns.due_date);
    if !due_date.trim().is_empty() {
        note = note.due_date(parse_date(due_date)?);
    }

    Ok(note)
}

fn split_tags(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// RFC 3339, `YYYY-MM-DD HH:MM`, or `YYYY-MM-DD`. Naive times are UTC.
pub(crate) fn parse_date(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M") {
        return Ok(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = parsed.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(format!("unrecognized date: {:?}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn import(data: &str) -> (NoteRepository, ImportReport) {
        let mut repo = NoteRepository::new();
        let report = import_csv(data.as_bytes(), &mut repo).unwrap();
        (repo, report)
    }

    #[test]
    fn test_import_full_row() {
        let (repo, report) = import(
            "title,content,tags,priority,category,due_date\n\
             Buy milk,2 liters,\"errand, home\",High,shopping,2026-03-01 09:30\n",
        );

        assert_eq!(report.imported.len(), 1);
        assert_eq!(report.skipped(), 0);
        let note = repo.get(report.imported[0]).unwrap();
        assert_eq!(note.title, "Buy milk");
        assert_eq!(note.content, "2 liters");
        assert_eq!(note.tags, vec!["errand", "home"]);
        assert_eq!(note.priority, Priority::High);
        assert_eq!(note.category, "shopping");
        assert_eq!(
            note.due_date,
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_import_legacy_column_names() {
        let (repo, report) = import(
            "note,tags,priority,date_time,type\n\
             Call mom,family,low,2026-01-02,personal\n",
        );

        let note = repo.get(report.imported[0]).unwrap();
        assert_eq!(note.title, "Call mom");
        assert_eq!(note.content, "");
        assert_eq!(note.category, "personal");
    }

    #[test]
    fn test_bad_rows_are_reported_and_skipped() {
        let (repo, report) = import(
            "title,priority,due_date\n\
             ok one,low,\n\
             bad priority,urgent,\n\
             bad date,low,yesterday\n\
             ,,\n\
             ok two,,2026-05-05T10:00:00Z\n",
        );

        assert_eq!(repo.len(), 2);
        assert_eq!(report.imported.len(), 2);
        let rows: Vec<usize> = report.errors.iter().map(|e| e.row).collect();
        assert_eq!(rows, vec![2, 3, 4]);
        assert!(report.errors[0].message.contains("urgent"));
    }

    #[test]
    fn test_wrong_field_count_is_row_error() {
        let (repo, report) = import("title,content\nfirst,body\nsecond\nthird,body\n");

        assert_eq!(repo.len(), 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].row, 2);
    }

    #[test]
    fn test_header_without_title_or_content_fails() {
        let mut repo = NoteRepository::new();
        let err = import_csv("tags,priority\na,low\n".as_bytes(), &mut repo).unwrap_err();
        assert!(matches!(err, NoteError::Validation(_)));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_empty_input_fails() {
        let mut repo = NoteRepository::new();
        assert!(import_csv("".as_bytes(), &mut repo).is_err());
    }

    #[test]
    fn test_row_error_converts_to_note_error() {
        let err: NoteError = ImportRowError {
            row: 4,
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Import row 4: bad");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 7, 4, 0, 0, 0).unwrap();
        assert_eq!(parse_date("2026-07-04").unwrap(), expected);
        assert_eq!(parse_date("2026-07-04 00:00").unwrap(), expected);
        assert_eq!(parse_date("2026-07-04T02:00:00+02:00").unwrap(), expected);
        assert!(parse_date("04/07/2026").is_err());
    }
}
