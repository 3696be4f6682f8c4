//! CSV and HTML export.

use std::io::Write;

use csv::WriterBuilder;

use crate::error::{NoteError, Result};
use crate::notes::Note;

/// Column order written by [`export_csv`]; [`import_csv`](super::import_csv) reads it back.
pub const CSV_HEADER: [&str; 6] = [
    "title", "content", "tags", "priority", "category", "due_date",
];

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Write `notes` as CSV with a header row.
pub fn export_csv<'a, W, I>(notes: I, writer: W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Note>,
{
    let mut csv = WriterBuilder::new().from_writer(writer);
    csv.write_record(CSV_HEADER).map_err(csv_error)?;
    for note in notes {
        csv.write_record([
            note.title.as_str(),
            note.content.as_str(),
            note.tags.join(",").as_str(),
            note.priority.as_str(),
            note.category.as_str(),
            note.due_date.format(DATE_FORMAT).to_string().as_str(),
        ])
        .map_err(csv_error)?;
    }
    csv.flush()?;
    Ok(())
}

fn csv_error(err: csv::Error) -> NoteError {
    match err.into_kind() {
        csv::ErrorKind::Io(source) => NoteError::Io { source },
        other => NoteError::Validation(format!("CSV write failed: {:?}", other)),
    }
}

/// Render `notes` as a standalone HTML page.
pub fn export_html<'a, I>(notes: I) -> String
where
    I: IntoIterator<Item = &'a Note>,
{
    let mut html = String::from(HTML_HEAD);
    for note in notes {
        html.push_str(&format!(
            "<li class=\"priority-{}\">\n<strong>{}</strong>\n",
            note.priority,
            escape_html(&note.title)
        ));
        if !note.content.is_empty() {
            html.push_str(&format!("<p>{}</p>\n", escape_html(&note.content)));
        }
        if !note.tags.is_empty() {
            html.push_str(&format!(
                "<div class=\"tags\">Tags: {}</div>\n",
                escape_html(&note.tags.join(", "))
            ));
        }
        html.push_str(&format!(
            "<div class=\"meta\">Due {} | {}</div>\n</li>\n",
            note.due_date.format(DATE_FORMAT),
            escape_html(&note.category)
        ));
    }
    html.push_str("</ul>\n</body>\n</html>\n");
    html
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Notes</title>
<style>
body { font-family: sans-serif; margin: 20px; }
ul { list-style-type: none; padding: 0; }
li { margin: 10px 0; padding: 12px; border-radius: 4px; background: #f4f4f4; }
.priority-high { border-left: 4px solid #f44336; }
.priority-medium { border-left: 4px solid #ff9800; }
.priority-low { border-left: 4px solid #4caf50; }
.tags { color: #007acc; font-size: 0.9em; }
.meta { color: #888; font-size: 0.8em; }
</style>
</head>
<body>
<h1>Notes</h1>
<ul>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interchange::import_csv;
    use crate::notes::{NewNote, NoteRepository, Priority};

    fn repo() -> NoteRepository {
        let mut repo = NoteRepository::new();
        repo.add(
            NewNote::new("Buy milk", "2 liters, \"fresh\"")
                .tags(["errand", "home"])
                .priority(Priority::High)
                .category("shopping"),
        )
        .unwrap();
        repo.add(NewNote::new("Plan <trip>", "")).unwrap();
        repo
    }

    #[test]
    fn test_export_csv_header_and_quoting() {
        let mut out = Vec::new();
        export_csv(repo().list(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("title,content,tags,priority,category,due_date")
        );
        let quoted = "Buy milk,\"2 liters, \"\"fresh\"\"\",\"errand,home\",high,shopping,";
        assert!(lines.next().unwrap().starts_with(quoted));
    }

    #[test]
    fn test_exported_csv_imports_back() {
        let source = repo();
        let mut out = Vec::new();
        export_csv(source.list(), &mut out).unwrap();

        let mut target = NoteRepository::new();
        let report = import_csv(out.as_slice(), &mut target).unwrap();

        assert_eq!(report.skipped(), 0);
        assert_eq!(target.len(), 2);
        let note = &target.list()[0];
        assert_eq!(note.content, "2 liters, \"fresh\"");
        assert_eq!(note.tags, vec!["errand", "home"]);
        assert_eq!(note.category, "shopping");
    }

    #[test]
    fn test_export_html_escapes_text() {
        let html = export_html(repo().list());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<strong>Plan &lt;trip&gt;</strong>"));
        assert!(html.contains("2 liters, &quot;fresh&quot;"));
        assert!(html.contains("class=\"priority-high\""));
        assert!(!html.contains("<trip>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b's <c>"), "a &amp; b&#39;s &lt;c&gt;");
    }
}
