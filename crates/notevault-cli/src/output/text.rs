//! Human-readable note output.

use notevault_core::Note;

use crate::ui::{format_datetime, short_id, single_line, table, truncate};

const TITLE_WIDTH: usize = 40;

/// Print every field of one note.
pub fn print_note(note: &Note, quiet: bool) {
    if quiet {
        println!("{}", note.id);
        return;
    }
    println!("{}", note.title);
    println!("  id:        {}", note.id);
    println!("  priority:  {}", note.priority);
    println!("  category:  {}", note.category);
    if !note.tags.is_empty() {
        println!("  tags:      {}", note.tags.join(", "));
    }
    println!("  due:       {}", format_datetime(&note.due_date));
    if let Some(reminder) = &note.reminder {
        println!("  reminder:  {}", format_datetime(reminder));
    }
    let mut flags = Vec::new();
    if note.is_favorite {
        flags.push("favorite");
    }
    if note.is_archived {
        flags.push("archived");
    }
    if !flags.is_empty() {
        println!("  flags:     {}", flags.join(", "));
    }
    for attachment in &note.attachments {
        println!("  attached:  {}", attachment);
    }
    println!("  created:   {}", format_datetime(&note.created_at));
    println!("  modified:  {}", format_datetime(&note.modified_at));
    if !note.content.is_empty() {
        println!();
        println!("{}", note.content);
    }
}

/// Print notes as a table, or one id per line in quiet mode.
pub fn print_note_list(notes: &[&Note], quiet: bool) {
    if quiet {
        for note in notes {
            println!("{}", note.id);
        }
        return;
    }
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }
    let rows: Vec<Vec<String>> = notes
        .iter()
        .map(|note| {
            vec![
                short_id(&note.id),
                truncate(&single_line(&note.title), TITLE_WIDTH),
                note.priority.to_string(),
                note.category.clone(),
                note.tags.join(","),
                note.due_date.format("%Y-%m-%d").to_string(),
                marker(note),
            ]
        })
        .collect();
    let headers = ["ID", "TITLE", "PRIORITY", "CATEGORY", "TAGS", "DUE", ""];
    println!("{}", table(&headers, &rows));
}

fn marker(note: &Note) -> String {
    match (note.is_favorite, note.is_archived) {
        (true, true) => "*A".to_string(),
        (true, false) => "*".to_string(),
        (false, true) => "A".to_string(),
        (false, false) => String::new(),
    }
}
