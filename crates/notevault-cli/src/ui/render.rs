//! Rendering primitives for CLI output.

use std::io::IsTerminal;

use comfy_table::{ContentArrangement, Table as ComfyTable};

/// Render rows as a borderless table with a header.
///
/// When stdout is not a terminal, rows are tab-separated without a header
/// so the output stays easy to pipe.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if !std::io::stdout().is_terminal() {
        return rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = ComfyTable::new();
    table.load_preset(comfy_table::presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.to_vec());
    for i in 0..headers.len() {
        if let Some(column) = table.column_mut(i) {
            column.set_padding((0, 2));
        }
    }
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Print an error message to stderr with optional hint.
pub fn print_error(message: &str, error_hint: Option<&str>) {
    eprintln!("Error: {}", message);
    if let Some(hint) = error_hint {
        eprintln!("{}", hint);
    }
}
