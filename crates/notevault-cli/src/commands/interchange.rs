//! Import and export commands.

use std::fs::File;
use std::io::{self, ErrorKind, Write};

use notevault_core::interchange::{export_csv, export_html, import_csv};
use notevault_core::storage::NoteStore;
use notevault_core::Note;

use crate::app::AppContext;
use crate::cli::{ExportArgs, ExportFormat, ImportArgs};
use crate::errors::CliError;

pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    let file = File::open(&args.file).map_err(|e| -> anyhow::Error {
        if e.kind() == ErrorKind::NotFound {
            CliError::not_found(
                format!("CSV file not found: {}", args.file),
                "Hint: Check the path and try again.",
            )
            .into()
        } else {
            anyhow::anyhow!("Failed to open {}: {}", args.file, e)
        }
    })?;

    let (store, mut repository) = ctx.load()?;
    let report = import_csv(file, &mut repository)?;
    if !report.imported.is_empty() {
        store.save(&repository)?;
    }

    if args.json {
        let errors: Vec<serde_json::Value> = report
            .errors
            .iter()
            .map(|e| serde_json::json!({ "row": e.row, "message": e.message }))
            .collect();
        let output = serde_json::json!({
            "imported": report.imported,
            "skipped": report.skipped(),
            "errors": errors,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for error in &report.errors {
        eprintln!("Skipped row {}: {}", error.row, error.message);
    }
    if !ctx.quiet() {
        println!(
            "Imported {} notes ({} rows skipped)",
            report.imported.len(),
            report.skipped()
        );
    }
    Ok(())
}

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let (_store, repository) = ctx.load()?;
    let notes: Vec<&Note> = repository
        .list()
        .iter()
        .filter(|note| args.include_archived || !note.is_archived)
        .collect();

    match &args.output {
        Some(path) => {
            let mut file = File::create(path)
                .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", path, e))?;
            write_export(args.format, &notes, &mut file)?;
            file.sync_all()?;
            if !ctx.quiet() {
                eprintln!("Exported {} notes to {}", notes.len(), path);
            }
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_export(args.format, &notes, &mut handle)?;
            handle.flush()?;
        }
    }
    Ok(())
}

fn write_export<W: Write>(
    format: ExportFormat,
    notes: &[&Note],
    writer: &mut W,
) -> anyhow::Result<()> {
    match format {
        ExportFormat::Csv => export_csv(notes.iter().copied(), writer)?,
        ExportFormat::Html => {
            let html = export_html(notes.iter().copied());
            writer.write_all(html.as_bytes())?;
        }
    }
    Ok(())
}
