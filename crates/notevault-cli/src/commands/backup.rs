//! Backup commands: backup, backups, restore.

use std::path::{Path, PathBuf};

use log::debug;
use notevault_core::storage::{
    create_backup, list_backups, prune_backups, restore_backup, NoteStore,
};

use crate::app::AppContext;
use crate::cli::{BackupArgs, BackupsArgs, RestoreArgs};
use crate::errors::CliError;
use crate::output::backups_json;
use crate::ui::{format_bytes, table};

pub fn handle_backup(ctx: &AppContext, args: &BackupArgs) -> anyhow::Result<()> {
    let store_path = ctx.store_path()?;
    if !store_path.exists() {
        return Err(CliError::not_found(
            format!("No store found at {}", store_path.display()),
            "Hint: Add a note first, or check --store.",
        )
        .into());
    }

    let (store, repository) = ctx.load()?;
    let backup_dir = match &args.dir {
        Some(dir) => PathBuf::from(dir),
        None => ctx.backup_dir()?,
    };
    let path = create_backup(&repository, store.key(), &backup_dir)?;

    let keep = ctx.max_backups()?;
    if keep > 0 {
        let removed = prune_backups(&backup_dir, keep)?;
        debug!("Pruned {} old backups", removed);
    }

    if ctx.quiet() {
        println!("{}", path.display());
    } else {
        println!("Backed up {} notes to {}", repository.len(), path.display());
    }
    Ok(())
}

pub fn handle_backups(ctx: &AppContext, args: &BackupsArgs) -> anyhow::Result<()> {
    let backup_dir = ctx.backup_dir()?;
    let backups = list_backups(&backup_dir)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&backups_json(&backups))?);
        return Ok(());
    }
    if ctx.quiet() {
        for backup in &backups {
            println!("{}", backup.path.display());
        }
        return Ok(());
    }
    if backups.is_empty() {
        println!("No backups in {}", backup_dir.display());
        return Ok(());
    }
    let rows: Vec<Vec<String>> = backups
        .iter()
        .map(|backup| vec![backup.file_name.clone(), format_bytes(backup.size_bytes)])
        .collect();
    println!("{}", table(&["NAME", "SIZE"], &rows));
    Ok(())
}

pub fn handle_restore(ctx: &AppContext, args: &RestoreArgs) -> anyhow::Result<()> {
    let path = resolve_backup_path(&ctx.backup_dir()?, &args.backup);
    if !path.is_file() {
        return Err(CliError::not_found(
            format!("Backup not found: {}", path.display()),
            "Hint: Run `notevault backups` to see available backups.",
        )
        .into());
    }

    let store = ctx.open_store()?;
    // Decode fully before touching the live store.
    let repository = restore_backup(&path, store.key())?;
    store.save(&repository)?;

    if !ctx.quiet() {
        println!(
            "Restored {} notes from {}",
            repository.len(),
            path.display()
        );
    }
    Ok(())
}

/// A bare file name refers to the backup directory; anything else is a path.
fn resolve_backup_path(backup_dir: &Path, value: &str) -> PathBuf {
    let given = Path::new(value);
    if given.components().count() == 1 && !given.exists() {
        backup_dir.join(given)
    } else {
        given.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name_resolves_into_backup_dir() {
        let dir = Path::new("/var/backups/notevault");
        assert_eq!(
            resolve_backup_path(dir, "notes_backup_20260101_000000.nvbak"),
            dir.join("notes_backup_20260101_000000.nvbak")
        );
        assert_eq!(
            resolve_backup_path(dir, "/tmp/elsewhere.nvbak"),
            PathBuf::from("/tmp/elsewhere.nvbak")
        );
    }
}
