//! Notevault CLI - an encrypted, local-only note store
//!
//! This is the command-line interface for Notevault. It provides a
//! user-friendly interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use notevault_core::NoteError;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{backup, init, interchange, misc, notes};
use crate::errors::CliError;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        exit_with_error(&e);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();
}

/// Exit with the code for a typed error, or 1 for anything else.
fn exit_with_error(err: &anyhow::Error) -> ! {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        cli_err.exit()
    }
    let classified = err
        .downcast_ref::<NoteError>()
        .and_then(CliError::from_note_error);
    if let Some(cli_err) = classified {
        cli_err.exit()
    }
    print_error(&format!("{:#}", err), fallback_hint(err));
    std::process::exit(1)
}

/// Hint for errors without a dedicated exit code.
fn fallback_hint(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<NoteError>()? {
        NoteError::Encode(_) => Some("Hint: The store on disk was not modified."),
        NoteError::Io { .. } | NoteError::KeyIo(_) => {
            Some("Hint: Re-run with --verbose for details.")
        }
        NoteError::WorkerStopped => Some("Hint: The store worker exited; retry the command."),
        _ => None,
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Add(args)) => {
            notes::handle_add(ctx, args)?;
        }
        Some(Commands::Edit(args)) => {
            notes::handle_edit(ctx, args)?;
        }
        Some(Commands::Delete(args)) => {
            notes::handle_delete(ctx, args)?;
        }
        Some(Commands::Show(args)) => {
            notes::handle_show(ctx, args)?;
        }
        Some(Commands::List(args)) => {
            notes::handle_list(ctx, args)?;
        }
        Some(Commands::Stats(args)) => {
            notes::handle_stats(ctx, args)?;
        }
        Some(Commands::Backup(args)) => {
            backup::handle_backup(ctx, args)?;
        }
        Some(Commands::Backups(args)) => {
            backup::handle_backups(ctx, args)?;
        }
        Some(Commands::Restore(args)) => {
            backup::handle_restore(ctx, args)?;
        }
        Some(Commands::Import(args)) => {
            interchange::handle_import(ctx, args)?;
        }
        Some(Commands::Export(args)) => {
            interchange::handle_export(ctx, args)?;
        }
        Some(Commands::Completions { shell }) => {
            misc::handle_completions(*shell);
        }
        None => {
            notes::handle_list(
                ctx,
                &cli::ListArgs {
                    search: None,
                    priority: None,
                    category: None,
                    favorites: false,
                    archived: false,
                    limit: None,
                    json: false,
                },
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_hint_for_unmapped_errors() {
        let encode = anyhow::Error::new(NoteError::Encode("refused".into()));
        assert_eq!(
            fallback_hint(&encode),
            Some("Hint: The store on disk was not modified.")
        );

        let io = anyhow::Error::new(NoteError::from(std::io::Error::other("disk full")));
        let hint = fallback_hint(&io).unwrap_or_default();
        assert!(hint.contains("--verbose"));

        assert_eq!(fallback_hint(&anyhow::anyhow!("plain failure")), None);
    }
}
