use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use notevault_core::VERSION;

/// Notevault - an encrypted, local-only note store
#[derive(Parser)]
#[command(name = "notevault")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the store file
    #[arg(short, long, global = true, env = "NOTEVAULT_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log store activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the config file and installation key
    Init(InitArgs),

    /// Add a note
    Add(AddArgs),

    /// Change fields of a note
    Edit(EditArgs),

    /// Delete a note
    Delete(DeleteArgs),

    /// Show a note by ID
    Show(ShowArgs),

    /// List notes
    List(ListArgs),

    /// Show note counts and categories
    Stats(StatsArgs),

    /// Write an encrypted backup of the store
    Backup(BackupArgs),

    /// List backups
    Backups(BackupsArgs),

    /// Replace the store with the contents of a backup
    Restore(RestoreArgs),

    /// Import notes from a CSV file
    Import(ImportArgs),

    /// Export notes as CSV or HTML
    Export(ExportArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Key file path override
    #[arg(long)]
    pub key_path: Option<String>,

    /// Backup directory override
    #[arg(long)]
    pub backup_dir: Option<String>,

    /// Number of backups to keep (0 keeps all)
    #[arg(long)]
    pub max_backups: Option<usize>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Note title
    #[arg(value_name = "TITLE")]
    pub title: String,

    /// Note body
    #[arg(long, default_value = "")]
    pub content: String,

    /// Add a tag (repeatable)
    #[arg(short, long, value_name = "TAG")]
    pub tag: Vec<String>,

    /// low, medium, or high
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Category (defaults to "general")
    #[arg(short, long)]
    pub category: Option<String>,

    /// Due date (ISO-8601 or YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,

    /// Reminder time (ISO-8601 or YYYY-MM-DD)
    #[arg(long)]
    pub reminder: Option<String>,

    /// Attach a file reference (repeatable)
    #[arg(long, value_name = "PATH")]
    pub attach: Vec<String>,

    /// Mark as favorite
    #[arg(long)]
    pub favorite: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Note ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    /// Replace tags (repeatable)
    #[arg(short, long, value_name = "TAG")]
    pub tag: Vec<String>,

    /// Remove all tags
    #[arg(long, conflicts_with = "tag")]
    pub clear_tags: bool,

    #[arg(short, long)]
    pub priority: Option<String>,

    #[arg(short, long)]
    pub category: Option<String>,

    /// Due date (ISO-8601 or YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,

    /// Reminder time (ISO-8601 or YYYY-MM-DD)
    #[arg(long)]
    pub reminder: Option<String>,

    /// Remove the reminder
    #[arg(long, conflicts_with = "reminder")]
    pub clear_reminder: bool,

    /// Replace attachments (repeatable)
    #[arg(long, value_name = "PATH")]
    pub attach: Vec<String>,

    /// Set or clear the favorite flag
    #[arg(long, value_name = "BOOL")]
    pub favorite: Option<bool>,

    /// Set or clear the archived flag
    #[arg(long, value_name = "BOOL")]
    pub archived: Option<bool>,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Note ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Note ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Match title, content, or tags (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// low, medium, high, or all
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Category name or all
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only favorites
    #[arg(long)]
    pub favorites: bool,

    /// Only archived notes
    #[arg(long)]
    pub archived: bool,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `stats` command
#[derive(Args)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `backup` command
#[derive(Args)]
pub struct BackupArgs {
    /// Backup directory override
    #[arg(long)]
    pub dir: Option<String>,
}

/// Arguments for the `backups` command
#[derive(Args)]
pub struct BackupsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `restore` command
#[derive(Args)]
pub struct RestoreArgs {
    /// Backup file path, or a name from `notevault backups`
    #[arg(value_name = "BACKUP")]
    pub backup: String,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// CSV file to read
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Html,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    #[arg(long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Include archived notes
    #[arg(long)]
    pub include_archived: bool,
}
