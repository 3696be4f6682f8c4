//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;
use std::io::ErrorKind;

use notevault_core::{CorruptionKind, NoteError};

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, store, note, backup)
    NotFound { message: String, hint: String },

    /// Store or backup could not be authenticated or decoded
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Classify a core error, if it has a dedicated exit code.
    pub fn from_note_error(err: &NoteError) -> Option<Self> {
        match err {
            NoteError::NotFound(id) => Some(CliError::not_found(
                format!("Note not found: {}", id),
                "Hint: Run `notevault list` to find note IDs.",
            )),
            NoteError::Validation(_) | NoteError::ImportRow { .. } => {
                Some(CliError::invalid_input(err.to_string()))
            }
            NoteError::KeyCorrupt { .. } => Some(CliError::auth_failed_with_hint(
                err.to_string(),
                "Hint: The key file is damaged; restore it from a copy.",
            )),
            NoteError::Authentication(_)
            | NoteError::CorruptStore {
                kind: CorruptionKind::Authentication,
                ..
            } => Some(CliError::auth_failed_with_hint(
                err.to_string(),
                "Hint: Check that the key file belongs to this store, or restore a backup.",
            )),
            NoteError::CorruptStore { .. } => Some(CliError::auth_failed_with_hint(
                err.to_string(),
                "Hint: Restore a backup with `notevault restore <backup>`.",
            )),
            NoteError::Io { source } if source.kind() == ErrorKind::NotFound => Some(
                CliError::not_found(err.to_string(), "Hint: Check the path and try again."),
            ),
            _ => None,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}
