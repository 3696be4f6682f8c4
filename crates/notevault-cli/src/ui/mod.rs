//! UI primitives for the Notevault CLI.
//!
//! - **Format**: string utilities (truncate, short ids, dates, sizes)
//! - **Render**: tables and error lines

pub mod format;
pub mod render;

pub use format::{format_bytes, format_datetime, short_id, single_line, truncate};
pub use render::{print_error, table};
