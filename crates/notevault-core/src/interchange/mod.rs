//! Plain-text interchange: CSV import, CSV and HTML export.
//!
//! Exported files are not encrypted.

pub mod export;
pub mod import;

pub use export::{export_csv, export_html, CSV_HEADER};
pub use import::{import_csv, ImportReport, ImportRowError};
