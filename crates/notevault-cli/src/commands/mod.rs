//! Command handlers, one module per command group.

pub mod backup;
pub mod init;
pub mod interchange;
pub mod misc;
pub mod notes;
