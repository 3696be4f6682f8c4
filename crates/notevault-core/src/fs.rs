//! Filesystem utilities for atomic, owner-only file writes.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;

/// Rename `temp_path` over `destination`.
///
/// Some platforms (notably Windows) refuse to rename onto an existing file.
/// Only for that refusal is the destination removed and the rename retried;
/// any other failure leaves `destination` in place. The temp file is removed
/// if the rename ultimately fails.
///
/// # Errors
///
/// Returns an error if the rename fails even after the fallback attempt.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    let initial_err = match fs::rename(temp_path, destination) {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };
    let target_exists = destination.exists()
        && matches!(
            initial_err.kind(),
            io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
        );
    if !target_exists {
        let _ = fs::remove_file(temp_path);
        return Err(initial_err);
    }

    let _ = fs::remove_file(destination);
    fs::rename(temp_path, destination).map_err(|retry_err| {
        let _ = fs::remove_file(temp_path);
        io::Error::new(
            retry_err.kind(),
            format!(
                "Atomic rename failed (initial: {}, retry: {})",
                initial_err, retry_err
            ),
        )
    })
}

/// Write `data` to `path` through a sibling temp file and an atomic rename.
///
/// The parent directory is created if missing. A crash at any point leaves
/// either the old `path` contents or the new ones, never a mix.
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let temp_path = write_temp(path, data)?;
    debug!("Renaming {} over {}", temp_path.display(), path.display());
    rename_with_fallback(&temp_path, path)
}

/// First half of [`write_atomic`]: create, fill, and fsync the temp file.
///
/// Returns the temp path; `path` itself is not touched.
pub(crate) fn write_temp(path: &Path, data: &[u8]) -> io::Result<PathBuf> {
    let parent = parent_dir(path)?;
    fs::create_dir_all(parent)?;

    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| invalid_input(format!("Invalid store filename: {}", path.display())))?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::other(format!("System time error: {}", e)))?
        .as_nanos();
    let temp_path = parent.join(format!("{}.{}.tmp", filename, nanos));

    let result = (|| {
        let mut file = create_owner_only(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()
    })();
    if let Err(err) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    Ok(temp_path)
}

/// Create a new file that only the owner may read or write.
///
/// Fails if the file already exists.
fn create_owner_only(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

/// Restrict an existing file to owner read/write.
pub fn set_owner_only(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

/// Parent directory of `path`, treating a bare filename as the current directory.
pub(crate) fn parent_dir(path: &Path) -> io::Result<&Path> {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Ok(Path::new(".")),
        Some(parent) => Ok(parent),
        None => Err(invalid_input(format!("Invalid path: {}", path.display()))),
    }
}

fn invalid_input(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}
