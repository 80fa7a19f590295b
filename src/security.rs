//! File permission helpers
//!
//! Backups and presets hold copies of the user's settings, so the directories
//! they live in are kept owner-only on Unix.

use crate::error::{Error, Result};
use std::path::Path;

/// Set restrictive permissions on a file (Unix: 0o600 - owner read/write only)
///
/// On Windows, this is a no-op as Windows uses ACLs differently.
///
/// # Errors
///
/// Returns an error if the file metadata cannot be read or the permissions
/// cannot be changed.
#[cfg(unix)]
pub fn set_secure_file_permissions(path: &Path) -> Result<()> {
    set_mode(path, 0o600)
}

/// Set restrictive permissions on a directory (Unix: 0o700 - owner rwx only)
///
/// # Errors
///
/// Returns an error if the directory metadata cannot be read or the
/// permissions cannot be changed.
#[cfg(unix)]
pub fn set_secure_dir_permissions(path: &Path) -> Result<()> {
    set_mode(path, 0o700)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut perms = metadata.permissions();
    perms.set_mode(mode);

    fs::set_permissions(path, perms).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Ensure a directory exists with secure permissions (Unix: 0o700)
///
/// Cross-platform safe: on Windows it just creates the directory.
///
/// # Errors
///
/// Returns an error if directory creation or permission setting fails.
pub fn ensure_secure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreate {
        path: path.to_path_buf(),
        source: e,
    })?;

    #[cfg(unix)]
    set_secure_dir_permissions(path)?;

    Ok(())
}

/// No-op on Windows (permissions managed via ACLs)
#[cfg(not(unix))]
pub fn set_secure_file_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

/// No-op on Windows (permissions managed via ACLs)
#[cfg(not(unix))]
pub fn set_secure_dir_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
