//! Backup creation, listing, pruning and restore

use super::types::{BackupRecord, SnapshotOutcome};
use crate::config::SyncConfig;
use crate::error::{Error, Result, copy_file, create_dir, read_dir};
use crate::security::{ensure_secure_dir, set_secure_file_permissions};
use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use time::OffsetDateTime;

/// File name prefix of every backup
pub const BACKUP_PREFIX: &str = "backup_";

/// Snapshots the live settings document before destructive writes
#[derive(Debug, Clone)]
pub struct BackupManager {
    backup_dir: PathBuf,
    retention: Duration,
}

impl BackupManager {
    /// Manager writing into `backup_dir`, pruning after `retention`
    pub fn new(backup_dir: impl Into<PathBuf>, retention: Duration) -> Self {
        Self {
            backup_dir: backup_dir.into(),
            retention,
        }
    }

    /// Manager using the configured backup directory and retention window
    #[must_use]
    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(&config.backup_dir, config.retention())
    }

    #[must_use]
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    #[must_use]
    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Copy the settings document at `settings_path` into the backup directory
    ///
    /// Returns [`SnapshotOutcome::Skipped`] without touching the filesystem
    /// when there is no document. Backups taken within the same second share
    /// a name; the later one wins.
    pub fn snapshot(&self, settings_path: &Path) -> Result<SnapshotOutcome> {
        if !settings_path.is_file() {
            debug!(
                "No settings document at {}, skipping backup",
                settings_path.display()
            );
            return Ok(SnapshotOutcome::Skipped);
        }

        ensure_secure_dir(&self.backup_dir)?;

        let now = crate::clock::now();
        let path = self.backup_dir.join(format!(
            "{BACKUP_PREFIX}{}.json",
            crate::clock::file_stamp(now)
        ));

        copy_file(settings_path, &path).map_err(|e| {
            Error::BackupFailed(format!(
                "could not copy {} to {}: {e}",
                settings_path.display(),
                path.display()
            ))
        })?;
        set_secure_file_permissions(&path)?;

        let (sha256, size_bytes) = calculate_file_hash(&path)?;
        info!("Backup created: {}", path.display());

        Ok(SnapshotOutcome::Created(BackupRecord {
            path,
            created_at: crate::clock::iso8601(now),
            size_bytes,
            sha256,
        }))
    }

    /// Existing backups, oldest first
    pub fn list(&self) -> Result<Vec<BackupRecord>> {
        let mut records = Vec::new();
        for path in self.backup_files()? {
            let modified = modified_time(&path);
            let (sha256, size_bytes) = calculate_file_hash(&path)?;
            records.push(BackupRecord {
                path,
                created_at: crate::clock::iso8601(OffsetDateTime::from(modified)),
                size_bytes,
                sha256,
            });
        }
        Ok(records)
    }

    /// Remove backups older than the retention window
    ///
    /// Returns the removed paths. Files that cannot be removed are logged
    /// and left in place.
    pub fn cleanup_old_backups(&self) -> Result<Vec<PathBuf>> {
        let cutoff = SystemTime::now()
            .checked_sub(self.retention)
            .unwrap_or(UNIX_EPOCH);
        self.cleanup_older_than(cutoff)
    }

    /// Remove backups last modified before `cutoff`
    pub fn cleanup_older_than(&self, cutoff: SystemTime) -> Result<Vec<PathBuf>> {
        let mut removed = Vec::new();
        for path in self.backup_files()? {
            if modified_time(&path) >= cutoff {
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => {
                    debug!("Removed expired backup {}", path.display());
                    removed.push(path);
                }
                Err(e) => warn!("Could not remove {}: {e}", path.display()),
            }
        }

        if !removed.is_empty() {
            info!("Removed {} expired backup(s)", removed.len());
        }
        Ok(removed)
    }

    /// Copy a backup back over the settings document at `target`
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `backup` does not exist.
    pub fn restore(&self, backup: &Path, target: &Path) -> Result<()> {
        if !backup.is_file() {
            return Err(Error::NotFound(format!("backup {}", backup.display())));
        }

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir(parent)?;
        }
        copy_file(backup, target)?;

        info!(
            "Restored {} from {}",
            target.display(),
            backup.display()
        );
        Ok(())
    }

    /// Backup files sorted by name, which sorts them chronologically
    fn backup_files(&self) -> Result<Vec<PathBuf>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = read_dir(&self.backup_dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_backup_file(path))
            .collect();
        files.sort();
        Ok(files)
    }
}

fn is_backup_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.starts_with(BACKUP_PREFIX) && name.ends_with(".json"))
}

fn modified_time(path: &Path) -> SystemTime {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(UNIX_EPOCH)
}

/// Calculate SHA-256 hash of a file
pub fn calculate_file_hash(path: &Path) -> Result<(String, u64)> {
    let mut file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    let mut total_size = 0u64;

    loop {
        let bytes_read = file.read(&mut buffer).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        if bytes_read == 0 {
            break;
        }

        total_size += bytes_read as u64;
        hasher.update(&buffer[..bytes_read]);
    }

    Ok((format!("{:x}", hasher.finalize()), total_size))
}
