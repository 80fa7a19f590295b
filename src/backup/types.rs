//! Backup types

use serde::Serialize;
use std::path::PathBuf;

/// A timestamped copy of a settings document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupRecord {
    /// Location of the backup file
    pub path: PathBuf,

    /// When the backup was taken (file modification time for listed backups)
    pub created_at: String,

    /// Size of the copied document
    pub size_bytes: u64,

    /// SHA-256 of the copied bytes, lowercase hex
    pub sha256: String,
}

impl BackupRecord {
    /// File name of the backup
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Result of [`BackupManager::snapshot`](super::BackupManager::snapshot)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "record", rename_all = "snake_case")]
pub enum SnapshotOutcome {
    /// A backup file was written
    Created(BackupRecord),
    /// There was no settings document to protect
    Skipped,
}

impl SnapshotOutcome {
    /// The written record, if any
    #[must_use]
    pub fn record(&self) -> Option<&BackupRecord> {
        match self {
            SnapshotOutcome::Created(record) => Some(record),
            SnapshotOutcome::Skipped => None,
        }
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, SnapshotOutcome::Skipped)
    }
}
