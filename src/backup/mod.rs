//! Settings backups
//!
//! Before an import overwrites the live settings document, the
//! [`BackupManager`] copies it byte-for-byte into the backup directory:
//!
//! ```text
//! ~/.vscode-sync/backups/
//! ├── backup_20240301_091500.json
//! └── backup_20240315_174210.json
//! ```
//!
//! Old backups are only removed when [`BackupManager::cleanup_old_backups`]
//! is called; snapshots never prune.

mod manager;
mod types;

pub use manager::{BACKUP_PREFIX, BackupManager, calculate_file_hash};
pub use types::{BackupRecord, SnapshotOutcome};
