//! Tool configuration
//!
//! [`SyncConfig`] holds where presets and backups live, the backup retention
//! window and the editor the engine drives. It is threaded explicitly through
//! [`SyncEngine`](crate::SyncEngine) rather than kept in process-wide state.

use crate::bundle::BundleFormat;
use crate::editor::Editor;
use crate::error::Result;
use crate::storage::JsonStorage;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the directory under `$HOME` holding the tool's own state
pub const CONFIG_DIR_NAME: &str = ".vscode-sync";

/// File name of the persisted configuration inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default number of days a backup is kept before cleanup removes it
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

/// Configuration for the sync engine, preset catalog and backup manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Root directory for presets, backups and `config.json`
    pub config_dir: PathBuf,

    /// Directory holding one JSON document per user preset
    pub presets_dir: PathBuf,

    /// Directory holding settings backups
    pub backup_dir: PathBuf,

    /// Back up the live settings before an import overwrites them
    pub auto_backup: bool,

    /// Backups older than this many days are removed by cleanup
    pub backup_retention_days: u32,

    /// Format used when an export destination has no recognizable extension
    pub default_export_format: BundleFormat,

    /// Ask before destructive actions (consumed by front-ends)
    pub confirm_destructive_actions: bool,

    /// Explicit editor choice; `None` means auto-detect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<Editor>,

    /// Explicit live settings path; `None` means the platform default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_path: Option<PathBuf>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfigBuilder::new().build()
    }
}

impl SyncConfig {
    /// Create a new builder for SyncConfig
    ///
    /// # Example
    /// ```rust
    /// use vscode_sync::SyncConfig;
    ///
    /// let config = SyncConfig::builder()
    ///     .config_dir("/tmp/vscode-sync")
    ///     .backup_retention_days(7)
    ///     .build();
    /// assert_eq!(config.backup_dir, std::path::PathBuf::from("/tmp/vscode-sync/backups"));
    /// ```
    #[must_use]
    pub fn builder() -> SyncConfigBuilder {
        SyncConfigBuilder::new()
    }

    /// Default location of `config.json` (`~/.vscode-sync/config.json`)
    #[must_use]
    pub fn default_path() -> PathBuf {
        default_config_dir().join(CONFIG_FILE_NAME)
    }

    /// Path of `config.json` inside this configuration's root
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Load configuration from a file
    ///
    /// A missing file yields the defaults. A malformed file also yields the
    /// defaults, with a warning, so a broken `config.json` never blocks a sync.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!("No configuration at {}, using defaults", path.display());
            return Self::default();
        }

        match JsonStorage::new().read::<SyncConfig>(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring unreadable configuration: {e}");
                Self::default()
            }
        }
    }

    /// Save configuration to a file (atomic write)
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        JsonStorage::new().write(path, self)
    }

    /// Create the config, presets and backup directories (owner-only on Unix)
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.config_dir, &self.presets_dir, &self.backup_dir] {
            if !dir.exists() {
                crate::security::ensure_secure_dir(dir)?;
            }
        }
        Ok(())
    }

    /// Backup retention window as a duration
    #[must_use]
    pub fn retention(&self) -> Duration {
        Duration::from_secs(u64::from(self.backup_retention_days) * 86_400)
    }
}

/// Builder for creating SyncConfig with a fluent API
#[derive(Debug, Clone)]
pub struct SyncConfigBuilder {
    config_dir: Option<PathBuf>,
    presets_dir: Option<PathBuf>,
    backup_dir: Option<PathBuf>,
    auto_backup: bool,
    backup_retention_days: u32,
    default_export_format: BundleFormat,
    confirm_destructive_actions: bool,
    editor: Option<Editor>,
    settings_path: Option<PathBuf>,
}

impl Default for SyncConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncConfigBuilder {
    /// Create a new builder with default values
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: None,
            presets_dir: None,
            backup_dir: None,
            auto_backup: true,
            backup_retention_days: DEFAULT_RETENTION_DAYS,
            default_export_format: BundleFormat::Json,
            confirm_destructive_actions: true,
            editor: None,
            settings_path: None,
        }
    }

    /// Set the configuration root
    ///
    /// Supports `~` expansion for home directory.
    #[must_use]
    pub fn config_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(expand_home(path.into()));
        self
    }

    /// Override the presets directory (default: `<config_dir>/presets`)
    #[must_use]
    pub fn presets_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.presets_dir = Some(expand_home(path.into()));
        self
    }

    /// Override the backup directory (default: `<config_dir>/backups`)
    #[must_use]
    pub fn backup_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.backup_dir = Some(expand_home(path.into()));
        self
    }

    /// Enable or disable backing up settings before an import
    #[must_use]
    pub fn auto_backup(mut self, enabled: bool) -> Self {
        self.auto_backup = enabled;
        self
    }

    /// Set the backup retention window in days
    #[must_use]
    pub fn backup_retention_days(mut self, days: u32) -> Self {
        self.backup_retention_days = days;
        self
    }

    /// Set the fallback export format
    #[must_use]
    pub fn default_export_format(mut self, format: BundleFormat) -> Self {
        self.default_export_format = format;
        self
    }

    /// Ask before destructive actions
    #[must_use]
    pub fn confirm_destructive_actions(mut self, confirm: bool) -> Self {
        self.confirm_destructive_actions = confirm;
        self
    }

    /// Drive a specific editor instead of auto-detecting one
    #[must_use]
    pub fn editor(mut self, editor: Editor) -> Self {
        self.editor = Some(editor);
        self
    }

    /// Use an explicit live settings file instead of the platform default
    #[must_use]
    pub fn settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(expand_home(path.into()));
        self
    }

    /// Build the SyncConfig
    ///
    /// If `config_dir` is not set, uses `~/.vscode-sync`.
    #[must_use]
    pub fn build(self) -> SyncConfig {
        let config_dir = self.config_dir.unwrap_or_else(default_config_dir);
        let presets_dir = self
            .presets_dir
            .unwrap_or_else(|| config_dir.join("presets"));
        let backup_dir = self
            .backup_dir
            .unwrap_or_else(|| config_dir.join("backups"));

        SyncConfig {
            config_dir,
            presets_dir,
            backup_dir,
            auto_backup: self.auto_backup,
            backup_retention_days: self.backup_retention_days,
            default_export_format: self.default_export_format,
            confirm_destructive_actions: self.confirm_destructive_actions,
            editor: self.editor,
            settings_path: self.settings_path,
        }
    }
}

fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Expand a leading `~` to the home directory
fn expand_home(path: PathBuf) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(path.strip_prefix("~").unwrap_or(&path));
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builder_defaults() {
        let config = SyncConfig::builder().config_dir("/tmp/sync").build();

        assert_eq!(config.presets_dir, PathBuf::from("/tmp/sync/presets"));
        assert_eq!(config.backup_dir, PathBuf::from("/tmp/sync/backups"));
        assert!(config.auto_backup);
        assert_eq!(config.backup_retention_days, 30);
        assert_eq!(config.default_export_format, BundleFormat::Json);
        assert!(config.editor.is_none());
    }

    #[test]
    fn test_builder_with_options() {
        let config = SyncConfig::builder()
            .config_dir("/tmp/sync")
            .backup_dir("/tmp/elsewhere")
            .backup_retention_days(7)
            .editor(Editor::Cursor)
            .default_export_format(BundleFormat::Zip)
            .build();

        assert_eq!(config.backup_dir, PathBuf::from("/tmp/elsewhere"));
        assert_eq!(config.retention(), Duration::from_secs(7 * 86_400));
        assert_eq!(config.editor, Some(Editor::Cursor));
        assert_eq!(config.default_export_format, BundleFormat::Zip);
    }

    #[test]
    fn test_tilde_expansion() {
        if let Some(home) = dirs::home_dir() {
            let config = SyncConfig::builder().config_dir("~/sync-root").build();
            assert_eq!(config.config_dir, home.join("sync-root"));
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let config = SyncConfig::builder()
            .config_dir(temp.path())
            .auto_backup(false)
            .build();

        config.save(&config.config_file()).unwrap();
        let loaded = SyncConfig::load(&config.config_file());

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_malformed_falls_back_to_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ broken").unwrap();

        let loaded = SyncConfig::load(&path);
        assert!(loaded.auto_backup);
        assert_eq!(loaded.backup_retention_days, DEFAULT_RETENTION_DAYS);
    }

    #[test]
    fn test_load_partial_document() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"backup_retention_days": 3, "verbose": true}"#).unwrap();

        let loaded = SyncConfig::load(&path);
        assert_eq!(loaded.backup_retention_days, 3);
        assert!(loaded.auto_backup);
    }

    #[test]
    fn test_ensure_dirs() {
        let temp = tempdir().unwrap();
        let config = SyncConfig::builder()
            .config_dir(temp.path().join("root"))
            .build();

        config.ensure_dirs().unwrap();
        assert!(config.presets_dir.is_dir());
        assert!(config.backup_dir.is_dir());
    }
}
