//! Engine option and report types

use crate::backup::BackupRecord;
use crate::bundle::BundleFormat;
use crate::settings::SettingsMap;
use serde::Serialize;
use std::path::PathBuf;

// =============================================================================
// Export
// =============================================================================

/// Options for [`SyncEngine::export_with`](super::SyncEngine::export_with)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Output format; inferred from the destination extension when `None`
    pub format: Option<BundleFormat>,

    /// Include the live settings (an empty mapping is exported otherwise)
    pub include_settings: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: None,
            include_settings: true,
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the output format
    #[must_use]
    pub fn format(mut self, format: BundleFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Include or leave out the live settings
    #[must_use]
    pub fn include_settings(mut self, include: bool) -> Self {
        self.include_settings = include;
        self
    }
}

/// What an export wrote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub path: PathBuf,
    pub format: BundleFormat,
    pub extension_count: usize,
    pub setting_count: usize,
    /// Degraded collection steps (editor unavailable, settings missing, ...)
    pub warnings: Vec<String>,
}

/// Live state gathered from the editor and the settings document
///
/// Collection never fails; problems are recorded as warnings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedState {
    pub extensions: Vec<String>,
    pub settings: SettingsMap,
    pub warnings: Vec<String>,
}

// =============================================================================
// Import
// =============================================================================

/// Which import steps run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportOptions {
    /// Install every extension listed in the bundle
    pub apply_extensions: bool,

    /// Replace the live settings document with the bundle's settings
    pub apply_settings: bool,

    /// Snapshot the live settings document before any change
    pub backup_first: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self::all()
    }
}

impl ImportOptions {
    /// Every step enabled, with backup
    #[must_use]
    pub const fn all() -> Self {
        Self {
            apply_extensions: true,
            apply_settings: true,
            backup_first: true,
        }
    }

    #[must_use]
    pub fn extensions(mut self, enabled: bool) -> Self {
        self.apply_extensions = enabled;
        self
    }

    #[must_use]
    pub fn settings(mut self, enabled: bool) -> Self {
        self.apply_settings = enabled;
        self
    }

    #[must_use]
    pub fn backup(mut self, enabled: bool) -> Self {
        self.backup_first = enabled;
        self
    }
}

/// Result of the backup step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BackupStep {
    /// Not requested
    Disabled,
    /// Requested, but there was no live settings document
    NothingToBackup,
    /// Backup written before any change
    Created { record: BackupRecord },
}

/// A single extension that could not be installed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionFailure {
    pub id: String,
    pub reason: String,
}

/// Result of the extension step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtensionsStep {
    Disabled,
    /// Every extension was attempted, in bundle order
    Completed {
        installed: Vec<String>,
        failed: Vec<ExtensionFailure>,
    },
}

/// Result of the settings step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SettingsStep {
    Disabled,
    /// Requested but nothing to do; the live document was left alone
    Skipped { reason: String },
    /// The whole document was replaced
    Written { path: PathBuf, count: usize },
    /// Nothing was written
    Failed { path: PathBuf, reason: String },
}

/// Overall result of an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportOutcome {
    /// Every requested step succeeded
    Success,
    /// Some requested work failed, some succeeded
    Partial,
    /// Requested work failed and nothing succeeded
    Failed,
}

/// Per-step report of an import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub backup: BackupStep,
    pub extensions: ExtensionsStep,
    pub settings: SettingsStep,
}

impl ImportReport {
    /// Extensions installed successfully
    #[must_use]
    pub fn installed(&self) -> &[String] {
        match &self.extensions {
            ExtensionsStep::Completed { installed, .. } => installed,
            ExtensionsStep::Disabled => &[],
        }
    }

    /// Extensions that failed to install
    #[must_use]
    pub fn failed(&self) -> &[ExtensionFailure] {
        match &self.extensions {
            ExtensionsStep::Completed { failed, .. } => failed,
            ExtensionsStep::Disabled => &[],
        }
    }

    /// Backup taken before the import, if any
    #[must_use]
    pub fn backup_record(&self) -> Option<&BackupRecord> {
        match &self.backup {
            BackupStep::Created { record } => Some(record),
            _ => None,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> ImportOutcome {
        let settings_failed = matches!(self.settings, SettingsStep::Failed { .. });
        if self.failed().is_empty() && !settings_failed {
            return ImportOutcome::Success;
        }

        let settings_written = matches!(self.settings, SettingsStep::Written { .. });
        if !self.installed().is_empty() || settings_written {
            ImportOutcome::Partial
        } else {
            ImportOutcome::Failed
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome() == ImportOutcome::Success
    }

    /// Human-readable reasons for everything that did not go to plan
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings: Vec<String> = self
            .failed()
            .iter()
            .map(|f| format!("Failed to install {}: {}", f.id, f.reason))
            .collect();

        match &self.settings {
            SettingsStep::Skipped { reason } => {
                warnings.push(format!("Settings not applied: {reason}"));
            }
            SettingsStep::Failed { path, reason } => {
                warnings.push(format!(
                    "Failed to write settings to {}: {reason}",
                    path.display()
                ));
            }
            SettingsStep::Disabled | SettingsStep::Written { .. } => {}
        }
        warnings
    }
}

// =============================================================================
// Status
// =============================================================================

/// Snapshot of the editor and settings situation on this machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Executable driven by the engine
    pub editor: String,
    pub editor_available: bool,
    pub editor_version: Option<String>,
    pub settings_path: PathBuf,
    pub settings_found: bool,
    /// Installed extension count, when the editor could be queried
    pub extensions: Option<usize>,
}
