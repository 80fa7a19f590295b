//! Import: bundle to live state

use super::{
    BackupStep, ExtensionFailure, ExtensionsStep, ImportOptions, ImportOutcome, ImportReport,
    SettingsStep, SyncEngine,
};
use crate::backup::SnapshotOutcome;
use crate::bundle::{self, ConfigBundle};
use crate::editor::EditorControl;
use crate::error::Result;
use crate::settings::write_settings_document;
use log::{error, info, warn};
use std::path::Path;

impl<E: EditorControl> SyncEngine<E> {
    /// Decode the bundle at `source` and apply it
    ///
    /// Decoding happens before anything else, so a missing or malformed
    /// bundle leaves the live system untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`](crate::Error::NotFound),
    ///   [`Error::MalformedJson`](crate::Error::MalformedJson) or
    ///   [`Error::MissingEntry`](crate::Error::MissingEntry) from decoding
    /// - [`Error::BackupFailed`](crate::Error::BackupFailed) if the requested
    ///   backup could not be taken
    pub fn import(&self, source: &Path, options: &ImportOptions) -> Result<ImportReport> {
        let bundle = bundle::decode(source)?;
        info!("Importing configuration from {}", source.display());
        self.apply(&bundle, options)
    }

    /// Apply an already decoded bundle
    ///
    /// Step failures (extension installs, the settings write) are recorded in
    /// the report rather than returned. Only a failed backup aborts, and it
    /// does so before any change is made.
    pub fn apply(&self, bundle: &ConfigBundle, options: &ImportOptions) -> Result<ImportReport> {
        let backup = if options.backup_first {
            match self.backups.snapshot(&self.settings_path)? {
                SnapshotOutcome::Created(record) => BackupStep::Created { record },
                SnapshotOutcome::Skipped => BackupStep::NothingToBackup,
            }
        } else {
            BackupStep::Disabled
        };

        let extensions = if options.apply_extensions {
            self.install_extensions(&bundle.unique_extensions())
        } else {
            ExtensionsStep::Disabled
        };

        let settings = if options.apply_settings {
            self.replace_settings(bundle)
        } else {
            SettingsStep::Disabled
        };

        let report = ImportReport {
            backup,
            extensions,
            settings,
        };

        match report.outcome() {
            ImportOutcome::Success => info!("Import completed"),
            ImportOutcome::Partial => warn!(
                "Import partially completed: {}",
                report.warnings().join("; ")
            ),
            ImportOutcome::Failed => error!("Import failed: {}", report.warnings().join("; ")),
        }
        Ok(report)
    }

    /// Install each extension in order; one failure never stops the rest
    fn install_extensions(&self, ids: &[String]) -> ExtensionsStep {
        let mut installed = Vec::new();
        let mut failed = Vec::new();

        if !ids.is_empty() && !self.editor.is_available() {
            let reason = format!("{} is not available", self.editor.executable());
            warn!("{reason}; skipping {} extension(s)", ids.len());
            failed = ids
                .iter()
                .map(|id| ExtensionFailure {
                    id: id.clone(),
                    reason: reason.clone(),
                })
                .collect();
            return ExtensionsStep::Completed { installed, failed };
        }

        for id in ids {
            match self.editor.install_extension(id) {
                Ok(()) => {
                    info!("Installed {id}");
                    installed.push(id.clone());
                }
                Err(e) => {
                    warn!("Failed to install {id}: {e}");
                    failed.push(ExtensionFailure {
                        id: id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Extensions: {} installed, {} failed",
            installed.len(),
            failed.len()
        );
        ExtensionsStep::Completed { installed, failed }
    }

    /// Replace the whole live settings document
    fn replace_settings(&self, bundle: &ConfigBundle) -> SettingsStep {
        if bundle.settings.is_empty() {
            return SettingsStep::Skipped {
                reason: "bundle contains no settings".to_string(),
            };
        }

        match write_settings_document(&self.settings_path, &bundle.settings) {
            Ok(()) => {
                info!(
                    "Settings written to {}",
                    self.settings_path.display()
                );
                SettingsStep::Written {
                    path: self.settings_path.clone(),
                    count: bundle.settings.len(),
                }
            }
            Err(e) => {
                error!("{e}");
                SettingsStep::Failed {
                    path: self.settings_path.clone(),
                    reason: e.to_string(),
                }
            }
        }
    }
}
