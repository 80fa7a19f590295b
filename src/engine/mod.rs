//! Synchronization engine
//!
//! [`SyncEngine`] ties the pieces together:
//!
//! - **Export**: collect live extensions and settings, build a
//!   [`ConfigBundle`](crate::ConfigBundle), encode it.
//! - **Import**: decode a bundle, back up the live settings, install the
//!   bundle's extensions, replace the live settings.
//!
//! The editor is reached only through [`EditorControl`], so the engine can
//! be driven against a fake editor in tests.
//!
//! # Import steps
//!
//! ```text
//! Start ─► [Backup?] ─► [InstallExtensions?] ─► [WriteSettings?] ─► Done
//! ```
//!
//! Each step is independently enabled by [`ImportOptions`]. There is no
//! rollback: extensions installed before a failed settings write stay
//! installed. Only the settings write itself is all-or-nothing.

mod export;
mod import;
#[cfg(test)]
pub(crate) mod testing;
mod types;

pub use types::{
    BackupStep, CollectedState, ExportOptions, ExportReport, ExtensionFailure, ExtensionsStep,
    ImportOptions, ImportOutcome, ImportReport, SettingsStep, StatusReport,
};

use crate::backup::BackupManager;
use crate::bundle::BundleFormat;
use crate::config::SyncConfig;
use crate::editor::{Editor, EditorCli, EditorControl};
use crate::error::{Error, Result};
use crate::platform::{self, Os};
use crate::settings::read_settings_document;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Orchestrates export and import against one editor installation
#[derive(Debug)]
pub struct SyncEngine<E: EditorControl> {
    editor: E,
    os: Os,
    settings_path: PathBuf,
    backups: BackupManager,
    default_format: BundleFormat,
    auto_backup: bool,
}

impl<E: EditorControl> SyncEngine<E> {
    /// Start building an engine around `editor`
    pub fn builder(editor: E) -> SyncEngineBuilder<E> {
        SyncEngineBuilder::new(editor)
    }

    /// The driven editor
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Operating system tag stamped into exported bundles
    pub fn os(&self) -> Os {
        self.os
    }

    /// Live settings document this engine reads and replaces
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// Import options matching the configuration (`auto_backup`)
    pub fn default_import_options(&self) -> ImportOptions {
        ImportOptions::all().backup(self.auto_backup)
    }

    /// Gather the live extensions and settings
    ///
    /// Never fails: an unreachable editor yields no extensions and a missing
    /// or malformed settings document yields no settings, each with a warning.
    pub fn collect_current(&self) -> CollectedState {
        let mut warnings = Vec::new();

        let extensions = match self.editor.list_extensions() {
            Ok(extensions) => extensions,
            Err(e) => {
                warn!("Could not list installed extensions: {e}");
                warnings.push(format!("Could not list installed extensions: {e}"));
                Vec::new()
            }
        };

        if !self.settings_path.exists() {
            warnings.push(format!(
                "Settings file not found at {}",
                self.settings_path.display()
            ));
        }
        let settings = read_settings_document(&self.settings_path);

        debug!(
            "Collected {} extensions and {} settings",
            extensions.len(),
            settings.len()
        );
        CollectedState {
            extensions,
            settings,
            warnings,
        }
    }

    /// Report editor availability and settings location; never fails
    pub fn status(&self) -> StatusReport {
        let editor_version = self.editor.version().ok();
        let editor_available = editor_version.is_some();
        let extensions = if editor_available {
            self.editor.list_extensions().ok().map(|list| list.len())
        } else {
            None
        };

        StatusReport {
            editor: self.editor.executable().to_string(),
            editor_available,
            editor_version,
            settings_path: self.settings_path.clone(),
            settings_found: self.settings_path.is_file(),
            extensions,
        }
    }

    /// Remove backups older than the retention window
    pub fn prune_backups(&self) -> Result<Vec<PathBuf>> {
        self.backups.cleanup_old_backups()
    }
}

impl SyncEngine<EditorCli> {
    /// Engine driving the real editor CLI selected by `config`
    ///
    /// # Errors
    ///
    /// - [`Error::ExternalToolUnavailable`] / [`Error::AmbiguousEditor`] from
    ///   editor selection
    /// - [`Error::UnsupportedPlatform`] if the settings location is unknown
    pub fn from_config(config: &SyncConfig) -> Result<Self> {
        let editor = Editor::select(config.editor)?;
        SyncEngine::builder(EditorCli::new(editor))
            .config(config)
            .target(editor)
            .build()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`SyncEngine`]
#[derive(Debug)]
pub struct SyncEngineBuilder<E: EditorControl> {
    editor: E,
    config: SyncConfig,
    target: Option<Editor>,
    os: Os,
    settings_path: Option<PathBuf>,
}

impl<E: EditorControl> SyncEngineBuilder<E> {
    fn new(editor: E) -> Self {
        Self {
            editor,
            config: SyncConfig::default(),
            target: None,
            os: Os::detect(),
            settings_path: None,
        }
    }

    /// Take backup, format and path settings from `config`
    #[must_use]
    pub fn config(mut self, config: &SyncConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Editor whose settings location is used (defaults to the configured
    /// editor, then VS Code)
    #[must_use]
    pub fn target(mut self, editor: Editor) -> Self {
        self.target = Some(editor);
        self
    }

    /// Override the detected operating system
    #[must_use]
    pub fn os(mut self, os: Os) -> Self {
        self.os = os;
        self
    }

    /// Use an explicit live settings document
    #[must_use]
    pub fn settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Build the engine
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] when no settings path was given
    /// and none is known for this system.
    pub fn build(self) -> Result<SyncEngine<E>> {
        let target = self
            .target
            .or(self.config.editor)
            .unwrap_or(Editor::VsCode);

        let settings_path = match self
            .settings_path
            .or_else(|| self.config.settings_path.clone())
        {
            Some(path) => path,
            None => platform::settings_path(self.os, target).ok_or_else(|| {
                Error::UnsupportedPlatform(format!(
                    "no {} settings location known for {}",
                    target, self.os
                ))
            })?,
        };

        debug!(
            "Sync engine for {} using {}",
            self.editor.executable(),
            settings_path.display()
        );

        Ok(SyncEngine {
            editor: self.editor,
            os: self.os,
            settings_path,
            backups: BackupManager::from_config(&self.config),
            default_format: self.config.default_export_format,
            auto_backup: self.config.auto_backup,
        })
    }
}
