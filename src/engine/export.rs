//! Export: live state to bundle

use super::{ExportOptions, ExportReport, SyncEngine};
use crate::bundle::{self, BundleFormat, BundleMetadata, ConfigBundle};
use crate::editor::EditorControl;
use crate::error::Result;
use crate::settings::SettingsMap;
use log::{info, warn};
use std::path::Path;

impl<E: EditorControl> SyncEngine<E> {
    /// Export the live configuration to `destination`
    ///
    /// The format follows the destination extension (`.zip` or `.json`),
    /// falling back to the configured default.
    ///
    /// # Errors
    ///
    /// Fails only if the bundle cannot be written
    /// ([`Error::WriteFailed`](crate::Error::WriteFailed)).
    pub fn export(&self, destination: &Path) -> Result<ExportReport> {
        self.export_with(destination, &ExportOptions::default())
    }

    /// Export with explicit options
    pub fn export_with(&self, destination: &Path, options: &ExportOptions) -> Result<ExportReport> {
        let format = options
            .format
            .or_else(|| BundleFormat::from_path(destination))
            .unwrap_or(self.default_format);

        let mut current = self.collect_current();
        if current.extensions.is_empty() {
            warn!("No extensions found; exporting an empty extension list");
            current
                .warnings
                .push("No extensions found; the bundle lists none".to_string());
        }

        let settings = if options.include_settings {
            current.settings
        } else {
            SettingsMap::new()
        };

        let bundle = ConfigBundle::new(
            BundleMetadata::fresh(self.os),
            current.extensions,
            settings,
        );

        let attachment = options
            .include_settings
            .then_some(self.settings_path.as_path());
        let path = bundle::encode_with_attachment(&bundle, destination, format, attachment)?;

        info!(
            "Exported {} extensions and {} settings",
            bundle.extensions.len(),
            bundle.settings.len()
        );

        Ok(ExportReport {
            path,
            format,
            extension_count: bundle.extensions.len(),
            setting_count: bundle.settings.len(),
            warnings: current.warnings,
        })
    }
}
