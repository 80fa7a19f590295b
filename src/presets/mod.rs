//! Preset templates
//!
//! A [`Preset`] is a named starting point of extensions and settings. The
//! [`PresetCatalog`] combines the built-in presets with user presets stored
//! as one JSON document per name:
//!
//! ```text
//! ~/.vscode-sync/presets/
//! ├── my-rust-setup.json
//! └── work.json
//! ```

mod builtin;
mod catalog;

pub use catalog::PresetCatalog;

use crate::bundle::{BundleMetadata, ConfigBundle, dedupe_extensions};
use crate::platform::Os;
use crate::settings::SettingsMap;
use serde::{Deserialize, Serialize};

/// A named template of extensions and settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Display name
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Kind of development the preset targets (`frontend`, `custom`, ...)
    #[serde(default)]
    pub dev_type: String,

    #[serde(default)]
    pub languages: Vec<String>,

    /// Extension identifiers; may contain duplicates in stored documents
    #[serde(default)]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub settings: SettingsMap,

    /// Stamped on every save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Preset {
    /// Create an empty preset with a display name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the extension list
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the settings mapping
    #[must_use]
    pub fn with_settings(mut self, settings: SettingsMap) -> Self {
        self.settings = settings;
        self
    }

    /// Extensions with duplicates removed, first occurrence kept
    #[must_use]
    pub fn unique_extensions(&self) -> Vec<String> {
        dedupe_extensions(self.extensions.iter().cloned())
    }

    /// Build an importable bundle from this preset
    #[must_use]
    pub fn to_bundle(&self) -> ConfigBundle {
        ConfigBundle::new(
            BundleMetadata::fresh(Os::detect()),
            self.unique_extensions(),
            self.settings.clone(),
        )
    }
}

/// Validate a user preset name
///
/// Preset names become file names, so they must:
/// - Not be empty
/// - Not start with a dot
/// - Not contain path separators or `..`
/// - Only contain alphanumeric characters, underscores, and hyphens
pub fn validate_preset_name(name: &str) -> crate::Result<()> {
    use crate::Error;

    if name.is_empty() {
        return Err(Error::InvalidPresetName(
            "Preset name cannot be empty".to_string(),
        ));
    }

    if name.starts_with('.') {
        return Err(Error::InvalidPresetName(format!(
            "{name}: Preset name cannot start with a dot"
        )));
    }

    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(Error::InvalidPresetName(format!(
            "{name}: Preset name cannot contain path separators"
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(Error::InvalidPresetName(format!(
            "{name}: Preset name can only contain alphanumeric characters, underscores, and hyphens"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_preset_name() {
        assert!(validate_preset_name("my-setup_2").is_ok());
        assert!(validate_preset_name("").is_err());
        assert!(validate_preset_name(".hidden").is_err());
        assert!(validate_preset_name("../escape").is_err());
        assert!(validate_preset_name("a/b").is_err());
        assert!(validate_preset_name("has space").is_err());
    }

    #[test]
    fn test_to_bundle_dedupes_extensions() {
        let preset = Preset::new("Dupes")
            .with_extensions(["a.one", "b.two", "a.one"])
            .with_settings(json!({"editor.tabSize": 2}).as_object().unwrap().clone());

        let bundle = preset.to_bundle();
        assert_eq!(bundle.extensions, vec!["a.one", "b.two"]);
        assert_eq!(bundle.settings["editor.tabSize"], json!(2));
        assert!(!bundle.metadata.vscode_sync_version.is_empty());
    }

    #[test]
    fn test_preset_document_ignores_unknown_fields() {
        let preset: Preset = serde_json::from_value(json!({
            "name": "Mine",
            "extensions": ["x.y"],
            "theme": "dark"
        }))
        .unwrap();
        assert_eq!(preset.name, "Mine");
        assert_eq!(preset.extensions, vec!["x.y"]);
        assert!(preset.created_at.is_none());
    }
}
