//! Preset catalog: built-ins plus the user preset store

use super::{Preset, builtin, validate_preset_name};
use crate::config::SyncConfig;
use crate::editor::EditorControl;
use crate::engine::SyncEngine;
use crate::error::{Error, Result};
use crate::security::{ensure_secure_dir, set_secure_file_permissions};
use crate::storage::JsonStorage;
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Resolves presets by name, built-ins first
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    presets_dir: PathBuf,
    storage: JsonStorage,
}

impl PresetCatalog {
    /// Catalog storing user presets under `presets_dir`
    pub fn new(presets_dir: impl Into<PathBuf>) -> Self {
        Self {
            presets_dir: presets_dir.into(),
            storage: JsonStorage::new(),
        }
    }

    /// Catalog using the configured presets directory
    #[must_use]
    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(&config.presets_dir)
    }

    /// Directory holding user preset documents
    #[must_use]
    pub fn presets_dir(&self) -> &Path {
        &self.presets_dir
    }

    /// Whether `name` belongs to a built-in preset
    #[must_use]
    pub fn is_builtin(name: &str) -> bool {
        builtin::contains(name)
    }

    fn preset_path(&self, name: &str) -> PathBuf {
        self.presets_dir.join(format!("{name}.json"))
    }

    /// Resolve a preset by name
    ///
    /// A built-in preset is returned even when a user preset of the same name
    /// exists. Unreadable user documents are logged and treated as missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PresetNotFound`] if no preset has this name.
    pub fn resolve(&self, name: &str) -> Result<Preset> {
        if let Some(preset) = builtin::get(name) {
            debug!("Resolved built-in preset '{name}'");
            return Ok(preset.clone());
        }

        if validate_preset_name(name).is_err() {
            return Err(Error::PresetNotFound(name.to_string()));
        }

        let path = self.preset_path(name);
        if !path.exists() {
            return Err(Error::PresetNotFound(name.to_string()));
        }

        match self.storage.read::<Preset>(&path) {
            Ok(preset) => {
                debug!("Resolved user preset '{name}' from {}", path.display());
                Ok(preset)
            }
            Err(e) => {
                warn!("Ignoring unreadable preset '{name}': {e}");
                Err(Error::PresetNotFound(name.to_string()))
            }
        }
    }

    /// Names of all presets, built-in and user, sorted and deduplicated
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = builtin::names().map(str::to_string).collect();
        names.extend(self.user_presets());
        names.into_iter().collect()
    }

    /// Names of stored user presets, sorted
    #[must_use]
    pub fn user_presets(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.presets_dir) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| Some(path.file_stem()?.to_str()?.to_string()))
            .collect();
        names.sort();
        names
    }

    /// Persist a user preset, overwriting any previous one of this name
    ///
    /// The stored document is stamped with the current time; the stamped
    /// preset is returned.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPresetName`] if `name` is not a valid file name
    /// - [`Error::BuiltinPreset`] if `name` is reserved by a built-in
    pub fn save(&self, name: &str, preset: &Preset) -> Result<Preset> {
        validate_preset_name(name)?;
        if builtin::contains(name) {
            return Err(Error::BuiltinPreset(name.to_string()));
        }

        ensure_secure_dir(&self.presets_dir)?;

        let mut stamped = preset.clone();
        stamped.created_at = Some(crate::clock::iso8601(crate::clock::now()));

        let path = self.preset_path(name);
        self.storage.write(&path, &stamped)?;
        set_secure_file_permissions(&path)?;

        info!("Saved preset '{name}' to {}", path.display());
        Ok(stamped)
    }

    /// Delete a user preset
    ///
    /// Returns `false` for built-in names and presets that do not exist.
    pub fn delete(&self, name: &str) -> Result<bool> {
        if builtin::contains(name) {
            warn!("Refusing to delete built-in preset '{name}'");
            return Ok(false);
        }
        if validate_preset_name(name).is_err() {
            return Ok(false);
        }

        let path = self.preset_path(name);
        if !path.exists() {
            return Ok(false);
        }

        std::fs::remove_file(&path).map_err(|e| Error::FileDelete {
            path: path.clone(),
            source: e,
        })?;
        info!("Deleted preset '{name}'");
        Ok(true)
    }

    /// Save the live extensions and settings as a new user preset
    pub fn create_from_current<E: EditorControl>(
        &self,
        name: &str,
        description: &str,
        engine: &SyncEngine<E>,
    ) -> Result<Preset> {
        let current = engine.collect_current();
        let preset = Preset {
            name: name.to_string(),
            description: description.to_string(),
            dev_type: "custom".to_string(),
            languages: Vec::new(),
            extensions: current.extensions,
            settings: current.settings,
            created_at: None,
        };
        self.save(name, &preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_resolve_delete() {
        let temp = tempdir().unwrap();
        let catalog = PresetCatalog::new(temp.path().join("presets"));

        let saved = catalog
            .save("work", &Preset::new("Work").with_extensions(["a.b"]))
            .unwrap();
        assert!(saved.created_at.is_some());

        let resolved = catalog.resolve("work").unwrap();
        assert_eq!(resolved, saved);

        assert!(catalog.delete("work").unwrap());
        assert!(!catalog.delete("work").unwrap());
        assert!(catalog.resolve("work").unwrap_err().is_not_found());
    }

    #[test]
    fn test_save_overwrites_and_restamps() {
        let temp = tempdir().unwrap();
        let catalog = PresetCatalog::new(temp.path());

        let mut preset = Preset::new("Mine").with_extensions(["a.b"]);
        preset.created_at = Some("2000-01-01T00:00:00".into());
        catalog.save("mine", &preset).unwrap();
        catalog
            .save("mine", &Preset::new("Mine").with_extensions(["c.d"]))
            .unwrap();

        let resolved = catalog.resolve("mine").unwrap();
        assert_eq!(resolved.extensions, vec!["c.d"]);
        assert_ne!(resolved.created_at.as_deref(), Some("2000-01-01T00:00:00"));
    }

    #[test]
    fn test_builtin_names_are_reserved() {
        let temp = tempdir().unwrap();
        let catalog = PresetCatalog::new(temp.path());

        assert!(matches!(
            catalog.save("frontend", &Preset::new("Mine")).unwrap_err(),
            Error::BuiltinPreset(_)
        ));
        assert!(!catalog.delete("frontend").unwrap());
        assert_eq!(
            catalog.resolve("frontend").unwrap().name,
            "Frontend Development"
        );
    }

    #[test]
    fn test_builtin_wins_over_stored_document() {
        let temp = tempdir().unwrap();
        std::fs::write(
            temp.path().join("backend.json"),
            r#"{"name": "Shadow", "extensions": ["x.y"]}"#,
        )
        .unwrap();
        let catalog = PresetCatalog::new(temp.path());

        assert_eq!(catalog.resolve("backend").unwrap().name, "Backend Development");
    }

    #[test]
    fn test_list_merges_and_sorts() {
        let temp = tempdir().unwrap();
        let catalog = PresetCatalog::new(temp.path());
        catalog.save("alpha", &Preset::new("Alpha")).unwrap();
        catalog.save("zeta", &Preset::new("Zeta")).unwrap();
        std::fs::write(temp.path().join("mobile.json"), "{}").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(
            catalog.list(),
            vec![
                "alpha",
                "backend",
                "data-science",
                "frontend",
                "fullstack",
                "mobile",
                "zeta"
            ]
        );
    }

    #[test]
    fn test_list_without_store() {
        let temp = tempdir().unwrap();
        let catalog = PresetCatalog::new(temp.path().join("missing"));
        assert_eq!(catalog.list().len(), 5);
        assert!(catalog.user_presets().is_empty());
    }

    #[test]
    fn test_malformed_user_preset_is_not_found() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("broken.json"), "not a json").unwrap();
        let catalog = PresetCatalog::new(temp.path());

        assert!(matches!(
            catalog.resolve("broken").unwrap_err(),
            Error::PresetNotFound(_)
        ));
    }

    #[test]
    fn test_invalid_names() {
        let temp = tempdir().unwrap();
        let catalog = PresetCatalog::new(temp.path());

        assert!(matches!(
            catalog.save("../evil", &Preset::new("Evil")).unwrap_err(),
            Error::InvalidPresetName(_)
        ));
        assert!(catalog.resolve("../evil").unwrap_err().is_not_found());
        assert!(!catalog.delete("../evil").unwrap());
    }
}
