//! Live settings document access
//!
//! The editor's `settings.json` is read leniently (missing or malformed
//! documents read as empty) and written atomically as a whole.

use crate::error::{Error, Result};
use crate::storage::JsonStorage;
use log::{debug, warn};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A settings document: dotted key to opaque JSON value
pub type SettingsMap = Map<String, Value>;

/// Read the settings document at `path`
///
/// Returns an empty mapping when the file is missing, unreadable, not valid
/// JSON, or not a JSON object. Problems are logged, never raised.
#[must_use]
pub fn read_settings_document(path: &Path) -> SettingsMap {
    if !path.exists() {
        debug!("Settings file not found at {}", path.display());
        return SettingsMap::new();
    }

    match JsonStorage::new().read::<Value>(path) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!(
                "Settings at {} is not a JSON object (found {}), treating as empty",
                path.display(),
                json_kind(&other)
            );
            SettingsMap::new()
        }
        Err(e) => {
            warn!("Error reading settings: {e}");
            SettingsMap::new()
        }
    }
}

/// Replace the settings document at `path` with `settings`
///
/// The write is atomic: either the whole document lands or the previous
/// file is left as it was. The parent directory is created if needed. A
/// symlinked document is written through the link, which stays in place.
///
/// # Errors
///
/// Returns [`Error::WriteFailed`] carrying the underlying reason.
pub fn write_settings_document(path: &Path, settings: &SettingsMap) -> Result<()> {
    let target = resolve_link(path);
    JsonStorage::new()
        .write(&target, settings)
        .map_err(|e| Error::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Follow `path` to the file it links to; dangling links are written over
fn resolve_link(path: &Path) -> PathBuf {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match std::fs::canonicalize(path) {
            Ok(target) => {
                debug!(
                    "Writing settings through link {} -> {}",
                    path.display(),
                    target.display()
                );
                target
            }
            Err(e) => {
                warn!("Settings link {} is dangling ({e}), replacing it", path.display());
                path.to_path_buf()
            }
        },
        _ => path.to_path_buf(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
