//! JSON document storage
//!
//! Every document this crate persists (live settings, user presets, the
//! tool's own `config.json`) goes through [`JsonStorage`].

use crate::error::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

/// JSON storage backend
#[derive(Debug, Clone, Copy)]
pub struct JsonStorage {
    /// Pretty print JSON output
    pretty: bool,
}

impl Default for JsonStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonStorage {
    /// Create a new JSON storage backend with pretty printing enabled
    #[must_use]
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a compact JSON storage (no pretty printing)
    #[must_use]
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Serialize data to string
    pub fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(data).map_err(Error::from)
        } else {
            serde_json::to_string(data).map_err(Error::from)
        }
    }

    /// Deserialize data from string
    ///
    /// Parse failures are reported as [`Error::MalformedJson`] tagged with `origin`.
    pub fn deserialize<T: DeserializeOwned>(&self, content: &str, origin: &str) -> Result<T> {
        serde_json::from_str(content).map_err(|e| Error::MalformedJson {
            origin: origin.to_string(),
            source: e,
        })
    }

    /// Read and deserialize from file
    pub fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.deserialize(&content, &path.display().to_string())
    }

    /// Serialize and write to file
    ///
    /// Uses atomic write: writes to temp file then renames to prevent corruption.
    pub fn write<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let content = self.serialize(data)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            crate::error::create_dir(parent)?;
        }

        // Use .tmp suffix append to preserve original filename fully
        let file_name = path.file_name().ok_or_else(|| {
            Error::Config(format!(
                "Invalid path '{}': must have a filename",
                path.display()
            ))
        })?;
        let mut temp_filename = file_name.to_os_string();
        temp_filename.push(".tmp");
        let temp_path = path.with_file_name(temp_filename);

        crate::error::write_file(&temp_path, &content)?;

        std::fs::rename(&temp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            Error::FileWrite {
                path: path.to_path_buf(),
                source: e,
            }
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
