//! Error types for vscode-sync

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Result type alias for vscode-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for vscode-sync
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read directory '{path}': {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete file '{path}': {source}")]
    FileDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Bundle Errors
    // -------------------------------------------------------------------------
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed JSON in '{origin}': {source}")]
    MalformedJson {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Archive '{archive}' has no '{entry}' entry")]
    MissingEntry { archive: PathBuf, entry: String },

    #[error("Archive error: {0}")]
    Archive(String),

    #[cfg(feature = "zip")]
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Write to '{path}' failed: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    // -------------------------------------------------------------------------
    // Editor Errors
    // -------------------------------------------------------------------------
    #[error("Editor CLI unavailable: {0}")]
    ExternalToolUnavailable(String),

    #[error("Command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("Failed to install extension '{id}': {reason}")]
    ExtensionInstall { id: String, reason: String },

    #[error("'{operation}' timed out after {}s", .timeout.as_secs())]
    Timeout {
        operation: String,
        timeout: Duration,
    },

    #[error("Several editors are installed ({0}), choose one explicitly")]
    AmbiguousEditor(String),

    // -------------------------------------------------------------------------
    // Preset Errors
    // -------------------------------------------------------------------------
    #[error("Preset '{0}' not found")]
    PresetNotFound(String),

    #[error("Invalid preset name: {0}")]
    InvalidPresetName(String),

    #[error("'{0}' is a built-in preset and cannot be modified")]
    BuiltinPreset(String),

    // -------------------------------------------------------------------------
    // Backup Errors
    // -------------------------------------------------------------------------
    #[error("Backup failed: {0}")]
    BackupFailed(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Wizard Errors
    // -------------------------------------------------------------------------
    #[error("Invalid wizard transition: {0}")]
    InvalidTransition(String),
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::PresetNotFound(_))
    }

    /// Check if this error came from decoding a bundle
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        match self {
            Error::NotFound(_)
            | Error::MalformedJson { .. }
            | Error::MissingEntry { .. }
            | Error::Archive(_) => true,
            #[cfg(feature = "zip")]
            Error::Zip(_) => true,
            _ => false,
        }
    }

    /// Check if this is a write failure
    #[must_use]
    pub fn is_write_error(&self) -> bool {
        matches!(self, Error::WriteFailed { .. } | Error::FileWrite { .. })
    }
}

// =============================================================================
// Filesystem Helper Functions
// =============================================================================
// These reduce repetitive map_err patterns across the crate.

/// Create a directory (and parents) with proper error handling
pub fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreate {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy a file with proper error handling
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64> {
    std::fs::copy(src, dest).map_err(|e| Error::FileWrite {
        path: dest.to_path_buf(),
        source: e,
    })
}

/// Write content to a file with proper error handling
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read directory entries with proper error handling
pub fn read_dir(path: &Path) -> Result<std::fs::ReadDir> {
    std::fs::read_dir(path).map_err(|e| Error::DirectoryRead {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(Error::NotFound("x.json".into()).is_not_found());
        assert!(Error::PresetNotFound("web".into()).is_not_found());
        assert!(!Error::Config("bad".into()).is_not_found());

        let malformed = serde_json::from_str::<serde_json::Value>("not a json").unwrap_err();
        let err = Error::MalformedJson {
            origin: "bundle.json".into(),
            source: malformed,
        };
        assert!(err.is_decode_error());
        assert!(!err.is_write_error());

        let err = Error::WriteFailed {
            path: PathBuf::from("/nope"),
            reason: "denied".into(),
        };
        assert!(err.is_write_error());
    }

    #[test]
    fn test_timeout_message() {
        let err = Error::Timeout {
            operation: "code --install-extension a.b".into(),
            timeout: Duration::from_secs(60),
        };
        assert_eq!(
            err.to_string(),
            "'code --install-extension a.b' timed out after 60s"
        );
    }
}
