//! Bundle encoding and decoding
//!
//! # Formats
//!
//! ```text
//! setup.json            # the bundle document itself
//!
//! setup.zip
//! ├── vscode_config.json   # the bundle document (canonical entry)
//! └── settings.json        # raw copy of the live settings (optional, never re-read)
//! ```
//!
//! Encoding goes through a temporary file in the destination directory that
//! is renamed into place, so a failed encode never leaves a partial bundle.

use super::types::{BundleFormat, ConfigBundle};
use crate::error::{Error, Result};
use log::{debug, info};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Canonical archive entry holding the bundle document
pub const BUNDLE_ENTRY_NAME: &str = "vscode_config.json";

/// Archive entry holding the raw live settings copy
pub const SETTINGS_ENTRY_NAME: &str = "settings.json";

/// Encode `bundle` to `target` in the given format
///
/// # Errors
///
/// Returns [`Error::WriteFailed`] if the destination cannot be written.
pub fn encode(bundle: &ConfigBundle, target: &Path, format: BundleFormat) -> Result<PathBuf> {
    encode_with_attachment(bundle, target, format, None)
}

/// Encode `bundle`, adding a raw copy of `raw_settings` to ZIP bundles
///
/// The attachment is ignored for JSON bundles and skipped if the file does
/// not exist.
///
/// # Errors
///
/// Returns [`Error::WriteFailed`] if the destination cannot be written.
pub fn encode_with_attachment(
    bundle: &ConfigBundle,
    target: &Path,
    format: BundleFormat,
    raw_settings: Option<&Path>,
) -> Result<PathBuf> {
    let document = serde_json::to_string_pretty(bundle)?;

    let written = write_atomically(target, |file| match format {
        BundleFormat::Json => {
            file.write_all(document.as_bytes())
                .and_then(|()| file.write_all(b"\n"))
                .map_err(|e| Error::FileWrite {
                    path: target.to_path_buf(),
                    source: e,
                })
        }
        BundleFormat::Zip => write_zip(file, &document, raw_settings),
    });

    written.map_err(|e| match e {
        e @ Error::WriteFailed { .. } => e,
        other => Error::WriteFailed {
            path: target.to_path_buf(),
            reason: other.to_string(),
        },
    })?;

    info!("Configuration exported to {}", target.display());
    Ok(target.to_path_buf())
}

/// Decode a bundle from `source`
///
/// ZIP bundles are recognized by their `.zip` extension or their signature.
///
/// # Errors
///
/// - [`Error::NotFound`] if `source` does not exist
/// - [`Error::MalformedJson`] if the document is not a valid bundle
/// - [`Error::MissingEntry`] if a ZIP lacks the canonical entry
pub fn decode(source: &Path) -> Result<ConfigBundle> {
    if !source.exists() {
        return Err(Error::NotFound(format!(
            "input file {}",
            source.display()
        )));
    }

    let bytes = std::fs::read(source).map_err(|e| Error::FileRead {
        path: source.to_path_buf(),
        source: e,
    })?;

    let bundle = if is_zip(source, &bytes) {
        decode_zip(source, bytes)?
    } else {
        parse_document(&bytes, &source.display().to_string())?
    };

    debug!(
        "Decoded bundle from {}: {} extensions, {} settings",
        source.display(),
        bundle.extensions.len(),
        bundle.settings.len()
    );
    Ok(bundle)
}

fn parse_document(bytes: &[u8], origin: &str) -> Result<ConfigBundle> {
    serde_json::from_slice(bytes).map_err(|e| Error::MalformedJson {
        origin: origin.to_string(),
        source: e,
    })
}

fn is_zip(path: &Path, bytes: &[u8]) -> bool {
    BundleFormat::from_path(path) == Some(BundleFormat::Zip)
        || bytes.starts_with(b"PK\x03\x04")
        || bytes.starts_with(b"PK\x05\x06")
}

fn write_atomically(target: &Path, fill: impl FnOnce(&mut File) -> Result<()>) -> Result<()> {
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| Error::WriteFailed {
        path: target.to_path_buf(),
        reason: e.to_string(),
    })?;

    fill(temp.as_file_mut())?;

    temp.persist(target).map_err(|e| Error::WriteFailed {
        path: target.to_path_buf(),
        reason: e.error.to_string(),
    })?;
    Ok(())
}

// =============================================================================
// ZIP form
// =============================================================================

#[cfg(feature = "zip")]
fn write_zip(file: &mut File, document: &str, raw_settings: Option<&Path>) -> Result<()> {
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    zip.start_file(BUNDLE_ENTRY_NAME, options)?;
    zip.write_all(document.as_bytes())
        .map_err(|e| Error::Archive(e.to_string()))?;

    if let Some(raw) = raw_settings.filter(|p| p.exists()) {
        let mut source = File::open(raw).map_err(|e| Error::FileRead {
            path: raw.to_path_buf(),
            source: e,
        })?;
        zip.start_file(SETTINGS_ENTRY_NAME, options)?;
        std::io::copy(&mut source, &mut zip).map_err(|e| Error::FileRead {
            path: raw.to_path_buf(),
            source: e,
        })?;
        debug!("Added raw settings copy from {}", raw.display());
    }

    zip.finish()?;
    Ok(())
}

#[cfg(feature = "zip")]
fn decode_zip(source: &Path, bytes: Vec<u8>) -> Result<ConfigBundle> {
    use std::io::{Cursor, Read};
    use zip::ZipArchive;
    use zip::result::ZipError;

    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entry = archive.by_name(BUNDLE_ENTRY_NAME).map_err(|e| match e {
        ZipError::FileNotFound => Error::MissingEntry {
            archive: source.to_path_buf(),
            entry: BUNDLE_ENTRY_NAME.to_string(),
        },
        other => Error::Zip(other),
    })?;

    let mut contents = Vec::new();
    entry.read_to_end(&mut contents).map_err(|e| Error::FileRead {
        path: source.to_path_buf(),
        source: e,
    })?;

    parse_document(
        &contents,
        &format!("{}!{}", source.display(), BUNDLE_ENTRY_NAME),
    )
}

#[cfg(not(feature = "zip"))]
fn write_zip(_file: &mut File, _document: &str, _raw_settings: Option<&Path>) -> Result<()> {
    Err(Error::Archive("zip support not enabled".to_string()))
}

#[cfg(not(feature = "zip"))]
fn decode_zip(_source: &Path, _bytes: Vec<u8>) -> Result<ConfigBundle> {
    Err(Error::Archive("zip support not enabled".to_string()))
}

// =============================================================================
// Tests
// =============================================================================
