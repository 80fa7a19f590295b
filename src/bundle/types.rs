//! Bundle data model

use crate::platform::Os;
use crate::settings::SettingsMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

/// Version string stamped into exported bundles
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Informational metadata of a bundle; never validated on import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleMetadata {
    /// ISO-8601 creation timestamp
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: String,

    /// Operating system tag of the producing machine
    #[serde(default, deserialize_with = "lenient_text")]
    pub system: String,

    /// Version of the tool that produced the bundle
    #[serde(default, deserialize_with = "lenient_text")]
    pub vscode_sync_version: String,

    /// Unknown fields, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BundleMetadata {
    /// Metadata for a bundle created now on `os`
    #[must_use]
    pub fn fresh(os: Os) -> Self {
        Self {
            created_at: crate::clock::iso8601(crate::clock::now()),
            system: os.tag().to_string(),
            vscode_sync_version: TOOL_VERSION.to_string(),
            extra: Map::new(),
        }
    }
}

/// Strings pass through, `null` reads as empty, anything else is rendered as JSON text
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Anything other than an object reads as empty metadata
fn lenient_metadata<'de, D>(deserializer: D) -> Result<BundleMetadata, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        map @ Value::Object(_) => BundleMetadata::deserialize(map).map_err(D::Error::custom),
        _ => Ok(BundleMetadata::default()),
    }
}

/// The unit of transfer: extensions plus settings plus metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigBundle {
    #[serde(default, deserialize_with = "lenient_metadata")]
    pub metadata: BundleMetadata,

    /// Extension identifiers in collection order
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Dotted setting key to opaque JSON value
    #[serde(default)]
    pub settings: SettingsMap,
}

impl ConfigBundle {
    /// Build a bundle, dropping duplicate extension identifiers
    ///
    /// # Example
    /// ```rust
    /// use vscode_sync::{BundleMetadata, ConfigBundle};
    ///
    /// let bundle = ConfigBundle::new(
    ///     BundleMetadata::default(),
    ///     ["pub.a", "pub.b", "pub.a"],
    ///     Default::default(),
    /// );
    /// assert_eq!(bundle.extensions, vec!["pub.a", "pub.b"]);
    /// ```
    pub fn new<I, S>(metadata: BundleMetadata, extensions: I, settings: SettingsMap) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            metadata,
            extensions: dedupe_extensions(extensions),
            settings,
        }
    }

    /// Extensions with duplicates removed, first occurrence kept
    ///
    /// Decoded bundles are kept as written, so consumers go through this.
    #[must_use]
    pub fn unique_extensions(&self) -> Vec<String> {
        dedupe_extensions(self.extensions.iter().cloned())
    }
}

/// Drop duplicate identifiers while keeping first-seen order
pub fn dedupe_extensions<I, S>(extensions: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    extensions
        .into_iter()
        .map(Into::into)
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// On-disk form of a bundle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleFormat {
    /// A single JSON document
    #[default]
    Json,
    /// A ZIP archive wrapping the JSON document
    Zip,
}

impl BundleFormat {
    /// Infer the format from a file extension (`.json` / `.zip`, case-insensitive)
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(BundleFormat::Json),
            "zip" => Some(BundleFormat::Zip),
            _ => None,
        }
    }

    /// Conventional file extension
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            BundleFormat::Json => "json",
            BundleFormat::Zip => "zip",
        }
    }
}
