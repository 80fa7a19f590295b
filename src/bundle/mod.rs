//! Portable configuration bundles
//!
//! A [`ConfigBundle`] is what export produces and import consumes. It is
//! written either as a JSON document or as a ZIP archive wrapping that
//! document under [`BUNDLE_ENTRY_NAME`].

mod codec;
mod types;

pub use codec::{BUNDLE_ENTRY_NAME, SETTINGS_ENTRY_NAME, decode, encode, encode_with_attachment};
pub use types::{BundleFormat, BundleMetadata, ConfigBundle, TOOL_VERSION, dedupe_extensions};
