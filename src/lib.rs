//! # vscode-sync - Editor configuration sync
//!
//! A library for carrying a VS Code (or Cursor) setup between machines: the
//! installed extensions and the user `settings.json` are exported to a
//! portable bundle and re-applied elsewhere.
//!
//! ## Features
//!
//! - **Bundles**: JSON documents, or ZIP archives wrapping them (`zip` feature, on by default)
//! - **Import**: Backup first, install extensions one by one, replace the settings document
//! - **Partial failure**: Every extension is attempted; the report says what worked
//! - **Presets**: Built-in templates plus user presets stored one file per name
//! - **Backups**: Timestamped copies of the settings document with a retention window
//! - **Wizard**: An event-driven state machine for assembling a bundle step by step
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vscode_sync::{ImportOptions, SyncConfig, SyncEngine};
//! use std::path::Path;
//!
//! # fn example() -> vscode_sync::Result<()> {
//! let config = SyncConfig::load(&SyncConfig::default_path());
//! let engine = SyncEngine::from_config(&config)?;
//!
//! // On the old machine
//! engine.export(Path::new("my-setup.zip"))?;
//!
//! // On the new machine
//! let report = engine.import(Path::new("my-setup.zip"), &ImportOptions::all())?;
//! for warning in report.warnings() {
//!     println!("{warning}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Import Semantics
//!
//! Importing is destructive: the bundle's settings **replace** the live
//! document instead of merging into it. That is why a backup is taken first
//! when [`ImportOptions::backup_first`] is set:
//!
//! - A bundle that cannot be decoded aborts the import before anything changes
//! - Extension failures (including timeouts) are collected, never fatal
//! - A failed settings write leaves the live document as it was
//! - Nothing is rolled back: installed extensions stay installed
//!
//! ## Presets
//!
//! ```rust,no_run
//! use vscode_sync::{ImportOptions, PresetCatalog, SyncConfig, SyncEngine};
//!
//! # fn example() -> vscode_sync::Result<()> {
//! let config = SyncConfig::default();
//! let catalog = PresetCatalog::from_config(&config);
//! let engine = SyncEngine::from_config(&config)?;
//!
//! for name in catalog.list() {
//!     println!("{name}");
//! }
//!
//! let bundle = catalog.resolve("frontend")?.to_bundle();
//! engine.apply(&bundle, &ImportOptions::all())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Wizard
//!
//! ```rust,no_run
//! use vscode_sync::{PresetCatalog, SyncConfig, SyncEngine, WizardEvent, WizardSession};
//!
//! # fn example() -> vscode_sync::Result<()> {
//! let config = SyncConfig::default();
//! let catalog = PresetCatalog::from_config(&config);
//! let engine = SyncEngine::from_config(&config)?;
//!
//! let mut session = WizardSession::new(&catalog, &engine);
//! session.run_script([
//!     WizardEvent::ChoosePreset("backend".into()),
//!     WizardEvent::Edit,
//!     WizardEvent::AddExtension("tamasfe.even-better-toml".into()),
//!     WizardEvent::Done,
//!     WizardEvent::Edit,
//!     WizardEvent::SetSetting { key: "editor.tabSize".into(), raw: "4".into() },
//!     WizardEvent::Done,
//! ])?;
//! println!("{}", session.summary());
//! session.handle(WizardEvent::Confirm)?;
//! # Ok(())
//! # }
//! ```

// Core modules
mod clock;
mod error;
pub mod platform;
pub mod security;
pub mod settings;
pub mod storage;

// Grouped modules
pub mod backup;
pub mod bundle;
pub mod config;
pub mod editor;
pub mod engine;
pub mod presets;
pub mod wizard;

// Re-exports from core
pub use error::{Error, Result};
pub use platform::Os;
pub use settings::{SettingsMap, read_settings_document, write_settings_document};
pub use storage::JsonStorage;

pub use backup::{BackupManager, BackupRecord, SnapshotOutcome};
pub use bundle::{BundleFormat, BundleMetadata, ConfigBundle};
pub use config::{SyncConfig, SyncConfigBuilder};
pub use editor::{CommandTimeouts, Editor, EditorCli, EditorControl};
pub use engine::{
    BackupStep, CollectedState, ExportOptions, ExportReport, ExtensionFailure, ExtensionsStep,
    ImportOptions, ImportOutcome, ImportReport, SettingsStep, StatusReport, SyncEngine,
    SyncEngineBuilder,
};
pub use presets::{Preset, PresetCatalog, validate_preset_name};
pub use wizard::{
    PresetChoice, SettingValue, WizardEvent, WizardSession, WizardState, infer_setting_value,
};
