//! Wizard state machine

use super::value::infer_setting_value;
use crate::bundle::{BundleMetadata, ConfigBundle};
use crate::editor::EditorControl;
use crate::engine::{ImportOptions, ImportReport, SyncEngine};
use crate::error::{Error, Result};
use crate::presets::PresetCatalog;
use crate::settings::SettingsMap;
use log::{debug, info};
use serde_json::Value;
use std::fmt::Write as _;

/// Where the wizard currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    ChoosePreset,
    ReviewExtensions,
    EditExtensions,
    ReviewSettings,
    EditSettings,
    Confirm,
    /// Bundle applied through the engine (terminal)
    Applied,
    /// Discarded without touching the live system (terminal)
    Aborted,
}

impl WizardState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, WizardState::Applied | WizardState::Aborted)
    }
}

/// One user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// Start from a named preset
    ChoosePreset(String),
    /// Start from nothing
    Custom,
    /// Enter the edit loop of the section under review
    Edit,
    /// Accept the section under review as is
    Skip,
    AddExtension(String),
    RemoveExtension(String),
    /// Set a setting from raw text; the value type is inferred
    SetSetting { key: String, raw: String },
    /// Leave the current edit loop
    Done,
    /// Apply the assembled bundle
    Confirm,
    /// Discard the assembled bundle
    Decline,
    /// Cancel at any point before confirmation
    Abort,
}

/// A starting point offered in [`WizardState::ChoosePreset`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetChoice {
    Named(String),
    Custom,
}

/// Interactive bundle builder driven by discrete events
///
/// Nothing reaches the live system before [`WizardEvent::Confirm`] is
/// handled in [`WizardState::Confirm`].
pub struct WizardSession<'a, E: EditorControl> {
    catalog: &'a PresetCatalog,
    engine: &'a SyncEngine<E>,
    state: WizardState,
    preset: Option<String>,
    extensions: Vec<String>,
    settings: SettingsMap,
    report: Option<ImportReport>,
}

impl<'a, E: EditorControl> WizardSession<'a, E> {
    pub fn new(catalog: &'a PresetCatalog, engine: &'a SyncEngine<E>) -> Self {
        Self {
            catalog,
            engine,
            state: WizardState::ChoosePreset,
            preset: None,
            extensions: Vec::new(),
            settings: SettingsMap::new(),
            report: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> WizardState {
        self.state
    }

    /// Starting points: every catalog preset, then `Custom`
    #[must_use]
    pub fn choices(&self) -> Vec<PresetChoice> {
        self.catalog
            .list()
            .into_iter()
            .map(PresetChoice::Named)
            .chain(std::iter::once(PresetChoice::Custom))
            .collect()
    }

    /// Name of the chosen preset; `None` for custom or before choosing
    #[must_use]
    pub fn preset(&self) -> Option<&str> {
        self.preset.as_deref()
    }

    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    #[must_use]
    pub fn settings(&self) -> &SettingsMap {
        &self.settings
    }

    /// Import report, once applied
    #[must_use]
    pub fn report(&self) -> Option<&ImportReport> {
        self.report.as_ref()
    }

    /// The bundle as currently assembled
    #[must_use]
    pub fn bundle(&self) -> ConfigBundle {
        ConfigBundle::new(
            BundleMetadata::fresh(self.engine.os()),
            self.extensions.iter().cloned(),
            self.settings.clone(),
        )
    }

    /// Handle one event
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTransition`] if the event makes no sense in the
    ///   current state; the session is unchanged
    /// - [`Error::PresetNotFound`] for an unknown preset name
    /// - errors from the engine when applying (backup failure); the session
    ///   stays in [`WizardState::Confirm`]
    pub fn handle(&mut self, event: WizardEvent) -> Result<WizardState> {
        use WizardEvent as Ev;
        use WizardState as St;

        let next = match (self.state, event) {
            (state, Ev::Abort) if !state.is_terminal() && state != St::Confirm => St::Aborted,

            (St::ChoosePreset, Ev::ChoosePreset(name)) => {
                let preset = self.catalog.resolve(&name)?;
                self.extensions = preset.unique_extensions();
                self.settings = preset.settings;
                self.preset = Some(name);
                St::ReviewExtensions
            }
            (St::ChoosePreset, Ev::Custom) => {
                self.extensions.clear();
                self.settings.clear();
                self.preset = None;
                St::ReviewExtensions
            }

            (St::ReviewExtensions, Ev::Edit) => St::EditExtensions,
            (St::ReviewExtensions, Ev::Skip) => St::ReviewSettings,
            (St::EditExtensions, Ev::AddExtension(id)) => {
                let id = id.trim();
                if !id.is_empty() && !self.extensions.iter().any(|e| e == id) {
                    self.extensions.push(id.to_string());
                }
                St::EditExtensions
            }
            (St::EditExtensions, Ev::RemoveExtension(id)) => {
                let id = id.trim();
                self.extensions.retain(|e| e != id);
                St::EditExtensions
            }
            (St::EditExtensions, Ev::Done) => St::ReviewSettings,

            (St::ReviewSettings, Ev::Edit) => St::EditSettings,
            (St::ReviewSettings, Ev::Skip) => St::Confirm,
            (St::EditSettings, Ev::SetSetting { key, raw }) => {
                let key = key.trim();
                if key.is_empty() {
                    return Err(Error::InvalidTransition(
                        "setting key cannot be empty".to_string(),
                    ));
                }
                let value = infer_setting_value(&raw);
                debug!("Setting {key} = {value}");
                self.settings.insert(key.to_string(), Value::from(value));
                St::EditSettings
            }
            (St::EditSettings, Ev::Done) => St::Confirm,

            (St::Confirm, Ev::Confirm) => {
                let report = self.engine.apply(&self.bundle(), &ImportOptions::all())?;
                info!("Wizard configuration applied");
                self.report = Some(report);
                St::Applied
            }
            (St::Confirm, Ev::Decline | Ev::Abort) => {
                info!("Wizard configuration discarded");
                St::Aborted
            }

            (state, event) => {
                return Err(Error::InvalidTransition(format!(
                    "{event:?} is not valid in state {state:?}"
                )));
            }
        };

        self.state = next;
        Ok(next)
    }

    /// Feed events in order, stopping at the first error
    pub fn run_script<I>(&mut self, events: I) -> Result<WizardState>
    where
        I: IntoIterator<Item = WizardEvent>,
    {
        for event in events {
            self.handle(event)?;
        }
        Ok(self.state)
    }

    /// Human-readable rendering of the assembled configuration
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Preset: {}", self.preset.as_deref().unwrap_or("custom"));

        let _ = writeln!(out, "Extensions ({}):", self.extensions.len());
        for id in &self.extensions {
            let _ = writeln!(out, "  - {id}");
        }

        let _ = writeln!(out, "Settings ({}):", self.settings.len());
        for (key, value) in &self.settings {
            let _ = writeln!(out, "  {key} = {value}");
        }
        out
    }
}
