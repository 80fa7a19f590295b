//! Common test utilities for vscode-sync integration tests
//!
//! Provides a temporary configuration root, a fake editor and helpers for
//! reading and writing the live settings document.

#![allow(dead_code)]

use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;
use vscode_sync::{
    BackupManager, EditorControl, Error, PresetCatalog, Result, SyncConfig, SyncEngine,
};

/// Install logging once per test binary
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// =============================================================================
// Fake Editor
// =============================================================================

/// How a scripted install fails
#[derive(Debug, Clone)]
pub enum InstallFailure {
    Rejected(String),
    TimedOut,
}

/// Editor double recording every install attempt
#[derive(Debug, Default)]
pub struct FakeEditor {
    installed: Vec<String>,
    available: bool,
    failures: HashMap<String, InstallFailure>,
    attempts: Mutex<Vec<String>>,
}

impl FakeEditor {
    /// An available editor with the given extensions installed
    pub fn new(installed: &[&str]) -> Self {
        Self {
            installed: installed.iter().map(|s| s.to_string()).collect(),
            available: true,
            ..Default::default()
        }
    }

    /// An editor whose CLI cannot be found
    pub fn missing() -> Self {
        Self::default()
    }

    /// Make installing `id` fail with `reason`
    pub fn reject(mut self, id: &str, reason: &str) -> Self {
        self.failures
            .insert(id.to_string(), InstallFailure::Rejected(reason.to_string()));
        self
    }

    /// Make installing `id` time out
    pub fn time_out(mut self, id: &str) -> Self {
        self.failures.insert(id.to_string(), InstallFailure::TimedOut);
        self
    }

    /// Install attempts in call order
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    fn unavailable() -> Error {
        Error::ExternalToolUnavailable("'code' not found in PATH".to_string())
    }
}

impl EditorControl for FakeEditor {
    fn executable(&self) -> &str {
        "code"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn version(&self) -> Result<String> {
        if !self.available {
            return Err(Self::unavailable());
        }
        Ok("1.90.0".to_string())
    }

    fn list_extensions(&self) -> Result<Vec<String>> {
        if !self.available {
            return Err(Self::unavailable());
        }
        Ok(self.installed.clone())
    }

    fn install_extension(&self, id: &str) -> Result<()> {
        if !self.available {
            return Err(Self::unavailable());
        }
        self.attempts.lock().unwrap().push(id.to_string());

        match self.failures.get(id) {
            None => Ok(()),
            Some(InstallFailure::Rejected(reason)) => Err(Error::ExtensionInstall {
                id: id.to_string(),
                reason: reason.clone(),
            }),
            Some(InstallFailure::TimedOut) => Err(Error::Timeout {
                operation: format!("code --install-extension {id}"),
                timeout: Duration::from_secs(60),
            }),
        }
    }
}

// =============================================================================
// Test Fixture
// =============================================================================

/// One simulated machine: a config root and a live settings document
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub config: SyncConfig,
}

impl TestFixture {
    pub fn new() -> Self {
        init_logging();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = SyncConfig::builder()
            .config_dir(temp_dir.path().join("vscode-sync"))
            .settings_path(temp_dir.path().join("Code/User/settings.json"))
            .build();
        Self { temp_dir, config }
    }

    /// Path inside the fixture's temp directory
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// The live settings document
    pub fn settings_path(&self) -> PathBuf {
        self.config
            .settings_path
            .clone()
            .expect("fixture always sets a settings path")
    }

    pub fn write_settings(&self, contents: &str) {
        let path = self.settings_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    pub fn read_settings_raw(&self) -> String {
        std::fs::read_to_string(self.settings_path()).unwrap()
    }

    pub fn read_settings(&self) -> Value {
        serde_json::from_str(&self.read_settings_raw()).unwrap()
    }

    pub fn engine(&self, editor: FakeEditor) -> SyncEngine<FakeEditor> {
        SyncEngine::builder(editor)
            .config(&self.config)
            .build()
            .expect("Failed to build engine")
    }

    pub fn catalog(&self) -> PresetCatalog {
        PresetCatalog::from_config(&self.config)
    }

    pub fn backups(&self) -> BackupManager {
        BackupManager::from_config(&self.config)
    }

    pub fn backup_dir(&self) -> &Path {
        &self.config.backup_dir
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
