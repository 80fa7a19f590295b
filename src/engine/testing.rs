//! In-crate editor stub for unit tests

use super::SyncEngine;
use crate::config::SyncConfig;
use crate::editor::EditorControl;
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::path::Path;

#[derive(Debug, Default)]
pub(crate) struct StubEditor {
    extensions: Vec<String>,
    unavailable: bool,
    failing: Vec<String>,
    installs: RefCell<Vec<String>>,
}

impl StubEditor {
    pub(crate) fn with_extensions(ids: &[&str]) -> Self {
        Self {
            extensions: ids.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub(crate) fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub(crate) fn failing(mut self, ids: &[&str]) -> Self {
        self.failing = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Install attempts, in order
    pub(crate) fn installs(&self) -> Vec<String> {
        self.installs.borrow().clone()
    }

    /// Engine over this stub with backups under `root/backups`
    pub(crate) fn engine(self, root: &Path, settings: &Path) -> SyncEngine<Self> {
        let config = SyncConfig::builder().config_dir(root).build();
        SyncEngine::builder(self)
            .config(&config)
            .settings_path(settings)
            .build()
            .unwrap()
    }
}

impl EditorControl for StubEditor {
    fn executable(&self) -> &str {
        "stub"
    }

    fn is_available(&self) -> bool {
        !self.unavailable
    }

    fn version(&self) -> Result<String> {
        if self.unavailable {
            return Err(Error::ExternalToolUnavailable("stub".into()));
        }
        Ok("1.0.0".into())
    }

    fn list_extensions(&self) -> Result<Vec<String>> {
        if self.unavailable {
            return Err(Error::ExternalToolUnavailable("stub".into()));
        }
        Ok(self.extensions.clone())
    }

    fn install_extension(&self, id: &str) -> Result<()> {
        if self.unavailable {
            return Err(Error::ExternalToolUnavailable("stub".into()));
        }
        self.installs.borrow_mut().push(id.to_string());
        if self.failing.iter().any(|f| f == id) {
            return Err(Error::ExtensionInstall {
                id: id.to_string(),
                reason: "marketplace unreachable".into(),
            });
        }
        Ok(())
    }
}
