//! Operating system detection and per-OS settings locations

use crate::editor::Editor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Operating system the tool is running on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    MacOs,
    Windows,
    Linux,
    Unknown,
}

impl Os {
    /// Detect the current operating system
    #[must_use]
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "macos" => Os::MacOs,
            "windows" => Os::Windows,
            "linux" => Os::Linux,
            _ => Os::Unknown,
        }
    }

    /// Tag recorded as `metadata.system` in exported bundles
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Os::MacOs => "Macos",
            Os::Windows => "Windows",
            Os::Linux => "Linux",
            Os::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Location of the editor's user `settings.json` for `os`
///
/// Returns `None` for unsupported systems, or on Windows when `APPDATA` is unset.
#[must_use]
pub fn settings_path(os: Os, editor: Editor) -> Option<PathBuf> {
    let app = editor.app_dir_name();
    match os {
        Os::MacOs => dirs::home_dir().map(|home| {
            home.join("Library/Application Support")
                .join(app)
                .join("User/settings.json")
        }),
        Os::Windows => std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .map(|appdata| appdata.join(app).join("User/settings.json")),
        Os::Linux => {
            dirs::home_dir().map(|home| home.join(".config").join(app).join("User/settings.json"))
        }
        Os::Unknown => None,
    }
}
