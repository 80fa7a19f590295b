//! Editor integration
//!
//! The engine never spawns processes itself; it talks to an editor through
//! the [`EditorControl`] trait. [`EditorCli`] is the production implementation
//! driving the editor's command-line binary (`code` or `cursor`).

mod cli;

pub use cli::{CommandTimeouts, EditorCli};

use crate::error::{Error, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Editors whose extensions and settings can be synchronized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Editor {
    /// Visual Studio Code (`code`)
    #[serde(rename = "vscode")]
    VsCode,
    /// Cursor (`cursor`)
    #[serde(rename = "cursor")]
    Cursor,
}

impl Editor {
    /// All supported editors, in auto-detection preference order
    pub const ALL: [Editor; 2] = [Editor::VsCode, Editor::Cursor];

    /// Name of the command-line executable
    #[must_use]
    pub fn executable(self) -> &'static str {
        match self {
            Editor::VsCode => "code",
            Editor::Cursor => "cursor",
        }
    }

    /// Directory name the editor uses under the OS application-data root
    #[must_use]
    pub fn app_dir_name(self) -> &'static str {
        match self {
            Editor::VsCode => "Code",
            Editor::Cursor => "Cursor",
        }
    }

    /// Human-readable name
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Editor::VsCode => "VS Code",
            Editor::Cursor => "Cursor",
        }
    }

    /// Editors whose executable is found on `PATH`
    #[must_use]
    pub fn detect_installed() -> Vec<Editor> {
        Editor::ALL
            .into_iter()
            .filter(|editor| which::which(editor.executable()).is_ok())
            .collect()
    }

    /// Pick the editor to drive
    ///
    /// # Errors
    ///
    /// - [`Error::ExternalToolUnavailable`] if the preferred editor, or every
    ///   editor when there is no preference, is missing from `PATH`
    /// - [`Error::AmbiguousEditor`] if several editors are installed and no
    ///   preference was given
    pub fn select(preferred: Option<Editor>) -> Result<Editor> {
        choose(preferred, &Editor::detect_installed())
    }
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

fn choose(preferred: Option<Editor>, installed: &[Editor]) -> Result<Editor> {
    debug!("Installed editors: {installed:?}, preferred: {preferred:?}");

    if let Some(editor) = preferred {
        if installed.contains(&editor) {
            return Ok(editor);
        }
        return Err(Error::ExternalToolUnavailable(format!(
            "'{}' not found in PATH",
            editor.executable()
        )));
    }

    match installed {
        [] => Err(Error::ExternalToolUnavailable(
            "neither 'code' nor 'cursor' is installed".to_string(),
        )),
        [only] => {
            info!("Using {} ({} CLI)", only, only.executable());
            Ok(*only)
        }
        several => Err(Error::AmbiguousEditor(
            several
                .iter()
                .map(|e| e.executable())
                .collect::<Vec<_>>()
                .join(", "),
        )),
    }
}

/// Narrow interface to an editor installation
///
/// Implementations block until the underlying operation completes or its
/// timeout elapses. A timeout fails only the call it happened in.
pub trait EditorControl {
    /// Executable or label used in messages
    fn executable(&self) -> &str;

    /// Whether the editor CLI can be invoked at all
    fn is_available(&self) -> bool;

    /// Editor version string (first line of `--version`)
    fn version(&self) -> Result<String>;

    /// Identifiers of installed extensions
    fn list_extensions(&self) -> Result<Vec<String>>;

    /// Install a single extension
    fn install_extension(&self, id: &str) -> Result<()>;
}

impl<T: EditorControl + ?Sized> EditorControl for &T {
    fn executable(&self) -> &str {
        (**self).executable()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn version(&self) -> Result<String> {
        (**self).version()
    }

    fn list_extensions(&self) -> Result<Vec<String>> {
        (**self).list_extensions()
    }

    fn install_extension(&self, id: &str) -> Result<()> {
        (**self).install_extension(id)
    }
}
