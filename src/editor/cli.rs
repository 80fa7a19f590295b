//! Editor command-line driver

use super::{Editor, EditorControl};
use crate::error::{Error, Result};
use log::{debug, warn};
use std::ffi::OsString;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Per-call timeouts for editor CLI invocations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTimeouts {
    /// `--version`
    pub version: Duration,
    /// `--list-extensions`
    pub list: Duration,
    /// `--install-extension <id>`
    pub install: Duration,
}

impl Default for CommandTimeouts {
    fn default() -> Self {
        Self {
            version: Duration::from_secs(10),
            list: Duration::from_secs(30),
            install: Duration::from_secs(60),
        }
    }
}

/// Captured result of a finished editor command
struct CommandOutput {
    success: bool,
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl CommandOutput {
    /// Trimmed stderr, or the exit code when stderr is empty
    fn failure_reason(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            format!("exit code {}", self.code.unwrap_or(-1))
        } else {
            stderr.to_string()
        }
    }
}

/// [`EditorControl`] backed by the editor's command-line binary
#[derive(Debug, Clone)]
pub struct EditorCli {
    program: OsString,
    label: String,
    timeouts: CommandTimeouts,
}

impl EditorCli {
    /// Drive the CLI of `editor`, resolved through `PATH`
    #[must_use]
    pub fn new(editor: Editor) -> Self {
        Self {
            program: editor.executable().into(),
            label: editor.executable().to_string(),
            timeouts: CommandTimeouts::default(),
        }
    }

    /// Drive an explicit binary (e.g. an editor outside `PATH`)
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        let program: PathBuf = program.into();
        let label = program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| program.display().to_string());
        Self {
            program: program.into_os_string(),
            label,
            timeouts: CommandTimeouts::default(),
        }
    }

    /// Override the per-call timeouts
    #[must_use]
    pub fn timeouts(mut self, timeouts: CommandTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    fn resolve(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|_| {
            Error::ExternalToolUnavailable(format!("'{}' not found in PATH", self.label))
        })
    }

    fn run(&self, args: &[&str], timeout: Duration) -> Result<CommandOutput> {
        let program = self.resolve()?;
        let command_line = format!("{} {}", self.label, args.join(" "));
        debug!("Running: {command_line}");

        let mut child = Command::new(&program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                Error::ExternalToolUnavailable(format!("failed to start '{}': {e}", self.label))
            })?;

        // Drain both pipes while waiting so a chatty child never blocks on a full pipe
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let waited = child.wait_timeout(timeout).map_err(|e| Error::CommandFailed {
            command: command_line.clone(),
            reason: e.to_string(),
        })?;

        match waited {
            Some(status) => Ok(CommandOutput {
                success: status.success(),
                code: status.code(),
                stdout: collect(stdout),
                stderr: collect(stderr),
            }),
            None => {
                warn!("'{command_line}' timed out, killing it");
                let _ = child.kill();
                let _ = child.wait();
                Err(Error::Timeout {
                    operation: command_line,
                    timeout,
                })
            }
        }
    }
}

/// Read a child pipe to the end on its own thread
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = pipe.read_to_end(&mut buffer);
            buffer
        })
    })
}

fn collect(reader: Option<JoinHandle<Vec<u8>>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

impl EditorControl for EditorCli {
    fn executable(&self) -> &str {
        &self.label
    }

    fn is_available(&self) -> bool {
        self.version().is_ok()
    }

    fn version(&self) -> Result<String> {
        let output = self.run(&["--version"], self.timeouts.version)?;
        if !output.success {
            return Err(Error::ExternalToolUnavailable(format!(
                "'{} --version' failed: {}",
                self.label,
                output.failure_reason()
            )));
        }
        Ok(output.stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    fn list_extensions(&self) -> Result<Vec<String>> {
        let output = self.run(&["--list-extensions"], self.timeouts.list)?;
        if !output.success {
            return Err(Error::CommandFailed {
                command: format!("{} --list-extensions", self.label),
                reason: output.failure_reason(),
            });
        }
        Ok(parse_extension_list(&output.stdout))
    }

    fn install_extension(&self, id: &str) -> Result<()> {
        let output = self.run(&["--install-extension", id], self.timeouts.install)?;
        if output.success {
            Ok(())
        } else {
            Err(Error::ExtensionInstall {
                id: id.to_string(),
                reason: output.failure_reason(),
            })
        }
    }
}

/// One identifier per line; blank lines dropped, whitespace trimmed
fn parse_extension_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
