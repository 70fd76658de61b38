//! I/O boundary traits for testability
//!
//! These traits abstract external programs and the commands file, allowing
//! services to be tested with fake implementations.

use std::io;
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;

use tracing::debug;

use crate::infrastructure::query::{self, QueryError};

/// Chat delivery abstraction.
pub trait ChatSender: Send + Sync {
    /// Send one message to chat.
    /// Blocks until the delivery mechanism finishes.
    fn send(&self, message: &str) -> io::Result<()>;
}

/// Editor abstraction for opening files.
pub trait Editor: Send + Sync {
    /// Open a file in the editor.
    /// Blocks until editor exits.
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Read-only access to the YAML commands file.
pub trait CommandStore: Send + Sync {
    /// Evaluate a yq-style expression against the document at `path`.
    fn evaluate(&self, path: &Path, expr: &str) -> Result<String, QueryError>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Sends chat messages by running `<program> <message>`.
#[derive(Debug, Clone)]
pub struct ProcessChatSender {
    program: String,
}

impl ProcessChatSender {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ChatSender for ProcessChatSender {
    fn send(&self, message: &str) -> io::Result<()> {
        debug!("send: program={}, bytes={}", self.program, message.len());
        let status = Command::new(&self.program).arg(message).status()?;

        if status.success() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} exited with status: {}", self.program, status),
            ))
        }
    }
}

/// Runs the configured editor command (e.g. `vim` or `code --wait`).
#[derive(Debug, Clone)]
pub struct CommandEditor {
    command: String,
}

impl CommandEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Editor for CommandEditor {
    fn open(&self, path: &Path) -> io::Result<()> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no editor configured"))?;

        let status = Command::new(program).args(parts).arg(path).status()?;

        if status.success() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                format!("editor exited with status: {}", status),
            ))
        }
    }
}

/// Reads the commands file fresh on every call.
#[derive(Debug, Default)]
pub struct YamlCommandStore;

impl CommandStore for YamlCommandStore {
    fn evaluate(&self, path: &Path, expr: &str) -> Result<String, QueryError> {
        debug!("evaluate: path={}, expr={}", path.display(), expr);
        let content = std::fs::read_to_string(path).map_err(|source| QueryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|source| QueryError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;
        query::evaluate_to_string(expr, &document)
    }
}

/// Chat sender that records messages instead of delivering them.
#[derive(Debug, Default)]
pub struct RecordingChatSender {
    sent: Mutex<Vec<String>>,
    should_fail: bool,
}

impl RecordingChatSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose every delivery fails (nothing is recorded).
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            should_fail: true,
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ChatSender for RecordingChatSender {
    fn send(&self, message: &str) -> io::Result<()> {
        if self.should_fail {
            return Err(io::Error::new(io::ErrorKind::NotFound, "chat program unavailable"));
        }
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
        Ok(())
    }
}
