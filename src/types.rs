//! Value types shared by the session, the action dispatcher, and the CLI.
//!
//! None of these hold on to filesystem handles or cached state. The presentation
//! layer keeps the [`EditorBuffer`] it was handed and passes its text back into
//! [`IxpAction::Save`] when the user asks to persist it.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The fixed name of the managed file.
pub const IXP_FILE_NAME: &str = "IxpSettings.json";

/// One of the two directories the target file may live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// The Roblox client settings directory.
    Primary,
    /// The Fishstrap modifications directory. Wins when both exist.
    Secondary,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Primary => write!(f, "primary"),
            Location::Secondary => write!(f, "secondary"),
        }
    }
}

/// Filesystem write capability of the primary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Writability {
    Writable,
    ReadOnly,
}

impl Writability {
    pub fn flipped(self) -> Self {
        match self {
            Writability::Writable => Writability::ReadOnly,
            Writability::ReadOnly => Writability::Writable,
        }
    }
}

impl fmt::Display for Writability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Writability::Writable => write!(f, "WRITABLE"),
            Writability::ReadOnly => write!(f, "READ-ONLY"),
        }
    }
}

/// What `Save` does when neither location holds the file.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SavePolicy {
    /// Report `NotFound`; never create the file.
    #[default]
    RequireExisting,
    /// Create the primary directory and file, then write.
    CreateMissing,
}

/// Where the text in an [`EditorBuffer`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferOrigin {
    Target { location: Location, path: PathBuf },
    Imported(PathBuf),
}

/// Text staged for the user to view and edit. Not persisted until saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorBuffer {
    pub text: String,
    pub origin: BufferOrigin,
}

/// Result of the ensure-exists step on the primary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The file did not exist and was created as `{}`.
    Created,
    /// The file held invalid JSON and was overwritten with `{}`.
    Reset,
    /// The file already held valid JSON; nothing was written.
    AlreadyValid,
}

/// A file-session request, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum IxpAction {
    Load,
    Save { text: String },
    Ensure,
    ToggleReadOnly,
    MoveToSecondary,
    RestoreToPrimary,
    Import { path: PathBuf, save: bool },
    Status,
}

/// A request about the tool's own settings rather than the managed file.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsAction {
    /// Print a commented settings template, or write it to `output`.
    Gen { output: Option<PathBuf> },
    /// Show the fully resolved settings.
    Show,
    /// Persist `key = value` into a settings file.
    Set { key: String, value: String },
}
