//! Clap adapter for ixpman.
//!
//! Compiled only with the `clap` Cargo feature (on by default). The parsed
//! [`Cli`] is turned into a framework-agnostic [`Request`] by
//! [`Command::into_request()`]; everything after that goes through
//! [`Session::handle()`](crate::Session::handle) or
//! [`SettingsLoader::handle()`](crate::SettingsLoader::handle).
//!
//! The editor surface of the tool is the terminal: `load` prints the file,
//! and `save` takes the edited text from a file or stdin.

use std::ffi::OsStr;
use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::builder::SettingsLoader;
use crate::error::IxpError;
use crate::types::{IxpAction, SettingsAction};

/// Manage Roblox's IxpSettings.json across the Roblox and Fishstrap folders.
#[derive(Debug, Parser)]
#[command(name = "ixpman", version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags that feed the settings layers. Accepted before or after the subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Read settings from this file only, and write `settings set` there.
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Home directory the two locations are derived from.
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Create IxpSettings.json on save when neither location has it.
    #[arg(long, global = true)]
    pub create_missing: bool,

    /// Notification theme: dark, light, custom or plain.
    #[arg(long, global = true, value_name = "NAME")]
    pub theme: Option<String>,
}

impl GlobalArgs {
    /// A settings loader with these flags applied as the top layer.
    pub fn loader(&self) -> SettingsLoader {
        let mut loader = SettingsLoader::new();
        if let Some(path) = &self.settings {
            loader = loader.settings_file(path.clone());
        }
        loader
            .cli_override(
                "paths.home",
                self.home.as_ref().map(|h| h.to_string_lossy().into_owned()),
            )
            .cli_override(
                "save_policy",
                self.create_missing.then_some("create-missing"),
            )
            .cli_override("theme.name", self.theme.clone())
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the active IxpSettings.json.
    Load,
    /// Validate JSON and write it to the active IxpSettings.json.
    Save {
        /// File holding the new contents. Reads stdin when omitted or "-".
        input: Option<PathBuf>,
    },
    /// Create the Roblox IxpSettings.json as {} or reset it if corrupted.
    Ensure,
    /// Flip the Roblox IxpSettings.json between writable and read-only.
    ToggleReadonly,
    /// Move IxpSettings.json from the Roblox folder to the Fishstrap folder.
    Move,
    /// Move IxpSettings.json from the Fishstrap folder back to the Roblox folder.
    Restore,
    /// Pretty-print an external JSON file for review.
    Import {
        path: PathBuf,
        /// Also save it over the active IxpSettings.json.
        #[arg(long)]
        save: bool,
    },
    /// Show both locations and which one is active.
    Status,
    /// Inspect or change ixpman's own settings.
    Settings(SettingsArgs),
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: Option<SettingsSubcommand>,
}

#[derive(Debug, Subcommand)]
pub enum SettingsSubcommand {
    /// Generate a commented settings file.
    Gen {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the resolved settings.
    Show,
    /// Persist a setting, e.g. `settings set theme.name light`.
    Set { key: String, value: String },
}

/// What the user asked for, without any clap types.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    File(IxpAction),
    Settings(SettingsAction),
}

impl Command {
    /// Convert into a [`Request`]. `save` reads its text here, from the named
    /// file or from `stdin`.
    pub fn into_request(self, mut stdin: impl Read) -> Result<Request, IxpError> {
        let action = match self {
            Command::Load => IxpAction::Load,
            Command::Save { input } => {
                let text = match input {
                    Some(path) if path.as_os_str() != OsStr::new("-") => {
                        std::fs::read_to_string(&path).map_err(|e| IxpError::io(path, e))?
                    }
                    _ => {
                        let mut text = String::new();
                        stdin
                            .read_to_string(&mut text)
                            .map_err(|e| IxpError::io("<stdin>", e))?;
                        text
                    }
                };
                IxpAction::Save { text }
            }
            Command::Ensure => IxpAction::Ensure,
            Command::ToggleReadonly => IxpAction::ToggleReadOnly,
            Command::Move => IxpAction::MoveToSecondary,
            Command::Restore => IxpAction::RestoreToPrimary,
            Command::Import { path, save } => IxpAction::Import { path, save },
            Command::Status => IxpAction::Status,
            Command::Settings(args) => return Ok(Request::Settings(args.into_action())),
        };
        Ok(Request::File(action))
    }
}

impl SettingsArgs {
    /// Bare `settings` and `settings show` both map to `SettingsAction::Show`.
    pub fn into_action(self) -> SettingsAction {
        match self.action {
            None | Some(SettingsSubcommand::Show) => SettingsAction::Show,
            Some(SettingsSubcommand::Gen { output }) => SettingsAction::Gen { output },
            Some(SettingsSubcommand::Set { key, value }) => SettingsAction::Set { key, value },
        }
    }
}
