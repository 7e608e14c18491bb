//! Manage Roblox's `IxpSettings.json` from the command line or from code.
//!
//! The file can live in one of two places under the user's home directory:
//!
//! ```text
//! primary    <home>/AppData/Local/Roblox/ClientSettings/IxpSettings.json
//! secondary  <home>/AppData/Local/Fishstrap/Modifications/ClientSettings/IxpSettings.json
//! ```
//!
//! When both exist, the secondary (Fishstrap) copy is the one Roblox sees
//! through the launcher, so it is the **active** file. Every operation works
//! on whichever file is active at the moment it runs.
//!
//! ```ignore
//! let settings = SettingsLoader::new().load()?;
//! let session = settings.session()?;
//! let buffer = session.load()?;
//! session.save(&buffer.text)?;
//! ```
//!
//! # Operations
//!
//! A [`Session`] is stateless apart from the two directories and a
//! [`SavePolicy`]. It re-resolves the active file for every call and never
//! holds a handle between calls.
//!
//! - **load**: read the active file verbatim, even if it is not valid JSON.
//! - **save**: reject blank text and invalid JSON, then write the
//!   pretty-printed form (4-space indent) to the active file.
//! - **ensure**: create the primary file as `{}`, or reset it to `{}` if it
//!   does not parse. A reset is reported, never silent.
//! - **toggle read-only**: flip the primary file's read-only attribute.
//! - **move / restore**: shift the file between the two directories. A file
//!   already at the destination is never overwritten.
//! - **import**: pretty-print any JSON file into an [`EditorBuffer`] without
//!   writing. `save` persists it when the user is happy.
//! - **status**: which locations hold the file and which one is active.
//!
//! The same operations are reachable as data through [`IxpAction`] and
//! [`Session::handle()`], which returns an [`IxpResult`] with a distinct
//! title and message per outcome.
//!
//! # Settings
//!
//! The tool's own settings live in `ixpman.toml` and are resolved through
//! sparse layers:
//!
//! ```text
//! Compiled defaults     #[config(default = ...)]
//!        ↑ overridden by
//! Settings files        platform config dir, then ./ixpman.toml
//!        ↑ overridden by
//! Environment           IXPMAN_HOME
//!        ↑ overridden by
//! CLI flags             --home, --create-missing, --theme
//! ```
//!
//! Unknown keys in a settings file are rejected with the file and line, so a
//! typo does not silently fall back to a default. `settings set` edits the
//! file with `toml_edit` and keeps existing comments; a new file is seeded
//! from the generated template.
//!
//! # Errors
//!
//! Every fallible call returns [`IxpError`]. [`IxpError::kind()`] gives the
//! short category the CLI uses as its notification title.

pub mod error;
pub mod types;

mod attr;
mod builder;
#[cfg(feature = "clap")]
mod cli;
mod document;
mod file;
mod ops;
mod overrides;
mod persist;
mod resolve;
mod session;
mod settings;
mod theme;
mod validate;

#[cfg(test)]
mod fixtures;

pub use builder::SettingsLoader;
#[cfg(feature = "clap")]
pub use cli::{Cli, Command, GlobalArgs, Request, SettingsArgs, SettingsSubcommand};
pub use error::IxpError;
pub use file::{ActiveFile, Locations};
pub use ops::{IxpResult, Relocation, SaveReport, SettingsResult, StatusReport};
pub use session::Session;
pub use settings::{PathSettings, SETTINGS_FILE_NAME, SearchPath, Settings};
pub use theme::{CustomColors, Palette, ThemeName, ThemeSettings};
pub use types::{
    BufferOrigin, EditorBuffer, EnsureOutcome, IXP_FILE_NAME, IxpAction, Location, SavePolicy,
    SettingsAction, Writability,
};
