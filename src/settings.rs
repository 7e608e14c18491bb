//! The tool's own settings.
//!
//! These are distinct from `IxpSettings.json`, which is the file the tool
//! manages. Settings live in `ixpman.toml` and decide where the two candidate
//! directories are, what `save` does when the file is missing, and how
//! notifications are coloured.
//!
//! # Discovery
//!
//! Settings files are looked up along a list of [`SearchPath`]s in
//! **priority-ascending** order (last = highest). The default list is the
//! platform config directory, then the current working directory. Missing
//! files are skipped; every file found is layered, so a project-local file
//! only needs the keys it changes.
//!
//! # Layers
//!
//! ```text
//! Compiled defaults     #[config(default = ...)]
//!        ↑ overridden by
//! Settings files        search paths in order, later paths win
//!        ↑ overridden by
//! Environment           IXPMAN_HOME
//!        ↑ overridden by
//! CLI flags             --home, --create-missing, --theme
//! ```

use std::path::PathBuf;

use confique::Config;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::IxpError;
use crate::file::Locations;
use crate::session::Session;
use crate::theme::ThemeSettings;
use crate::types::{Location, SavePolicy};

pub const APP_NAME: &str = "ixpman";
pub const SETTINGS_FILE_NAME: &str = "ixpman.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// What `save` does when neither location holds IxpSettings.json.
    ///
    /// "require-existing" reports the file as missing. "create-missing"
    /// creates it in the Roblox ClientSettings directory first.
    #[config(default = "require-existing")]
    pub save_policy: SavePolicy,

    /// Where IxpSettings.json is looked for.
    #[config(nested)]
    pub paths: PathSettings,

    /// Notification colours.
    #[config(nested)]
    pub theme: ThemeSettings,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PathSettings {
    /// Home directory both locations are derived from.
    /// Defaults to the current user's home directory.
    #[config(env = "IXPMAN_HOME")]
    pub home: Option<PathBuf>,

    /// Replaces <home>/AppData/Local/Roblox/ClientSettings.
    pub primary_dir: Option<PathBuf>,

    /// Replaces <home>/AppData/Local/Fishstrap/Modifications/ClientSettings.
    pub secondary_dir: Option<PathBuf>,
}

impl Settings {
    /// Work out both candidate directories.
    ///
    /// Explicit directory overrides win over anything derived from `home`.
    pub fn locations(&self) -> Result<Locations, IxpError> {
        let derived = match &self.paths.home {
            Some(home) => Some(Locations::from_home(home)),
            None => Locations::from_user_home(),
        };
        let pick = |explicit: &Option<PathBuf>, location: Location| match (explicit, &derived) {
            (Some(dir), _) => Ok(dir.clone()),
            (None, Some(locs)) => Ok(locs.dir(location).to_path_buf()),
            (None, None) => Err(IxpError::NoHomeDir),
        };

        Ok(Locations::new(
            pick(&self.paths.primary_dir, Location::Primary)?,
            pick(&self.paths.secondary_dir, Location::Secondary)?,
        ))
    }

    /// A file session configured from these settings.
    pub fn session(&self) -> Result<Session, IxpError> {
        Ok(Session::new(self.locations()?).with_save_policy(self.save_policy))
    }
}

/// Where to look for settings files.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// Platform config directory (XDG on Linux, AppData\Roaming on Windows).
    Platform,
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Dir(PathBuf),
    /// An explicit settings file, used as-is.
    File(PathBuf),
}

impl SearchPath {
    /// The settings file this entry points at, if it can be determined.
    pub fn settings_file(&self) -> Option<PathBuf> {
        match self {
            SearchPath::Platform => {
                let proj = directories::ProjectDirs::from("", "", APP_NAME)?;
                Some(proj.config_dir().join(SETTINGS_FILE_NAME))
            }
            SearchPath::Cwd => std::env::current_dir()
                .ok()
                .map(|dir| dir.join(SETTINGS_FILE_NAME)),
            SearchPath::Dir(dir) => Some(dir.join(SETTINGS_FILE_NAME)),
            SearchPath::File(file) => Some(file.clone()),
        }
    }
}

pub fn default_search_paths() -> Vec<SearchPath> {
    vec![SearchPath::Platform, SearchPath::Cwd]
}

/// Read every settings file that exists, keeping priority order.
///
/// Missing files are skipped. Other I/O errors (permissions, etc.) propagate.
pub fn load_settings_files(
    search_paths: &[SearchPath],
) -> Result<Vec<(PathBuf, String)>, IxpError> {
    let mut found = Vec::new();
    for path in search_paths.iter().filter_map(SearchPath::settings_file) {
        if found.iter().any(|(p, _): &(PathBuf, String)| p == &path) {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                debug!("read settings from {}", path.display());
                found.push((path, content));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(IxpError::io(path, e)),
        }
    }
    Ok(found)
}

/// The settings file that `settings set` writes to for a given search path.
pub fn persist_target(path: &SearchPath) -> Result<PathBuf, IxpError> {
    path.settings_file().ok_or(IxpError::NoHomeDir)
}

pub(crate) fn display_settings(settings: &Settings) -> Result<String, IxpError> {
    toml::to_string_pretty(settings).map_err(|e| IxpError::InvalidSetting {
        key: "<settings>".into(),
        reason: e.to_string(),
    })
}
