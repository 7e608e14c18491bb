use crate::error::IxpError;
use crate::ops::SettingsResult;
use crate::persist;
use crate::resolve::{self, ResolveInput};
use crate::settings::{self, SearchPath, Settings};
use crate::types::SettingsAction;

/// Loads [`Settings`] through every layer and answers `settings` subcommands.
///
/// Three axes, each with a default that suits the command-line tool:
///
/// - **Discovery**: [`search_paths()`](Self::search_paths), default
///   `[Platform, Cwd]`.
/// - **Persistence**: [`persist_path()`](Self::persist_path), where
///   `settings set` writes. Defaults to the platform file, or to the explicit
///   file given with [`settings_file()`](Self::settings_file).
/// - **Overrides**: [`cli_override()`](Self::cli_override), the top layer.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    search_paths: Vec<SearchPath>,
    persist_path: Option<SearchPath>,
    env_enabled: bool,
    strict: bool,
    cli_overrides: Vec<(String, toml::Value)>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self {
            search_paths: settings::default_search_paths(),
            persist_path: None,
            env_enabled: true,
            strict: true,
            cli_overrides: Vec::new(),
        }
    }

    /// Replace the search paths entirely.
    ///
    /// Paths are listed in **priority-ascending** order: the last entry has the
    /// highest priority.
    pub fn search_paths(mut self, paths: Vec<SearchPath>) -> Self {
        self.search_paths = paths;
        self
    }

    /// Read exactly one settings file, and write `settings set` there too.
    pub fn settings_file(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        let path = SearchPath::File(path.into());
        self.search_paths = vec![path.clone()];
        self.persist_path = Some(path);
        self
    }

    /// Where `settings set` writes. See [`settings::persist_target`].
    pub fn persist_path(mut self, path: SearchPath) -> Self {
        self.persist_path = Some(path);
        self
    }

    /// Ignore `IXPMAN_HOME`.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Enable or disable strict mode (default: `true`).
    /// In strict mode, unknown keys in settings files produce errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Add a CLI override. `None` values are ignored (useful for optional clap args).
    pub fn cli_override<V: Into<toml::Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.cli_overrides.push((key.to_string(), v.into()));
        }
        self
    }

    fn build_input(&self) -> Result<ResolveInput, IxpError> {
        Ok(ResolveInput {
            files: settings::load_settings_files(&self.search_paths)?,
            overrides: self.cli_overrides.clone(),
            env: self.env_enabled,
            strict: self.strict,
        })
    }

    /// Load and resolve the settings through all layers.
    pub fn load(&self) -> Result<Settings, IxpError> {
        resolve::resolve(self.build_input()?)
    }

    /// Handle a [`SettingsAction`] (gen / show / set).
    pub fn handle(&self, action: &SettingsAction) -> Result<SettingsResult, IxpError> {
        match action {
            SettingsAction::Gen { output } => {
                let template = persist::generate_template();
                match output {
                    Some(path) => {
                        if let Some(parent) = path.parent() {
                            std::fs::create_dir_all(parent)
                                .map_err(|e| IxpError::io(parent, e))?;
                        }
                        std::fs::write(path, &template).map_err(|e| IxpError::io(path, e))?;
                        Ok(SettingsResult::TemplateWritten { path: path.clone() })
                    }
                    None => Ok(SettingsResult::Template(template)),
                }
            }
            SettingsAction::Show => {
                let resolved = self.load()?;
                Ok(SettingsResult::Resolved(settings::display_settings(
                    &resolved,
                )?))
            }
            SettingsAction::Set { key, value } => {
                let target = self.persist_path.as_ref().unwrap_or(&SearchPath::Platform);
                let path = settings::persist_target(target)?;
                persist::persist_value(&path, key, value)
            }
        }
    }
}
