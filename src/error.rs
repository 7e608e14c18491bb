use std::path::PathBuf;

use thiserror::Error;

use crate::types::Location;

#[derive(Debug, Error)]
pub enum IxpError {
    #[error("IxpSettings.json ({location}) not found at {}", .path.display())]
    NotFound { location: Location, path: PathBuf },

    #[error(
        "IxpSettings.json not found in {} or {}",
        .secondary.display(),
        .primary.display()
    )]
    NoActiveFile { primary: PathBuf, secondary: PathBuf },

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Cannot save empty content")]
    EmptyContent,

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to import {path}: {reason}")]
    ImportFailed { path: PathBuf, reason: String },

    #[error("Refusing to overwrite existing {}", .path.display())]
    DestinationExists { path: PathBuf },

    #[error("Unknown setting '{key}' in {path} (line {line})")]
    UnknownSetting {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown settings: {}", join_errors(.0))]
    UnknownSettings(Vec<IxpError>),

    #[error("Failed to parse {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("Settings error: {0}")]
    Settings(#[from] confique::Error),

    #[error("Could not determine the home directory; pass --home or set IXPMAN_HOME")]
    NoHomeDir,
}

impl IxpError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IxpError::Io {
            path: path.into(),
            source,
        }
    }

    /// Short, stable name of the failure kind, used as the notification title.
    pub fn kind(&self) -> &'static str {
        match self {
            IxpError::NotFound { .. } | IxpError::NoActiveFile { .. } => "Not found",
            IxpError::InvalidJson(_) => "Invalid JSON",
            IxpError::EmptyContent => "Empty",
            IxpError::Io { .. } => "I/O failure",
            IxpError::ImportFailed { .. } => "Import failed",
            IxpError::DestinationExists { .. } => "Destination exists",
            IxpError::UnknownSetting { .. }
            | IxpError::UnknownSettings(_)
            | IxpError::SettingsParse { .. }
            | IxpError::InvalidSetting { .. }
            | IxpError::Settings(_)
            | IxpError::NoHomeDir => "Settings",
        }
    }
}

fn join_errors(errors: &[IxpError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_location_and_path() {
        let err = IxpError::NotFound {
            location: Location::Primary,
            path: "/home/user/AppData/Local/Roblox/ClientSettings/IxpSettings.json".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("primary"));
        assert!(msg.contains("ClientSettings"));
    }

    #[test]
    fn no_active_file_names_both_locations() {
        let err = IxpError::NoActiveFile {
            primary: "/p/IxpSettings.json".into(),
            secondary: "/s/IxpSettings.json".into(),
        };
        assert_eq!(
            err.to_string(),
            "IxpSettings.json not found in /s/IxpSettings.json or /p/IxpSettings.json"
        );
    }

    #[test]
    fn unknown_setting_formats_correctly() {
        let err = IxpError::UnknownSetting {
            key: "typo_key".into(),
            path: "/home/user/.config/ixpman/ixpman.toml".into(),
            line: 42,
        };
        let msg = err.to_string();
        assert!(msg.contains("typo_key"));
        assert!(msg.contains("ixpman.toml"));
        assert!(msg.contains("42"));
    }

    #[test]
    fn kinds_are_distinct_for_session_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let kinds = [
            IxpError::NotFound {
                location: Location::Secondary,
                path: "x".into(),
            }
            .kind(),
            IxpError::InvalidJson(json_err).kind(),
            IxpError::EmptyContent.kind(),
            IxpError::io("x", std::io::Error::other("boom")).kind(),
            IxpError::ImportFailed {
                path: "x".into(),
                reason: "bad".into(),
            }
            .kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
