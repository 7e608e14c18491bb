//! Strict checking of settings files.
//!
//! A misspelled key in `ixpman.toml` would otherwise be ignored and the
//! setting silently left at its default. The file is deserialized into the
//! all-optional layer type through `serde_ignored`, and whatever the layer
//! does not consume is reported with its file and line.

use std::path::Path;

use confique::Config;
use serde::Deserialize;

use crate::error::IxpError;

pub fn validate_unknown_keys<C: Config>(content: &str, path: &Path) -> Result<(), IxpError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    let mut unknown: Vec<String> = Vec::new();

    let deserializer = toml::Deserializer::new(content);
    let _: C::Layer = serde_ignored::deserialize(deserializer, |ignored| {
        unknown.push(ignored.to_string());
    })
    .map_err(|e| IxpError::SettingsParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    if unknown.is_empty() {
        return Ok(());
    }

    Err(IxpError::UnknownSettings(
        unknown
            .into_iter()
            .map(|key| IxpError::UnknownSetting {
                line: line_of(content, &key),
                key,
                path: path.to_path_buf(),
            })
            .collect(),
    ))
}

/// 1-indexed line where `dotted_key` is assigned, or 0 if it cannot be found.
///
/// Tracks `[section]` headers so `theme.typo` only matches `typo = ...` under
/// `[theme]`. Quoted keys, dotted assignments and inline tables are not
/// recognised.
fn line_of(content: &str, dotted_key: &str) -> usize {
    let (section, leaf) = dotted_key.rsplit_once('.').unwrap_or(("", dotted_key));
    let mut current = String::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            if !header.starts_with('[') {
                current = header.split('.').map(str::trim).collect::<Vec<_>>().join(".");
            }
            continue;
        }
        if current == section
            && let Some(rest) = line.strip_prefix(leaf)
            && rest.trim_start().starts_with('=')
        {
            return idx + 1;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use std::path::PathBuf;

    fn path() -> PathBuf {
        PathBuf::from("/test/ixpman.toml")
    }

    fn unknown(content: &str) -> Vec<(String, usize)> {
        match validate_unknown_keys::<Settings>(content, &path()) {
            Err(IxpError::UnknownSettings(errors)) => errors
                .into_iter()
                .map(|e| match e {
                    IxpError::UnknownSetting { key, line, .. } => (key, line),
                    other => panic!("Expected UnknownSetting, got {other:?}"),
                })
                .collect(),
            other => panic!("Expected UnknownSettings, got {other:?}"),
        }
    }

    #[test]
    fn valid_settings_pass() {
        let content = r#"
save_policy = "create-missing"

[paths]
home = "C:/Users/player"

[theme]
name = "custom"

[theme.custom]
success = "bright-green"
"#;
        assert!(validate_unknown_keys::<Settings>(content, &path()).is_ok());
    }

    #[test]
    fn empty_file_passes() {
        assert!(validate_unknown_keys::<Settings>("", &path()).is_ok());
    }

    #[test]
    fn top_level_typo_reports_line() {
        let found = unknown("save_policy = \"create-missing\"\nsave_polcy = 1\n");
        assert_eq!(found, vec![("save_polcy".to_string(), 2)]);
    }

    #[test]
    fn nested_typo_is_dotted() {
        let found = unknown("[theme]\nname = \"dark\"\ncolour = \"red\"\n");
        assert_eq!(found, vec![("theme.colour".to_string(), 3)]);
    }

    #[test]
    fn deep_section_header_is_tracked() {
        let found = unknown("[theme.custom]\nsucess = \"green\"\n");
        assert_eq!(found, vec![("theme.custom.sucess".to_string(), 2)]);
    }

    #[test]
    fn several_typos_are_all_reported() {
        let found = unknown("one = 1\ntwo = 2\n");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let result = validate_unknown_keys::<Settings>("save_policy = ", &path());
        assert!(matches!(result, Err(IxpError::SettingsParse { .. })));
    }

    #[test]
    fn line_of_missing_key_is_zero() {
        assert_eq!(line_of("a = 1\n", "b"), 0);
    }
}
