//! Settings resolution: stack every layer and produce a typed [`Settings`].
//!
//! Operates on pre-loaded data ([`ResolveInput`]) so the whole pipeline can be
//! tested with synthetic files. Steps:
//!
//! 1. Validate each file for unknown keys (if strict)
//! 2. Parse each file into a settings layer
//! 3. Turn CLI overrides into a layer of their own
//! 4. Let confique stack overrides > environment > files > defaults

use std::path::PathBuf;

use confique::Config;
use toml::Value;

use crate::error::IxpError;
use crate::overrides;
use crate::settings::Settings;
use crate::validate;

type SettingsLayer = <Settings as Config>::Layer;

/// All pre-loaded data needed to resolve settings. No I/O happens here.
pub struct ResolveInput {
    /// File contents in precedence order: first = lowest priority, last = highest.
    pub files: Vec<(PathBuf, String)>,
    /// CLI overrides as `(dotted_key, value)` pairs.
    pub overrides: Vec<(String, Value)>,
    /// Whether to read `IXPMAN_*` environment variables.
    pub env: bool,
    /// Whether to reject unknown keys in settings files.
    pub strict: bool,
}

pub fn resolve(input: ResolveInput) -> Result<Settings, IxpError> {
    let mut file_layers = Vec::with_capacity(input.files.len());
    for (path, content) in &input.files {
        if input.strict {
            validate::validate_unknown_keys::<Settings>(content, path)?;
        }
        let layer: SettingsLayer =
            toml::from_str(content).map_err(|e| IxpError::SettingsParse {
                path: path.clone(),
                source: e,
            })?;
        file_layers.push(layer);
    }

    let cli_table = overrides::overrides_to_table(&input.overrides)?;
    let cli_layer: SettingsLayer = Value::Table(cli_table).try_into().map_err(
        |e: toml::de::Error| IxpError::InvalidSetting {
            key: override_keys(&input.overrides),
            reason: e.to_string(),
        },
    )?;

    // confique gives earlier sources higher priority.
    let mut builder = Settings::builder().preloaded(cli_layer);
    if input.env {
        builder = builder.env();
    }
    for layer in file_layers.into_iter().rev() {
        builder = builder.preloaded(layer);
    }
    Ok(builder.load()?)
}

fn override_keys(overrides: &[(String, Value)]) -> String {
    overrides
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeName;
    use crate::types::SavePolicy;

    fn empty_input() -> ResolveInput {
        ResolveInput {
            files: vec![],
            overrides: vec![],
            env: false,
            strict: true,
        }
    }

    #[test]
    fn defaults_only() {
        let settings = resolve(empty_input()).unwrap();
        assert_eq!(settings.save_policy, SavePolicy::RequireExisting);
        assert_eq!(settings.theme.name, ThemeName::Dark);
        assert_eq!(settings.paths.home, None);
    }

    #[test]
    fn file_overrides_default() {
        let input = ResolveInput {
            files: vec![(
                "ixpman.toml".into(),
                "save_policy = \"create-missing\"\n".into(),
            )],
            ..empty_input()
        };
        let settings = resolve(input).unwrap();
        assert_eq!(settings.save_policy, SavePolicy::CreateMissing);
        assert_eq!(settings.theme.name, ThemeName::Dark);
    }

    #[test]
    fn later_file_overrides_earlier() {
        let input = ResolveInput {
            files: vec![
                ("global.toml".into(), "[theme]\nname = \"light\"\n".into()),
                ("local.toml".into(), "[theme]\nname = \"plain\"\n".into()),
            ],
            ..empty_input()
        };
        assert_eq!(resolve(input).unwrap().theme.name, ThemeName::Plain);
    }

    #[test]
    fn files_layer_sparsely() {
        let input = ResolveInput {
            files: vec![
                (
                    "global.toml".into(),
                    "[paths]\nhome = \"/home/a\"\n[theme]\nname = \"light\"\n".into(),
                ),
                ("local.toml".into(), "[theme]\nname = \"custom\"\n".into()),
            ],
            ..empty_input()
        };
        let settings = resolve(input).unwrap();
        assert_eq!(settings.paths.home, Some(PathBuf::from("/home/a")));
        assert_eq!(settings.theme.name, ThemeName::Custom);
    }

    #[test]
    fn overrides_beat_files() {
        let input = ResolveInput {
            files: vec![(
                "ixpman.toml".into(),
                "save_policy = \"require-existing\"\n".into(),
            )],
            overrides: vec![(
                "save_policy".into(),
                Value::String("create-missing".into()),
            )],
            ..empty_input()
        };
        assert_eq!(
            resolve(input).unwrap().save_policy,
            SavePolicy::CreateMissing
        );
    }

    #[test]
    fn bad_override_value_is_invalid_setting() {
        let input = ResolveInput {
            overrides: vec![("theme.name".into(), Value::String("neon".into()))],
            ..empty_input()
        };
        match resolve(input) {
            Err(IxpError::InvalidSetting { key, .. }) => assert_eq!(key, "theme.name"),
            other => panic!("Expected InvalidSetting, got {other:?}"),
        }
    }

    #[test]
    fn strict_rejects_unknown_key() {
        let input = ResolveInput {
            files: vec![("bad.toml".into(), "typo = 1\n".into())],
            ..empty_input()
        };
        assert!(matches!(resolve(input), Err(IxpError::UnknownSettings(_))));
    }

    #[test]
    fn lenient_allows_unknown_key() {
        let input = ResolveInput {
            files: vec![(
                "ok.toml".into(),
                "typo = 1\nsave_policy = \"create-missing\"\n".into(),
            )],
            strict: false,
            ..empty_input()
        };
        assert_eq!(
            resolve(input).unwrap().save_policy,
            SavePolicy::CreateMissing
        );
    }

    #[test]
    fn bad_file_value_is_parse_error() {
        let input = ResolveInput {
            files: vec![("bad.toml".into(), "save_policy = \"sometimes\"\n".into())],
            ..empty_input()
        };
        assert!(matches!(
            resolve(input),
            Err(IxpError::SettingsParse { .. })
        ));
    }
}
