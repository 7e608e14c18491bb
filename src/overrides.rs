//! Dotted-key overrides for settings, e.g. `("theme.name", "light")`.
//!
//! CLI flags arrive as flat `(key, value)` pairs. They are expanded into the
//! nested table shape the settings file uses so they can be deserialized as
//! one more layer.

use std::collections::BTreeSet;

use confique::meta::{FieldKind, Meta};
use toml::{Table, Value};

use crate::error::IxpError;

/// Expand `("paths.home", v)` into `{paths = {home = v}}`.
///
/// Later entries for the same key win.
pub fn overrides_to_table(entries: &[(String, Value)]) -> Result<Table, IxpError> {
    let mut root = Table::new();
    for (dotted_key, value) in entries {
        let (parents, leaf) = match dotted_key.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, dotted_key.as_str()),
        };

        let mut table = &mut root;
        for segment in parents.into_iter().flat_map(|p| p.split('.')) {
            table = table
                .entry(segment)
                .or_insert_with(|| Value::Table(Table::new()))
                .as_table_mut()
                .ok_or_else(|| IxpError::InvalidSetting {
                    key: dotted_key.clone(),
                    reason: format!("'{segment}' is a value, not a section"),
                })?;
        }
        table.insert(leaf.to_string(), value.clone());
    }
    Ok(root)
}

/// Every settable dotted key in a settings struct, sections excluded.
pub fn valid_keys(meta: &Meta) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    collect(meta, None, &mut keys);
    keys
}

fn collect(meta: &Meta, prefix: Option<&str>, keys: &mut BTreeSet<String>) {
    for field in meta.fields {
        let key = match prefix {
            Some(prefix) => format!("{prefix}.{}", field.name),
            None => field.name.to_string(),
        };
        match &field.kind {
            FieldKind::Leaf { .. } => {
                keys.insert(key);
            }
            FieldKind::Nested { meta, .. } => collect(meta, Some(&key), keys),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use confique::Config;

    #[test]
    fn flat_and_nested_keys() {
        let table = overrides_to_table(&[
            ("save_policy".into(), Value::String("create-missing".into())),
            ("theme.custom.error".into(), Value::String("magenta".into())),
        ])
        .unwrap();
        assert_eq!(table["save_policy"].as_str(), Some("create-missing"));
        assert_eq!(table["theme"]["custom"]["error"].as_str(), Some("magenta"));
    }

    #[test]
    fn later_entry_wins() {
        let table = overrides_to_table(&[
            ("theme.name".into(), Value::String("dark".into())),
            ("theme.name".into(), Value::String("light".into())),
        ])
        .unwrap();
        assert_eq!(table["theme"]["name"].as_str(), Some("light"));
    }

    #[test]
    fn value_used_as_section_is_rejected() {
        let result = overrides_to_table(&[
            ("theme".into(), Value::String("dark".into())),
            ("theme.name".into(), Value::String("light".into())),
        ]);
        assert!(matches!(result, Err(IxpError::InvalidSetting { .. })));
    }

    #[test]
    fn valid_keys_cover_all_leaves() {
        let keys = valid_keys(&Settings::META);
        for key in [
            "save_policy",
            "paths.home",
            "paths.primary_dir",
            "paths.secondary_dir",
            "theme.name",
            "theme.custom.success",
            "theme.custom.accent",
        ] {
            assert!(keys.contains(key), "missing {key}");
        }
        assert!(!keys.contains("theme"));
        assert!(!keys.contains("theme.custom"));
    }
}
