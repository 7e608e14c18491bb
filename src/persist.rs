//! Settings persistence: patch one key into `ixpman.toml`, keeping comments.
//!
//! A missing file is seeded from the generated template so the user gets a
//! documented starting point. The key must exist in [`Settings`], and the
//! patched document must still deserialize, before anything is written.

use std::path::Path;

use confique::Config;
use log::info;

use crate::error::IxpError;
use crate::ops::SettingsResult;
use crate::overrides;
use crate::settings::Settings;

/// Generate a commented TOML template from the settings struct's doc comments.
pub fn generate_template() -> String {
    confique::toml::template::<Settings>(confique::toml::FormatOptions::default())
}

/// Pure function: set `key` to `raw_value` in a settings document.
///
/// `content` of `None` means the file does not exist yet.
pub fn set_in_document(
    content: Option<&str>,
    key: &str,
    raw_value: &str,
) -> Result<String, IxpError> {
    if !overrides::valid_keys(&Settings::META).contains(key) {
        return Err(IxpError::InvalidSetting {
            key: key.into(),
            reason: "no such setting".into(),
        });
    }

    let base = content.map_or_else(generate_template, str::to_string);
    let invalid = |reason: String| IxpError::InvalidSetting {
        key: key.into(),
        reason,
    };

    let mut doc: toml_edit::DocumentMut = base
        .parse()
        .map_err(|e: toml_edit::TomlError| invalid(e.to_string()))?;

    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (parents.split('.').collect::<Vec<_>>(), leaf),
        None => (Vec::new(), key),
    };
    let mut table = doc.as_table_mut();
    for segment in parents {
        if !table.contains_key(segment) {
            table.insert(segment, toml_edit::Item::Table(toml_edit::Table::new()));
        }
        table = table[segment]
            .as_table_mut()
            .ok_or_else(|| invalid(format!("'{segment}' is not a section")))?;
    }
    table[leaf] = toml_edit::value(parse_value(raw_value));

    let patched = doc.to_string();
    let _: <Settings as Config>::Layer = toml::from_str(&patched)
        .map_err(|e: toml::de::Error| invalid(e.message().to_string()))?;
    Ok(patched)
}

/// I/O wrapper: read the file if present, patch it, write it back.
pub fn persist_value(
    file_path: &Path,
    key: &str,
    value: &str,
) -> Result<SettingsResult, IxpError> {
    let content = match std::fs::read_to_string(file_path) {
        Ok(c) => Some(c),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(IxpError::io(file_path, e)),
    };

    let new_content = set_in_document(content.as_deref(), key, value)?;

    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| IxpError::io(parent, e))?;
    }
    std::fs::write(file_path, &new_content).map_err(|e| IxpError::io(file_path, e))?;
    info!("set {key} = {value} in {}", file_path.display());

    Ok(SettingsResult::ValueSet {
        key: key.into(),
        value: value.into(),
        path: file_path.to_path_buf(),
    })
}

/// Booleans stay booleans; everything else is a string.
///
/// Every leaf in [`Settings`] is a string, path, enum or bool, so numeric
/// parsing would only turn `paths.home = 2024` into a type error.
fn parse_value(s: &str) -> toml_edit::Value {
    if s.eq_ignore_ascii_case("true") {
        return toml_edit::Value::from(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return toml_edit::Value::from(false);
    }
    toml_edit::Value::from(s)
}
