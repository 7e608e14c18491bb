//! Operation outcomes and how they read to a user.
//!
//! Every successful [`IxpAction`](crate::IxpAction) produces one [`IxpResult`]
//! variant, and each variant has its own wording so the presentation layer can
//! show a distinct notification for it.

use std::fmt;
use std::path::PathBuf;

use crate::types::{BufferOrigin, EditorBuffer, EnsureOutcome, Location, Writability};

/// Where a save landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub location: Location,
    pub path: PathBuf,
    /// The file did not exist before this save.
    pub created: bool,
}

/// A completed move between the two locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Both candidate locations at a glance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub primary: PathBuf,
    pub primary_exists: bool,
    pub secondary: PathBuf,
    pub secondary_exists: bool,
    pub active: Option<Location>,
    /// `None` when the primary file is absent.
    pub primary_state: Option<Writability>,
}

/// Result of an action. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum IxpResult {
    Loaded(EditorBuffer),
    Saved(SaveReport),
    Ensured { path: PathBuf, outcome: EnsureOutcome },
    ReadOnlyToggled { path: PathBuf, state: Writability },
    Moved(Relocation),
    Restored(Relocation),
    Imported(EditorBuffer),
    ImportedAndSaved { source: PathBuf, saved: SaveReport },
    Status(StatusReport),
}

impl IxpResult {
    /// The editor text this result carries, if any.
    pub fn buffer(&self) -> Option<&EditorBuffer> {
        match self {
            IxpResult::Loaded(buf) | IxpResult::Imported(buf) => Some(buf),
            _ => None,
        }
    }

    /// One-line title for the notification.
    pub fn title(&self) -> &'static str {
        match self {
            IxpResult::Loaded(_) => "Loaded",
            IxpResult::Saved(_) => "Saved",
            IxpResult::Ensured {
                outcome: EnsureOutcome::Reset,
                ..
            } => "Corrupted, reset",
            IxpResult::Ensured { .. } => "Ready",
            IxpResult::ReadOnlyToggled {
                state: Writability::ReadOnly,
                ..
            } => "Read-Only",
            IxpResult::ReadOnlyToggled { .. } => "Writable",
            IxpResult::Moved(_) => "Moved",
            IxpResult::Restored(_) => "Restored",
            IxpResult::Imported(_) => "Imported",
            IxpResult::ImportedAndSaved { .. } => "Imported and saved",
            IxpResult::Status(_) => "Status",
        }
    }
}

impl fmt::Display for IxpResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IxpResult::Loaded(buf) => match &buf.origin {
                BufferOrigin::Target { location, path } => {
                    write!(f, "Loaded {} ({location})", path.display())
                }
                BufferOrigin::Imported(path) => write!(f, "Loaded {}", path.display()),
            },
            IxpResult::Saved(report) => fmt_saved(f, report),
            IxpResult::Ensured { path, outcome } => match outcome {
                EnsureOutcome::Created => write!(f, "Created {} with {{}}", path.display()),
                EnsureOutcome::Reset => write!(
                    f,
                    "{} was not valid JSON and has been reset to {{}}",
                    path.display()
                ),
                EnsureOutcome::AlreadyValid => {
                    write!(f, "{} exists and is valid JSON", path.display())
                }
            },
            IxpResult::ReadOnlyToggled { path, state } => {
                write!(f, "{} set to {state}", path.display())
            }
            IxpResult::Moved(r) => write!(
                f,
                "Moved to Fishstrap: {} -> {}",
                r.from.display(),
                r.to.display()
            ),
            IxpResult::Restored(r) => write!(
                f,
                "Restored to Roblox: {} -> {}",
                r.from.display(),
                r.to.display()
            ),
            IxpResult::Imported(buf) => match &buf.origin {
                BufferOrigin::Imported(path) => write!(
                    f,
                    "Imported {} into the editor (not saved yet)",
                    path.display()
                ),
                BufferOrigin::Target { path, .. } => write!(f, "Imported {}", path.display()),
            },
            IxpResult::ImportedAndSaved { source, saved } => {
                write!(f, "Imported {}; ", source.display())?;
                fmt_saved(f, saved)
            }
            IxpResult::Status(s) => {
                fmt_location(
                    f,
                    "primary",
                    &s.primary,
                    s.primary_exists,
                    s.active == Some(Location::Primary),
                )?;
                if let Some(state) = s.primary_state {
                    write!(f, " [{state}]")?;
                }
                writeln!(f)?;
                fmt_location(
                    f,
                    "secondary",
                    &s.secondary,
                    s.secondary_exists,
                    s.active == Some(Location::Secondary),
                )?;
                if s.active.is_none() {
                    write!(f, "\nno active IxpSettings.json")?;
                }
                Ok(())
            }
        }
    }
}

/// Result of a [`SettingsAction`](crate::SettingsAction).
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsResult {
    Template(String),
    TemplateWritten { path: PathBuf },
    Resolved(String),
    ValueSet { key: String, value: String, path: PathBuf },
}

impl fmt::Display for SettingsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsResult::Template(t) | SettingsResult::Resolved(t) => write!(f, "{t}"),
            SettingsResult::TemplateWritten { path } => {
                write!(f, "Wrote settings template to {}", path.display())
            }
            SettingsResult::ValueSet { key, value, path } => {
                write!(f, "Set {key} = {value} in {}", path.display())
            }
        }
    }
}

fn fmt_saved(f: &mut fmt::Formatter<'_>, report: &SaveReport) -> fmt::Result {
    if report.created {
        write!(f, "Created and saved {}", report.path.display())
    } else {
        write!(f, "Saved {} ({})", report.path.display(), report.location)
    }
}

fn fmt_location(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    path: &std::path::Path,
    exists: bool,
    active: bool,
) -> fmt::Result {
    let marker = if active { "*" } else { " " };
    let state = if exists { "present" } else { "absent" };
    write!(f, "{marker} {label:<9}  {state:<7}  {}", path.display())
}
