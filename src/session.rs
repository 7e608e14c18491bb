//! File-session operations against the managed `IxpSettings.json`.
//!
//! A [`Session`] is two candidate directories plus a [`SavePolicy`]. It keeps
//! no other state: every operation re-resolves the active file and goes to disk,
//! and every file handle is opened and released inside the operation.
//!
//! Mutating operations run all of their checks first. If a precondition or
//! validation fails, the filesystem is left exactly as it was found.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::attr;
use crate::document;
use crate::error::IxpError;
use crate::file::{ActiveFile, Locations};
use crate::ops::{IxpResult, Relocation, SaveReport, StatusReport};
use crate::types::{
    BufferOrigin, EditorBuffer, EnsureOutcome, IxpAction, Location, SavePolicy, Writability,
};

#[derive(Debug, Clone)]
pub struct Session {
    locations: Locations,
    save_policy: SavePolicy,
}

impl Session {
    pub fn new(locations: Locations) -> Self {
        Self {
            locations,
            save_policy: SavePolicy::default(),
        }
    }

    pub fn with_save_policy(mut self, policy: SavePolicy) -> Self {
        self.save_policy = policy;
        self
    }

    pub fn locations(&self) -> &Locations {
        &self.locations
    }

    pub fn save_policy(&self) -> SavePolicy {
        self.save_policy
    }

    pub fn resolve(&self) -> Option<ActiveFile> {
        self.locations.resolve()
    }

    /// Read the active file verbatim. Invalid JSON is returned as-is so the
    /// user can see and repair it.
    ///
    /// Bytes that are not UTF-8 show up as U+FFFD rather than failing the
    /// load; saving the buffer afterwards replaces them for good.
    pub fn load(&self) -> Result<EditorBuffer, IxpError> {
        let active = self.resolve().ok_or_else(|| self.no_active_file())?;
        let bytes = fs::read(&active.path).map_err(|e| IxpError::io(&active.path, e))?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!("{} is not valid UTF-8", active.path.display());
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        debug!("loaded {} bytes from {}", text.len(), active.path.display());
        Ok(EditorBuffer {
            text,
            origin: BufferOrigin::Target {
                location: active.location,
                path: active.path,
            },
        })
    }

    /// Validate `text` and overwrite the active file with its pretty-printed form.
    ///
    /// Blank text and invalid JSON are rejected before the filesystem is
    /// touched. With no active file, [`SavePolicy::RequireExisting`] reports
    /// it; [`SavePolicy::CreateMissing`] creates the primary file instead.
    pub fn save(&self, text: &str) -> Result<SaveReport, IxpError> {
        let content = document::prepare(text)?;

        let (target, created) = match self.resolve() {
            Some(active) => (active, false),
            None => match self.save_policy {
                SavePolicy::RequireExisting => return Err(self.no_active_file()),
                SavePolicy::CreateMissing => {
                    create_dir(self.locations.dir(Location::Primary))?;
                    let target = ActiveFile {
                        location: Location::Primary,
                        path: self.locations.primary_file(),
                    };
                    (target, true)
                }
            },
        };

        fs::write(&target.path, &content).map_err(|e| IxpError::io(&target.path, e))?;
        info!("saved {} ({} bytes)", target.path.display(), content.len());

        Ok(SaveReport {
            location: target.location,
            path: target.path,
            created,
        })
    }

    /// Make sure the primary file exists and holds valid JSON.
    ///
    /// A missing file is created as `{}`; a file that does not parse is reset
    /// to `{}`. The outcome says which, so a reset is never silent.
    pub fn ensure_exists(&self) -> Result<EnsureOutcome, IxpError> {
        create_dir(self.locations.dir(Location::Primary))?;
        let path = self.locations.primary_file();

        let outcome = match fs::read(&path) {
            Ok(bytes) if document::is_valid(&bytes) => return Ok(EnsureOutcome::AlreadyValid),
            Ok(_) => {
                warn!("{} is not valid JSON, resetting to {{}}", path.display());
                EnsureOutcome::Reset
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => EnsureOutcome::Created,
            Err(e) => return Err(IxpError::io(&path, e)),
        };

        fs::write(&path, document::empty_document()).map_err(|e| IxpError::io(&path, e))?;
        info!("{} {}", outcome_verb(outcome), path.display());
        Ok(outcome)
    }

    /// Flip the primary file between writable and read-only.
    ///
    /// Writability is queried fresh on every call, so changes made outside
    /// this tool are respected. Returns the state the file is now in.
    pub fn toggle_read_only(&self) -> Result<Writability, IxpError> {
        let path = self.require(Location::Primary)?;
        let next = attr::query(&path)?.flipped();
        attr::apply(&path, next)?;
        info!("{} is now {next}", path.display());
        Ok(next)
    }

    /// Move the primary file into the secondary directory.
    ///
    /// The file is made writable first so the rename cannot trip over the
    /// read-only attribute.
    pub fn move_to_secondary(&self) -> Result<Relocation, IxpError> {
        self.relocate(Location::Primary, Location::Secondary)
    }

    /// Move the secondary file back into the primary directory.
    ///
    /// The file keeps whatever read-only attribute it already carried.
    pub fn restore_to_primary(&self) -> Result<Relocation, IxpError> {
        self.relocate(Location::Secondary, Location::Primary)
    }

    /// Read an arbitrary JSON file and stage its pretty-printed form.
    ///
    /// Nothing is written; an explicit [`save`](Self::save) persists it.
    pub fn import_external(&self, path: &Path) -> Result<EditorBuffer, IxpError> {
        let failed = |reason: String| IxpError::ImportFailed {
            path: path.to_path_buf(),
            reason,
        };
        let raw = fs::read_to_string(path).map_err(|e| failed(e.to_string()))?;
        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| failed(format!("invalid JSON: {e}")))?;
        debug!("imported {}", path.display());
        Ok(EditorBuffer {
            text: document::pretty(&value)?,
            origin: BufferOrigin::Imported(path.to_path_buf()),
        })
    }

    /// Snapshot of both candidate locations.
    pub fn status(&self) -> StatusReport {
        let primary = self.locations.primary_file();
        let primary_state = primary
            .is_file()
            .then(|| attr::query(&primary).ok())
            .flatten();
        StatusReport {
            secondary_exists: self.locations.exists(Location::Secondary),
            secondary: self.locations.secondary_file(),
            primary_exists: primary.is_file(),
            primary,
            active: self.resolve().map(|a| a.location),
            primary_state,
        }
    }

    /// Run one [`IxpAction`] and describe what happened.
    pub fn handle(&self, action: &IxpAction) -> Result<IxpResult, IxpError> {
        match action {
            IxpAction::Load => self.load().map(IxpResult::Loaded),
            IxpAction::Save { text } => self.save(text).map(IxpResult::Saved),
            IxpAction::Ensure => Ok(IxpResult::Ensured {
                outcome: self.ensure_exists()?,
                path: self.locations.primary_file(),
            }),
            IxpAction::ToggleReadOnly => Ok(IxpResult::ReadOnlyToggled {
                state: self.toggle_read_only()?,
                path: self.locations.primary_file(),
            }),
            IxpAction::MoveToSecondary => self.move_to_secondary().map(IxpResult::Moved),
            IxpAction::RestoreToPrimary => self.restore_to_primary().map(IxpResult::Restored),
            IxpAction::Import { path, save: false } => {
                self.import_external(path).map(IxpResult::Imported)
            }
            IxpAction::Import { path, save: true } => {
                let buffer = self.import_external(path)?;
                Ok(IxpResult::ImportedAndSaved {
                    source: path.clone(),
                    saved: self.save(&buffer.text)?,
                })
            }
            IxpAction::Status => Ok(IxpResult::Status(self.status())),
        }
    }

    fn relocate(&self, from: Location, to: Location) -> Result<Relocation, IxpError> {
        let src = self.require(from)?;
        let dst = self.locations.file(to);
        if dst.exists() {
            return Err(IxpError::DestinationExists { path: dst });
        }

        create_dir(self.locations.dir(to))?;
        let cleared = from == Location::Primary && attr::ensure_writable(&src)?;
        if cleared {
            debug!("cleared read-only attribute on {}", src.display());
        }
        if let Err(e) = fs::rename(&src, &dst) {
            // The file stays put, so it keeps the attribute it had.
            if cleared {
                attr::apply(&src, Writability::ReadOnly)?;
            }
            return Err(IxpError::io(&src, e));
        }
        info!("moved {} -> {}", src.display(), dst.display());

        Ok(Relocation { from: src, to: dst })
    }

    fn require(&self, location: Location) -> Result<PathBuf, IxpError> {
        let path = self.locations.file(location);
        if path.is_file() {
            Ok(path)
        } else {
            Err(IxpError::NotFound { location, path })
        }
    }

    fn no_active_file(&self) -> IxpError {
        IxpError::NoActiveFile {
            primary: self.locations.primary_file(),
            secondary: self.locations.secondary_file(),
        }
    }
}

fn create_dir(dir: &Path) -> Result<(), IxpError> {
    fs::create_dir_all(dir).map_err(|e| IxpError::io(dir, e))
}

fn outcome_verb(outcome: EnsureOutcome) -> &'static str {
    match outcome {
        EnsureOutcome::Created => "created",
        EnsureOutcome::Reset => "reset",
        EnsureOutcome::AlreadyValid => "kept",
    }
}
