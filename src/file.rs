//! Discovery of the managed `IxpSettings.json`.
//!
//! There are exactly two candidate directories:
//!
//! - **Primary**: `<home>/AppData/Local/Roblox/ClientSettings`, where the
//!   Roblox client reads its settings.
//! - **Secondary**: `<home>/AppData/Local/Fishstrap/Modifications/ClientSettings`,
//!   where the Fishstrap launcher keeps files it overlays onto the client.
//!
//! [`Locations::resolve`] checks them in **priority-descending** order:
//! secondary first, then primary. The launcher's copy wins when both exist
//! because it is the one the client will end up seeing.
//!
//! Resolution is a pure existence check against the live filesystem. Nothing
//! is cached, so every call reflects files moved or deleted since the last
//! one, and a missing file is a `None`, never an error.

use std::path::{Path, PathBuf};

use log::debug;

use crate::types::{IXP_FILE_NAME, Location};

const PRIMARY_SEGMENTS: [&str; 4] = ["AppData", "Local", "Roblox", "ClientSettings"];
const SECONDARY_SEGMENTS: [&str; 5] = [
    "AppData",
    "Local",
    "Fishstrap",
    "Modifications",
    "ClientSettings",
];

/// Resolution order, highest priority first.
const PRIORITY: [Location; 2] = [Location::Secondary, Location::Primary];

/// The file the resolver picked, with the location it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFile {
    pub location: Location,
    pub path: PathBuf,
}

/// The two candidate directories for the target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    primary_dir: PathBuf,
    secondary_dir: PathBuf,
}

impl Locations {
    /// Use explicit directories. Handy for tests and for non-standard installs.
    pub fn new(primary_dir: impl Into<PathBuf>, secondary_dir: impl Into<PathBuf>) -> Self {
        Self {
            primary_dir: primary_dir.into(),
            secondary_dir: secondary_dir.into(),
        }
    }

    /// Derive both directories from a home directory.
    pub fn from_home(home: &Path) -> Self {
        Self::new(
            join_all(home, &PRIMARY_SEGMENTS),
            join_all(home, &SECONDARY_SEGMENTS),
        )
    }

    /// Derive both directories from the current user's home directory.
    ///
    /// Returns `None` if the platform reports no home directory.
    pub fn from_user_home() -> Option<Self> {
        let user = directories::UserDirs::new()?;
        Some(Self::from_home(user.home_dir()))
    }

    pub fn dir(&self, location: Location) -> &Path {
        match location {
            Location::Primary => &self.primary_dir,
            Location::Secondary => &self.secondary_dir,
        }
    }

    pub fn file(&self, location: Location) -> PathBuf {
        self.dir(location).join(IXP_FILE_NAME)
    }

    pub fn primary_file(&self) -> PathBuf {
        self.file(Location::Primary)
    }

    pub fn secondary_file(&self) -> PathBuf {
        self.file(Location::Secondary)
    }

    pub fn exists(&self, location: Location) -> bool {
        self.file(location).is_file()
    }

    /// Find the active file: secondary if present, else primary, else `None`.
    pub fn resolve(&self) -> Option<ActiveFile> {
        for location in PRIORITY {
            let path = self.file(location);
            if path.is_file() {
                debug!("resolved {location} file at {}", path.display());
                return Some(ActiveFile { location, path });
            }
        }
        debug!(
            "no {IXP_FILE_NAME} in {} or {}",
            self.secondary_dir.display(),
            self.primary_dir.display()
        );
        None
    }
}

fn join_all(base: &Path, segments: &[&str]) -> PathBuf {
    segments.iter().fold(base.to_path_buf(), |acc, s| acc.join(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::TestHome;

    #[test]
    fn from_home_builds_expected_layout() {
        let locs = Locations::from_home(Path::new("/home/user"));
        assert_eq!(
            locs.primary_file(),
            PathBuf::from("/home/user/AppData/Local/Roblox/ClientSettings/IxpSettings.json")
        );
        assert_eq!(
            locs.secondary_file(),
            PathBuf::from(
                "/home/user/AppData/Local/Fishstrap/Modifications/ClientSettings/IxpSettings.json"
            )
        );
    }

    #[test]
    fn resolve_none_when_both_absent() {
        let home = TestHome::new();
        assert_eq!(home.locations().resolve(), None);
    }

    #[test]
    fn resolve_primary_only() {
        let home = TestHome::new();
        home.write_primary("{\"a\":1}");
        let active = home.locations().resolve().unwrap();
        assert_eq!(active.location, Location::Primary);
        assert_eq!(active.path, home.locations().primary_file());
    }

    #[test]
    fn resolve_secondary_only() {
        let home = TestHome::new();
        home.write_secondary("{}");
        let active = home.locations().resolve().unwrap();
        assert_eq!(active.location, Location::Secondary);
    }

    #[test]
    fn secondary_wins_when_both_exist() {
        let home = TestHome::new();
        home.write_primary("{\"from\":\"primary\"}");
        home.write_secondary("{\"from\":\"secondary\"}");
        let locs = home.locations();
        for _ in 0..3 {
            let active = locs.resolve().unwrap();
            assert_eq!(active.location, Location::Secondary);
            assert_eq!(active.path, locs.secondary_file());
        }
    }

    #[test]
    fn resolve_reflects_filesystem_changes() {
        let home = TestHome::new();
        let locs = home.locations();
        home.write_secondary("{}");
        assert_eq!(locs.resolve().unwrap().location, Location::Secondary);

        std::fs::remove_file(locs.secondary_file()).unwrap();
        assert_eq!(locs.resolve(), None);

        home.write_primary("{}");
        assert_eq!(locs.resolve().unwrap().location, Location::Primary);
    }

    #[test]
    fn directory_named_like_the_file_is_not_resolved() {
        let home = TestHome::new();
        let locs = home.locations();
        std::fs::create_dir_all(locs.secondary_file()).unwrap();
        assert_eq!(locs.resolve(), None);
    }
}
