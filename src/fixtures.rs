#[cfg(test)]
pub mod test {
    use std::fs;
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use crate::file::Locations;
    use crate::session::Session;
    use crate::types::{Location, SavePolicy};

    /// A throwaway home directory laid out like a Windows user profile.
    pub struct TestHome {
        dir: TempDir,
    }

    impl TestHome {
        pub fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        pub fn path(&self) -> &Path {
            self.dir.path()
        }

        pub fn locations(&self) -> Locations {
            Locations::from_home(self.dir.path())
        }

        pub fn session(&self) -> Session {
            Session::new(self.locations())
        }

        pub fn session_with(&self, policy: SavePolicy) -> Session {
            Session::new(self.locations()).with_save_policy(policy)
        }

        pub fn write(&self, location: Location, content: &str) -> PathBuf {
            let locs = self.locations();
            fs::create_dir_all(locs.dir(location)).unwrap();
            let path = locs.file(location);
            fs::write(&path, content).unwrap();
            path
        }

        pub fn write_primary(&self, content: &str) -> PathBuf {
            self.write(Location::Primary, content)
        }

        pub fn write_secondary(&self, content: &str) -> PathBuf {
            self.write(Location::Secondary, content)
        }

        pub fn read(&self, location: Location) -> String {
            fs::read_to_string(self.locations().file(location)).unwrap()
        }

        /// Write an arbitrary file outside the two candidate locations.
        pub fn write_external(&self, name: &str, content: &str) -> PathBuf {
            let path = self.dir.path().join("Downloads").join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
            path
        }
    }

    pub fn parse(text: &str) -> serde_json::Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_home_starts_empty() {
        let home = TestHome::new();
        let locs = home.locations();
        assert!(!locs.exists(Location::Primary));
        assert!(!locs.exists(Location::Secondary));
        assert!(locs.primary_file().starts_with(home.path()));
    }
}
