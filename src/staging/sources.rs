//! Providers the stager depends on: unique file names and a scratch root.

use std::path::PathBuf;

use uuid::Uuid;

/// Collision-resistant identifiers for staged file names.
pub trait UniqueNameSource: Send + Sync {
    fn unique_name(&self) -> String;
}

/// Writable scratch directory for staged assets.
pub trait ScratchDirectory: Send + Sync {
    fn root(&self) -> PathBuf;
}

/// Random UUID v4 names, upper-case and hyphenated.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidNameSource;

impl UniqueNameSource for UuidNameSource {
    fn unique_name(&self) -> String {
        Uuid::new_v4().hyphenated().to_string().to_uppercase()
    }
}

/// The platform temporary directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTempDir;

impl ScratchDirectory for SystemTempDir {
    fn root(&self) -> PathBuf {
        std::env::temp_dir()
    }
}

/// A fixed, caller-chosen directory.
#[derive(Debug, Clone)]
pub struct FixedScratchDir(pub PathBuf);

impl ScratchDirectory for FixedScratchDir {
    fn root(&self) -> PathBuf {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_names_are_unique() {
        let source = UuidNameSource;
        let names: HashSet<String> = (0..256).map(|_| source.unique_name()).collect();
        assert_eq!(names.len(), 256);
    }

    #[test]
    fn test_uuid_name_shape() {
        let name = UuidNameSource.unique_name();
        assert_eq!(name.len(), 36);
        assert_eq!(name, name.to_uppercase());
        assert!(Uuid::parse_str(&name).is_ok());
    }

    #[test]
    fn test_fixed_dir() {
        let dir = FixedScratchDir(PathBuf::from("/data/staging"));
        assert_eq!(dir.root(), PathBuf::from("/data/staging"));
        assert_eq!(SystemTempDir.root(), std::env::temp_dir());
    }
}
