// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Path constants and utilities for the document storage layout.

use std::path::{Path, PathBuf};

/// Default base directory for persistent storage.
/// Overridden by the `DATA_DIR` environment variable at startup.
pub const DATA_ROOT: &str = "/data";

/// Storage path utilities for the document store.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all stored documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== Principal Paths ==========

    /// Directory containing all account records.
    pub fn principals_dir(&self) -> PathBuf {
        self.root.join("principals")
    }

    /// Path to a specific account record.
    pub fn principal(&self, principal_id: &str) -> PathBuf {
        self.principals_dir().join(format!("{principal_id}.json"))
    }

    // ========== Blood Unit Paths ==========

    /// Directory containing all blood units.
    pub fn units_dir(&self) -> PathBuf {
        self.root.join("units")
    }

    /// Path to a specific blood unit.
    pub fn unit(&self, unit_id: &str) -> PathBuf {
        self.units_dir().join(format!("{unit_id}.json"))
    }

    // ========== Donation Camp Paths ==========

    /// Directory containing all donation camps.
    pub fn camps_dir(&self) -> PathBuf {
        self.root.join("camps")
    }

    /// Path to a specific donation camp.
    pub fn camp(&self, camp_id: &str) -> PathBuf {
        self.camps_dir().join(format!("{camp_id}.json"))
    }

    // ========== Blood Request Paths ==========

    /// Directory containing all blood requests.
    pub fn requests_dir(&self) -> PathBuf {
        self.root.join("requests")
    }

    /// Path to a specific blood request.
    pub fn request(&self, request_id: &str) -> PathBuf {
        self.requests_dir().join(format!("{request_id}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_use_data_root() {
        let paths = StoragePaths::default();
        assert_eq!(paths.root(), Path::new("/data"));
    }

    #[test]
    fn custom_root_for_testing() {
        let paths = StoragePaths::new("/tmp/test-data");
        assert_eq!(paths.root(), Path::new("/tmp/test-data"));
        assert_eq!(
            paths.principal("p-123"),
            PathBuf::from("/tmp/test-data/principals/p-123.json")
        );
    }

    #[test]
    fn entity_paths_are_correct() {
        let paths = StoragePaths::default();
        assert_eq!(paths.principals_dir(), PathBuf::from("/data/principals"));
        assert_eq!(paths.unit("u1"), PathBuf::from("/data/units/u1.json"));
        assert_eq!(paths.camp("c1"), PathBuf::from("/data/camps/c1.json"));
        assert_eq!(
            paths.request("r1"),
            PathBuf::from("/data/requests/r1.json")
        );
    }
}
