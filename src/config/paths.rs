//! Grant project file locations
//!
//! A grant project is a directory holding `grant.yaml`, `budget.yaml`, and a
//! `responses/` directory of markdown section files.

use std::path::{Path, PathBuf};

/// File locations within one grant project directory
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    /// Create paths rooted at a grant directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the budget specification
    pub fn budget_file(&self) -> PathBuf {
        self.root.join("budget.yaml")
    }

    /// Path to the grant metadata
    pub fn grant_file(&self) -> PathBuf {
        self.root.join("grant.yaml")
    }

    /// Directory of markdown response sections
    pub fn responses_dir(&self) -> PathBuf {
        self.root.join("responses")
    }

    /// Check whether this directory looks like a grant project
    pub fn is_project(&self) -> bool {
        self.grant_file().exists() || self.budget_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_layout() {
        let paths = ProjectPaths::new("/tmp/my-grant");
        assert_eq!(paths.budget_file(), PathBuf::from("/tmp/my-grant/budget.yaml"));
        assert_eq!(paths.grant_file(), PathBuf::from("/tmp/my-grant/grant.yaml"));
        assert_eq!(paths.responses_dir(), PathBuf::from("/tmp/my-grant/responses"));
    }

    #[test]
    fn test_is_project() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ProjectPaths::new(dir.path());
        assert!(!paths.is_project());

        std::fs::write(paths.grant_file(), "name: Test\n").unwrap();
        assert!(paths.is_project());
    }
}
