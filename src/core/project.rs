//! Project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::catalog::CATALOG_FILE;

/// Name of the project marker directory
pub const PROJECT_DIR: &str = ".chd";

/// Represents a CHD project
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .chd/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new project structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if root.join(PROJECT_DIR).exists() {
            return Err(ProjectError::AlreadyExists(root));
        }

        Self::init_force(&root)
    }

    /// Initialize even if .chd/ exists; an existing config is rewritten
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let chd_dir = root.join(PROJECT_DIR);
        std::fs::create_dir_all(chd_dir.join("imports"))
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        std::fs::write(chd_dir.join("config.yaml"), Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# CHD Project Configuration

# Catalog database (default: .chd/catalog.db)
# catalog: ""

# Default wire system for the builder (awg or mm2)
# wire_system: awg

# Default shell style code for the builder
# shell_style: ""

# Default output format (auto, yaml, tsv, json, csv, md, id)
# default_format: auto
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .chd configuration directory
    pub fn chd_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Default location of the catalog database
    pub fn catalog_path(&self) -> PathBuf {
        self.chd_dir().join(CATALOG_FILE)
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not a CHD project (searched from {searched_from:?}). Run 'chd init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("CHD project already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_project_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        assert!(project.chd_dir().is_dir());
        assert!(project.chd_dir().join("config.yaml").exists());
        assert!(project.chd_dir().join("imports").is_dir());
        assert_eq!(project.catalog_path(), project.chd_dir().join("catalog.db"));
    }

    #[test]
    fn test_project_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let err = Project::init(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyExists(_)));
        assert!(Project::init_force(tmp.path()).is_ok());
    }

    #[test]
    fn test_project_discover_finds_chd_dir() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("harness/rev-b");
        std::fs::create_dir_all(&subdir).unwrap();

        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_project_discover_fails_without_chd_dir() {
        let tmp = tempdir().unwrap();
        let err = Project::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }
}
