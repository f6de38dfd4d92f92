//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::core::Project;
use crate::glenair::wire::WireSystem;

/// CHD configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Catalog database path (relative paths resolve against the project root)
    pub catalog: Option<PathBuf>,

    /// Default wire system for the builder
    pub wire_system: Option<String>,

    /// Default shell style code for the builder
    pub shell_style: Option<String>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(project: Option<&Project>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/chd/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config (.chd/config.yaml)
        if let Some(project) = project {
            if let Some(project_config) = Self::read_file(&Self::project_config_path(project)) {
                config.merge(project_config);
            }
        }

        // 4. Environment variables
        if let Ok(catalog) = std::env::var("CHD_CATALOG") {
            config.catalog = Some(PathBuf::from(catalog));
        }
        if let Ok(system) = std::env::var("CHD_WIRE_SYSTEM") {
            config.wire_system = Some(system);
        }
        if let Ok(style) = std::env::var("CHD_SHELL_STYLE") {
            config.shell_style = Some(style);
        }

        config
    }

    /// Parse a config file; unreadable or malformed files are skipped
    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match Self::from_yaml(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Config, serde_yml::Error> {
        // A file with only comments deserializes as null
        if contents.lines().all(|l| l.trim().is_empty() || l.trim_start().starts_with('#')) {
            return Ok(Config::default());
        }
        serde_yml::from_str(contents)
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "chd")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Get the path to a project's config file
    pub fn project_config_path(project: &Project) -> PathBuf {
        project.chd_dir().join("config.yaml")
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.catalog.is_some() {
            self.catalog = other.catalog;
        }
        if other.wire_system.is_some() {
            self.wire_system = other.wire_system;
        }
        if other.shell_style.is_some() {
            self.shell_style = other.shell_style;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Catalog database location for a project
    pub fn catalog_path(&self, project: &Project) -> PathBuf {
        match &self.catalog {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => project.root().join(path),
            None => project.catalog_path(),
        }
    }

    /// Default wire system, falling back to AWG when unset or unrecognized
    pub fn wire_system(&self) -> WireSystem {
        self.wire_system
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Default shell style, if one is configured
    pub fn shell_style(&self) -> Option<&str> {
        self.shell_style.as_deref().filter(|s| !s.trim().is_empty())
    }
}
