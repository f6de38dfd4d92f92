//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Catalog, Config, Project};

/// Locate the project from `--project` or by walking up from the cwd
pub fn open_project(global: &GlobalOpts) -> Result<Project> {
    let project = match &global.project {
        Some(path) => Project::discover_from(path),
        None => Project::discover(),
    };
    project.map_err(|e| miette::miette!("{}", e))
}

/// Open the project, its layered config, and its catalog
pub fn open_catalog(global: &GlobalOpts) -> Result<(Project, Config, Catalog)> {
    let project = open_project(global)?;
    let config = Config::load(Some(&project));
    let catalog = Catalog::open(&config.catalog_path(&project)).into_diagnostic()?;
    Ok((project, config, catalog))
}

/// Resolve `--format auto` against `default_format` from config
pub fn resolve_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.format.resolve(config.default_format.as_deref())
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Render an optional catalog field, "-" when absent
pub fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or("-")
        .to_string()
}
