//! `chd config` command - Configuration inspection

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_project;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show(ShowArgs),

    /// Show paths to configuration files
    Path,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("catalog", "Catalog database path (relative to the project root)"),
    ("wire_system", "Default wire system for `chd build` (awg, mm2)"),
    ("shell_style", "Default shell style code for `chd build`"),
    ("default_format", "Default output format (yaml, json, tsv, etc.)"),
];

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Path => run_path(global),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    // Config is still meaningful outside a project (global file + env)
    let project = open_project(global).ok();
    let config = Config::load(project.as_ref());

    if let Some(key) = &args.key {
        return match get_config_value(&config, key) {
            Some(value) => {
                println!("{}", value);
                Ok(())
            }
            None if VALID_KEYS.iter().any(|(k, _)| k == key) => {
                Err(miette::miette!("Key '{}' is not set", key))
            }
            None => Err(miette::miette!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                VALID_KEYS
                    .iter()
                    .map(|(k, _)| *k)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        };
    }

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&config).into_diagnostic()?);
        }
        _ => {
            println!("{}", style("Effective Configuration").bold().underlined());
            println!();
            for (key, description) in VALID_KEYS {
                let value = get_config_value(&config, key);
                match value {
                    Some(v) => println!("  {:<16} {}", style(key).cyan(), v),
                    None => println!("  {:<16} {}", style(key).cyan(), style("(not set)").dim()),
                }
                if global.verbose {
                    println!("  {:<16} {}", "", style(description).dim());
                }
            }
            println!();
            println!("{}", style("Config Sources (in priority order):").dim());
            println!("  1. Environment variables (CHD_CATALOG, CHD_WIRE_SYSTEM, CHD_SHELL_STYLE)");
            println!("  2. Project config (.chd/config.yaml)");
            println!("  3. Global config (~/.config/chd/config.yaml)");
        }
    }

    Ok(())
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    match Config::global_config_path() {
        Some(path) => println!(
            "{} {}{}",
            style("Global: ").bold(),
            path.display(),
            exists_marker(path.exists())
        ),
        None => println!("{} (no home directory)", style("Global: ").bold()),
    }

    match open_project(global) {
        Ok(project) => {
            let path = Config::project_config_path(&project);
            println!(
                "{} {}{}",
                style("Project:").bold(),
                path.display(),
                exists_marker(path.exists())
            );
        }
        Err(_) => println!("{} (not in a CHD project)", style("Project:").bold()),
    }

    Ok(())
}

fn exists_marker(exists: bool) -> String {
    if exists {
        String::new()
    } else {
        style(" (not found)").dim().to_string()
    }
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "catalog" => config.catalog.as_ref().map(|p| p.display().to_string()),
        "wire_system" => config.wire_system.clone(),
        "shell_style" => config.shell_style.clone(),
        "default_format" => config.default_format.clone(),
        _ => None,
    }
}
