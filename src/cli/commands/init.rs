//! `chd init` command - Initialize a project and its catalog

use console::style;
use miette::{IntoDiagnostic, Result};
use tracing::info;

use crate::core::project::{Project, ProjectError};
use crate::core::{Catalog, Config};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Force initialization even if .chd/ already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let project = if args.force {
        Project::init_force(&path)
    } else {
        Project::init(&path)
    };

    match project {
        Ok(project) => {
            let config = Config::load(Some(&project));
            let catalog_path = config.catalog_path(&project);
            Catalog::open(&catalog_path).into_diagnostic()?;
            info!(catalog = %catalog_path.display(), "catalog ready");

            println!(
                "{} Initialized CHD project at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );
            println!();
            println!("Created:");
            println!("  .chd/config.yaml   - Project configuration");
            println!("  .chd/catalog.db    - Reference catalog (empty)");
            println!("  .chd/imports/      - Place for source CSV files");
            println!();
            println!("Next steps:");
            println!(
                "  {}   Get a CSV layout for each catalog table",
                style("chd import --template contacts").yellow()
            );
            println!(
                "  {}   Load contacts into the catalog",
                style("chd import contacts contacts.csv").yellow()
            );
            println!(
                "  {}   Configure a connector",
                style("chd build --interactive").yellow()
            );
            Ok(())
        }
        Err(ProjectError::AlreadyExists(p)) => {
            println!(
                "{} CHD project already exists at {}",
                style("!").yellow(),
                style(p.display()).cyan()
            );
            println!("  Use {} to reinitialize", style("--force").yellow());
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
