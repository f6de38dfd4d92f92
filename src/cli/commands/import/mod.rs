//! `chd import` command - Load catalog tables from CSV files

mod arrangements;
mod common;
mod contacts;
mod phm;
mod wire_map;

use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::info;

use crate::cli::helpers::open_catalog;
use crate::cli::GlobalOpts;
use crate::core::Catalog;
use crate::entities::{check_arrangements, Arrangement, Contact, PhmMapping, WireContactMapping};

pub use common::{ImportOptions, ImportStats};

/// Catalog table an import targets
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportKind {
    /// Pin and socket contacts
    Contacts,
    /// Arrangement size breakdowns
    Arrangements,
    /// Wire size to contact size mappings
    WireMap,
    /// Arrangement to shell size / hardware dash number
    Phm,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Contacts => "contacts",
            ImportKind::Arrangements => "arrangements",
            ImportKind::WireMap => "wire-map",
            ImportKind::Phm => "phm",
        }
    }

    /// Header row, in template order
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ImportKind::Contacts => &[
                "part_number",
                "type",
                "contact_size",
                "awg_range",
                "mm2_range",
                "description",
            ],
            ImportKind::Arrangements => {
                &["arrangement", "total_contacts", "contact_size", "contact_count"]
            }
            ImportKind::WireMap => &["wire_size", "system", "contact_size"],
            ImportKind::Phm => &["arrangement", "shell_size", "dash_number"],
        }
    }

    /// One illustrative data row
    pub fn example(&self) -> &'static [&'static str] {
        match self {
            ImportKind::Contacts => &[
                "10-375-20",
                "Pin",
                "20",
                "26-20",
                "0.13-0.52",
                "\"Crimp contact, size 20\"",
            ],
            ImportKind::Arrangements => &["10SL-3", "3", "20", "3"],
            ImportKind::WireMap => &["20", "AWG", "20"],
            ImportKind::Phm => &["10SL-3", "10", "10"],
        }
    }

    fn required(&self) -> &'static [&'static str] {
        match self {
            ImportKind::Contacts => contacts::REQUIRED,
            ImportKind::Arrangements => arrangements::REQUIRED,
            ImportKind::WireMap => wire_map::REQUIRED,
            ImportKind::Phm => phm::REQUIRED,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Catalog table to import into
    #[arg(value_enum)]
    pub kind: Option<ImportKind>,

    /// CSV file to import
    pub file: Option<PathBuf>,

    /// Print a CSV template for the table instead of importing
    #[arg(long)]
    pub template: bool,

    /// Validate the CSV without writing to the catalog
    #[arg(long)]
    pub dry_run: bool,

    /// Continue importing after errors (default: stop on first error)
    #[arg(long)]
    pub skip_errors: bool,
}

/// Print a CSV template for a table to stdout
pub fn generate_template(kind: ImportKind) -> Result<()> {
    println!("{}", kind.headers().join(","));
    println!("{}", kind.example().join(","));

    // Hint goes to stderr so redirected output stays a clean CSV
    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to file: chd import --template {} > {}.csv",
        style("→").blue(),
        kind.as_str(),
        kind.as_str()
    );

    Ok(())
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    if args.template {
        let kind = args.kind.ok_or_else(|| {
            miette::miette!(
                "Table required for template generation. Usage: chd import --template contacts"
            )
        })?;
        return generate_template(kind);
    }

    let kind = args
        .kind
        .ok_or_else(|| miette::miette!("Table required. Usage: chd import contacts data.csv"))?;
    let file_path = args
        .file
        .clone()
        .ok_or_else(|| miette::miette!("CSV file required. Usage: chd import contacts data.csv"))?;
    if !file_path.exists() {
        return Err(miette::miette!("File not found: {}", file_path.display()));
    }

    let (_, _, catalog) = open_catalog(global)?;
    let options = ImportOptions {
        dry_run: args.dry_run,
        skip_errors: args.skip_errors,
    };

    if !global.quiet {
        println!(
            "{} Importing {} from {}{}",
            style("→").blue(),
            style(kind.as_str()).cyan(),
            style(file_path.display()).yellow(),
            if args.dry_run {
                style(" (dry run)").dim().to_string()
            } else {
                String::new()
            }
        );
        println!();
    }

    let stats = match kind {
        ImportKind::Contacts => {
            common::import_rows::<Contact>(&catalog, &file_path, kind.required(), options)?.0
        }
        ImportKind::Arrangements => {
            let (stats, rows) = common::import_rows::<Arrangement>(
                &catalog,
                &file_path,
                kind.required(),
                options,
            )?;
            warn_inconsistent_arrangements(&catalog, &rows, args.dry_run)?;
            stats
        }
        ImportKind::WireMap => {
            common::import_rows::<WireContactMapping>(
                &catalog,
                &file_path,
                kind.required(),
                options,
            )?
            .0
        }
        ImportKind::Phm => {
            common::import_rows::<PhmMapping>(&catalog, &file_path, kind.required(), options)?.0
        }
    };

    info!(
        kind = kind.as_str(),
        rows = stats.rows_processed,
        inserted = stats.inserted,
        updated = stats.updated,
        duplicates = stats.duplicates,
        errors = stats.errors,
        "import finished"
    );

    if !global.quiet {
        print_summary(&stats, args.dry_run);
    }

    Ok(())
}

/// Warn about arrangements whose size rows do not add up
///
/// After a real import the whole catalog is checked, since a file may only
/// add some of an arrangement's rows. A dry run can only check the file.
fn warn_inconsistent_arrangements(
    catalog: &Catalog,
    imported: &[Arrangement],
    dry_run: bool,
) -> Result<()> {
    let all_rows;
    let rows = if dry_run {
        imported
    } else {
        all_rows = catalog.all_arrangement_rows().into_diagnostic()?;
        all_rows.as_slice()
    };

    for violation in check_arrangements(rows) {
        eprintln!("{} {}", style("!").yellow(), violation);
    }
    Ok(())
}

fn print_summary(stats: &ImportStats, dry_run: bool) {
    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Import Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Rows processed:     {}", style(stats.rows_processed).cyan());
    println!("  Rows inserted:      {}", style(stats.inserted).green());
    if stats.updated > 0 {
        println!("  Rows updated:       {}", style(stats.updated).yellow());
    }
    if stats.duplicates > 0 {
        println!("  Duplicates ignored: {}", style(stats.duplicates).dim());
    }
    if stats.errors > 0 {
        println!("  Errors:             {}", style(stats.errors).red());
    }
    if stats.skipped > 0 {
        println!("  Skipped:            {}", style(stats.skipped).dim());
    }

    if dry_run {
        println!();
        println!(
            "{}",
            style("Dry run complete. The catalog was not modified.").yellow()
        );
    }
}
