//! `chd catalog` command - Browse the reference catalog

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::{open_catalog, open_project, or_dash, resolve_format};
use crate::cli::table::{Column, TableFormatter};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, ReferenceData};
use crate::entities::{check_arrangements, Arrangement, Contact, PhmMapping};
use crate::glenair::shell::SHELL_STYLES;
use crate::glenair::wire::WireSystem;

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List contact sizes compatible with a wire size
    Sizes(SizesArgs),

    /// List contacts, optionally for one contact size
    Contacts(ContactsArgs),

    /// List arrangements by total contact count and contact size
    Arrangements(ArrangementsArgs),

    /// Show the size breakdown and PHM mapping of one arrangement
    Arrangement(ArrangementArgs),

    /// Report arrangements whose size rows do not sum to their total
    Check,

    /// List known shell styles
    ShellStyles,

    /// Show row counts per catalog table
    Stats,
}

#[derive(clap::Args, Debug)]
pub struct SizesArgs {
    /// Wire size (e.g. 20, 1/0, 0.52)
    #[arg(long, short = 'w')]
    pub wire: String,

    /// Wire system the size is given in
    #[arg(long, short = 's', value_parser = parse_system, default_value = "awg")]
    pub system: WireSystem,
}

#[derive(clap::Args, Debug)]
pub struct ContactsArgs {
    /// Only contacts of this size
    #[arg(long, short = 's')]
    pub size: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ArrangementsArgs {
    /// Total contact count of the arrangement
    #[arg(long, short = 'c')]
    pub count: u32,

    /// Contact size that must appear in the breakdown
    #[arg(long, short = 's')]
    pub size: String,
}

#[derive(clap::Args, Debug)]
pub struct ArrangementArgs {
    /// Arrangement identifier (e.g. 10SL-3)
    pub id: String,
}

fn parse_system(s: &str) -> Result<WireSystem, String> {
    s.parse()
}

const CONTACT_COLUMNS: &[Column] = &[
    Column::new("PART NUMBER"),
    Column::new("TYPE"),
    Column::new("SIZE"),
    Column::new("AWG"),
    Column::new("MM²"),
    Column::truncated("DESCRIPTION", 40),
];

const ARRANGEMENT_COLUMNS: &[Column] = &[
    Column::new("ARRANGEMENT"),
    Column::new("TOTAL"),
    Column::new("SIZE"),
    Column::new("COUNT"),
];

const SIZE_COLUMNS: &[Column] = &[Column::new("CONTACT SIZE")];

const SHELL_COLUMNS: &[Column] = &[Column::new("CODE"), Column::new("SHELL STYLE")];

pub fn run(cmd: CatalogCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CatalogCommands::Sizes(args) => run_sizes(args, global),
        CatalogCommands::Contacts(args) => run_contacts(args, global),
        CatalogCommands::Arrangements(args) => run_arrangements(args, global),
        CatalogCommands::Arrangement(args) => run_arrangement(args, global),
        CatalogCommands::Check => run_check(global),
        CatalogCommands::ShellStyles => run_shell_styles(global),
        CatalogCommands::Stats => run_stats(global),
    }
}

fn run_sizes(args: SizesArgs, global: &GlobalOpts) -> Result<()> {
    let (_, config, catalog) = open_catalog(global)?;
    let sizes = catalog
        .compatible_contact_sizes(&args.wire, args.system)
        .into_diagnostic()?;

    TableFormatter::new(SIZE_COLUMNS, "contact size")
        .quiet(global.quiet)
        .output(&sizes, resolve_format(global, &config), |s| vec![s.clone()])
}

fn contact_cells(c: &Contact) -> Vec<String> {
    vec![
        c.part_number.clone(),
        c.contact_type.to_string(),
        c.contact_size.clone(),
        or_dash(c.awg_range.as_deref()),
        or_dash(c.mm2_range.as_deref()),
        or_dash(c.description.as_deref()),
    ]
}

fn arrangement_cells(a: &Arrangement) -> Vec<String> {
    vec![
        a.arrangement.clone(),
        a.total_contacts.to_string(),
        a.contact_size.clone(),
        a.contact_count.to_string(),
    ]
}

fn run_contacts(args: ContactsArgs, global: &GlobalOpts) -> Result<()> {
    let (_, config, catalog) = open_catalog(global)?;
    let contacts = catalog
        .list_contacts(args.size.as_deref())
        .into_diagnostic()?;

    TableFormatter::new(CONTACT_COLUMNS, "contact")
        .quiet(global.quiet)
        .output(&contacts, resolve_format(global, &config), contact_cells)
}

fn run_arrangements(args: ArrangementsArgs, global: &GlobalOpts) -> Result<()> {
    let (_, config, catalog) = open_catalog(global)?;
    let rows = catalog
        .arrangements_by_contact_count(args.count, &args.size)
        .into_diagnostic()?;

    TableFormatter::new(ARRANGEMENT_COLUMNS, "arrangement")
        .quiet(global.quiet)
        .output(&rows, resolve_format(global, &config), arrangement_cells)
}

#[derive(Serialize)]
struct ArrangementDetail {
    arrangement: String,
    rows: Vec<Arrangement>,
    phm: Option<PhmMapping>,
}

fn run_arrangement(args: ArrangementArgs, global: &GlobalOpts) -> Result<()> {
    let (_, config, catalog) = open_catalog(global)?;
    let id = args.id.trim();
    let rows = catalog.arrangement_details(id).into_diagnostic()?;
    if rows.is_empty() {
        return Err(miette::miette!("Arrangement '{}' not found in catalog", id));
    }
    let detail = ArrangementDetail {
        arrangement: id.to_string(),
        phm: catalog.phm_by_arrangement(id).into_diagnostic()?,
        rows,
    };

    match resolve_format(global, &config) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&detail).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&detail).into_diagnostic()?);
        }
        format @ (OutputFormat::Tsv | OutputFormat::Csv | OutputFormat::Id) => {
            TableFormatter::new(ARRANGEMENT_COLUMNS, "row")
                .quiet(true)
                .output(&detail.rows, format, arrangement_cells)?;
        }
        format => {
            println!("{} {}", style("Arrangement").bold(), style(id).cyan());
            let total = detail.rows[0].total_contacts;
            println!("  Total contacts: {}", total);
            match &detail.phm {
                Some(phm) => println!(
                    "  PHM: shell size {}, dash number {}",
                    phm.shell_size, phm.dash_number
                ),
                None => println!("  PHM: {}", style("(none)").dim()),
            }
            println!();
            TableFormatter::new(ARRANGEMENT_COLUMNS, "size row")
                .quiet(true)
                .output(&detail.rows, format, arrangement_cells)?;

            let counted: u64 = detail.rows.iter().map(|r| u64::from(r.contact_count)).sum();
            if counted != u64::from(total) {
                println!();
                println!(
                    "{} Size rows sum to {} but the arrangement declares {}",
                    style("!").yellow(),
                    counted,
                    total
                );
            }
        }
    }

    Ok(())
}

fn run_check(global: &GlobalOpts) -> Result<()> {
    let (_, config, catalog) = open_catalog(global)?;
    let rows = catalog.all_arrangement_rows().into_diagnostic()?;
    let violations = check_arrangements(&rows);

    match resolve_format(global, &config) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&violations).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&violations).into_diagnostic()?);
        }
        _ => {
            if violations.is_empty() {
                if !global.quiet {
                    println!(
                        "{} All {} arrangement row(s) are consistent",
                        style("✓").green(),
                        rows.len()
                    );
                }
            } else {
                for v in &violations {
                    println!("{} {}", style("✗").red(), v);
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(miette::miette!(
            "{} arrangement(s) violate the contact count invariant",
            violations.len()
        ))
    }
}

fn run_shell_styles(global: &GlobalOpts) -> Result<()> {
    // Static table; no project or catalog needed
    let project = open_project(global).ok();
    let config = Config::load(project.as_ref());
    TableFormatter::new(SHELL_COLUMNS, "shell style")
        .quiet(global.quiet)
        .output(SHELL_STYLES, resolve_format(global, &config), |s| {
            vec![s.code.to_string(), s.label.to_string()]
        })
}

fn run_stats(global: &GlobalOpts) -> Result<()> {
    let (_, config, catalog) = open_catalog(global)?;
    let counts = catalog.counts().into_diagnostic()?;

    match resolve_format(global, &config) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&counts).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&counts).into_diagnostic()?);
        }
        _ => {
            println!("{}", style("Catalog").bold());
            println!("  Contacts:         {}", style(counts.contacts).cyan());
            println!(
                "  Arrangements:     {} ({} size rows)",
                style(counts.arrangements).cyan(),
                counts.arrangement_rows
            );
            println!("  Wire mappings:    {}", style(counts.wire_mappings).cyan());
            println!("  PHM mappings:     {}", style(counts.phm).cyan());
        }
    }

    Ok(())
}
