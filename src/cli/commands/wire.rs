//! `chd wire` command - AWG / mm² conversion

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::{open_project, or_dash, resolve_format};
use crate::cli::table::{Column, TableFormatter};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::glenair::wire::{cross_reference, format_value, WireSystem, AWG_TO_MM2};

#[derive(Subcommand, Debug)]
pub enum WireCommands {
    /// Normalize a wire size and show its equivalent in the other system
    Convert(ConvertArgs),

    /// Print the AWG to mm² reference table
    Table,
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Wire size (e.g. 20, 1/0, 0.52)
    pub value: String,

    /// System the value is given in
    #[arg(long, value_parser = parse_system, default_value = "awg")]
    pub from: WireSystem,
}

fn parse_system(s: &str) -> Result<WireSystem, String> {
    s.parse()
}

pub fn run(cmd: WireCommands, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global).ok();
    let format = resolve_format(global, &Config::load(project.as_ref()));
    match cmd {
        WireCommands::Convert(args) => run_convert(args, format),
        WireCommands::Table => run_table(format, global.quiet),
    }
}

fn run_convert(args: ConvertArgs, format: OutputFormat) -> Result<()> {
    let xref = cross_reference(&args.value, args.from).ok_or_else(|| {
        miette::miette!(
            "'{}' is not a valid {} wire size",
            args.value,
            args.from.label()
        )
    })?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&xref).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&xref).into_diagnostic()?);
        }
        OutputFormat::Id => println!("{}", xref.value),
        OutputFormat::Tsv | OutputFormat::Csv => {
            let sep = if format == OutputFormat::Csv { "," } else { "\t" };
            println!(
                "{}{sep}{}{sep}{}",
                xref.value,
                or_dash(xref.awg.as_deref()),
                or_dash(xref.mm2.as_deref())
            );
        }
        _ => {
            println!(
                "{} {}",
                style(&xref.value).cyan().bold(),
                style(args.from.label()).dim()
            );
            println!("  {:<5} {}", "AWG:", or_dash(xref.awg.as_deref()));
            println!("  {:<5} {}", "mm²:", or_dash(xref.mm2.as_deref()));
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct TableRow {
    awg: String,
    mm2: String,
}

const COLUMNS: &[Column] = &[Column::new("AWG"), Column::new("mm²")];

fn run_table(format: OutputFormat, quiet: bool) -> Result<()> {
    let rows: Vec<TableRow> = AWG_TO_MM2
        .iter()
        .map(|(gauge, mm2)| TableRow {
            awg: gauge.to_string(),
            mm2: format_value(*mm2, WireSystem::Mm2),
        })
        .collect();

    TableFormatter::new(COLUMNS, "gauge")
        .quiet(quiet)
        .output(&rows, format, |r| vec![r.awg.clone(), r.mm2.clone()])
}
