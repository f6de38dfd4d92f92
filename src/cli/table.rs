//! Table formatting utilities for catalog list commands
//!
//! Every list command hands its rows to a [`TableFormatter`], which renders
//! them according to the requested [`OutputFormat`]. Structured formats
//! (JSON, YAML) serialize the underlying records rather than the display
//! cells, so no information is lost to truncation.

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::OutputFormat;

/// Column definition for a list table
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    /// Maximum display width on a terminal (None = unbounded)
    pub max_width: Option<usize>,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self {
            header,
            max_width: None,
        }
    }

    pub const fn truncated(header: &'static str, max_width: usize) -> Self {
        Self {
            header,
            max_width: Some(max_width),
        }
    }
}

/// Renders a list of records in any output format
pub struct TableFormatter {
    columns: &'static [Column],
    entity_name: &'static str,
    show_summary: bool,
}

impl TableFormatter {
    pub fn new(columns: &'static [Column], entity_name: &'static str) -> Self {
        Self {
            columns,
            entity_name,
            show_summary: true,
        }
    }

    /// Suppress the "N item(s) found" line
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.show_summary = !quiet;
        self
    }

    /// Output items using `cells` to produce one display row per item
    pub fn output<T, F>(&self, items: &[T], format: OutputFormat, cells: F) -> Result<()>
    where
        T: Serialize,
        F: Fn(&T) -> Vec<String>,
    {
        match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(items).into_diagnostic()?;
                println!("{}", json);
            }
            OutputFormat::Yaml => {
                let yaml = serde_yml::to_string(&items).into_diagnostic()?;
                print!("{}", yaml);
            }
            OutputFormat::Id => {
                for item in items {
                    if let Some(first) = cells(item).into_iter().next() {
                        println!("{}", first);
                    }
                }
            }
            OutputFormat::Tsv => {
                println!("{}", self.headers().join("\t"));
                for item in items {
                    println!("{}", cells(item).join("\t"));
                }
            }
            OutputFormat::Csv => {
                println!("{}", self.headers().join(","));
                for item in items {
                    let row: Vec<String> = cells(item).iter().map(|c| escape_csv(c)).collect();
                    println!("{}", row.join(","));
                }
            }
            OutputFormat::Md => {
                let mut table = self.build(items, &cells, false);
                println!("{}", table.with(Style::markdown()));
            }
            OutputFormat::Auto => {
                if items.is_empty() {
                    if self.show_summary {
                        println!("No {}s found.", self.entity_name);
                    }
                    return Ok(());
                }
                let mut table = self.build(items, &cells, true);
                println!("{}", table.with(Style::sharp()));
                if self.show_summary {
                    println!();
                    println!(
                        "{} {}(s) found",
                        style(items.len()).cyan(),
                        self.entity_name
                    );
                }
            }
        }
        Ok(())
    }

    fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header).collect()
    }

    fn build<T, F>(&self, items: &[T], cells: &F, truncate: bool) -> tabled::Table
    where
        F: Fn(&T) -> Vec<String>,
    {
        let mut builder = Builder::default();
        builder.push_record(self.headers());
        for item in items {
            let row: Vec<String> = cells(item)
                .into_iter()
                .zip(self.columns)
                .map(|(cell, column)| match column.max_width {
                    Some(width) if truncate => truncate_str(&cell, width),
                    _ if !truncate => cell.replace('|', "\\|"),
                    _ => cell,
                })
                .collect();
            builder.push_record(row);
        }
        builder.build()
    }
}
