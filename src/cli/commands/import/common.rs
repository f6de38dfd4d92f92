//! Common utilities for CSV import

use console::style;
use csv::{ReaderBuilder, StringRecord};
use miette::{IntoDiagnostic, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::core::{Catalog, CatalogError};

/// Import options passed to the row driver
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    pub dry_run: bool,
    pub skip_errors: bool,
}

/// Import statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub rows_processed: usize,
    pub inserted: usize,
    pub updated: usize,
    pub duplicates: usize,
    pub errors: usize,
    pub skipped: usize,
}

/// What storing one row did to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Inserted,
    /// An existing row with the same key was replaced
    Updated,
    /// An identical row already existed and was left alone
    Duplicate,
}

/// A catalog table that can be filled from CSV rows
pub trait CatalogRow: Sized {
    /// Parse one record; the error message names the offending field
    fn from_record(record: &StringRecord, headers: &HashMap<String, usize>)
        -> Result<Self, String>;

    /// Write the row into the catalog
    fn store(&self, catalog: &Catalog) -> Result<StoreOutcome, CatalogError>;
}

/// Build a map from header name to column index
pub fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_lowercase().trim().to_string(), i))
        .collect()
}

/// Get a field value from a CSV record
pub fn get_field(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    field: &str,
) -> Option<String> {
    header_map
        .get(field)
        .and_then(|&idx| record.get(idx))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Get a field that must be present and non-empty
pub fn require_field(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    field: &str,
) -> Result<String, String> {
    get_field(record, header_map, field)
        .ok_or_else(|| format!("Missing required field '{}'", field))
}

/// Get a required field and parse it
pub fn parse_field<T: std::str::FromStr>(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    field: &str,
) -> Result<T, String> {
    let raw = require_field(record, header_map, field)?;
    raw.parse()
        .map_err(|_| format!("Invalid value '{}' for field '{}'", raw, field))
}

/// Check that the header row names every required column
pub fn check_headers(header_map: &HashMap<String, usize>, required: &[&str]) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|h| !header_map.contains_key(*h))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(miette::miette!(
            help = "Generate the expected layout with `chd import --template <kind>`",
            "CSV is missing required column(s): {}",
            missing.join(", ")
        ))
    }
}

/// Read every row of `file_path` as `T`, storing each unless this is a dry run
///
/// Returns the statistics and the rows that parsed successfully.
pub fn import_rows<T: CatalogRow>(
    catalog: &Catalog,
    file_path: &Path,
    required: &[&str],
    options: ImportOptions,
) -> Result<(ImportStats, Vec<T>)> {
    let mut stats = ImportStats::default();
    let mut rows = Vec::new();

    let file = File::open(file_path).into_diagnostic()?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = rdr.headers().into_diagnostic()?.clone();
    let header_map = build_header_map(&headers);
    check_headers(&header_map, required)?;

    // All rows land together; an early return rolls back
    let batch = if options.dry_run {
        None
    } else {
        Some(catalog.begin_batch().into_diagnostic()?)
    };

    for (row_idx, result) in rdr.records().enumerate() {
        let row_num = row_idx + 2;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                stats.rows_processed += 1;
                report_row_error(&mut stats, row_num, &format!("CSV parse error: {}", e), options)?;
                continue;
            }
        };

        if record.iter().all(|field| field.trim().is_empty()) {
            stats.skipped += 1;
            continue;
        }
        stats.rows_processed += 1;

        let row = match T::from_record(&record, &header_map) {
            Ok(row) => row,
            Err(message) => {
                report_row_error(&mut stats, row_num, &message, options)?;
                continue;
            }
        };

        if options.dry_run {
            stats.inserted += 1;
        } else {
            match row.store(catalog) {
                Ok(StoreOutcome::Inserted) => stats.inserted += 1,
                Ok(StoreOutcome::Updated) => stats.updated += 1,
                Ok(StoreOutcome::Duplicate) => {
                    debug!(row = row_num, "duplicate row ignored");
                    stats.duplicates += 1;
                }
                Err(e) => {
                    report_row_error(&mut stats, row_num, &e.to_string(), options)?;
                    continue;
                }
            }
        }
        rows.push(row);
    }

    if let Some(batch) = batch {
        batch.commit().into_diagnostic()?;
        debug!(rows = rows.len(), "import batch committed");
    }

    Ok((stats, rows))
}

fn report_row_error(
    stats: &mut ImportStats,
    row_num: usize,
    message: &str,
    options: ImportOptions,
) -> Result<()> {
    eprintln!("{} Row {}: {}", style("✗").red(), row_num, message);
    stats.errors += 1;
    if options.skip_errors {
        Ok(())
    } else {
        Err(miette::miette!(
            help = "No rows were written. Use --skip-errors to import the valid rows",
            "Import stopped at row {}: {}",
            row_num,
            message
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Contact;
    use tempfile::tempdir;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_header_map_is_case_insensitive() {
        let map = build_header_map(&record(&["Part_Number", " TYPE "]));
        assert_eq!(map.get("part_number"), Some(&0));
        assert_eq!(map.get("type"), Some(&1));
    }

    #[test]
    fn test_get_field_treats_blank_as_missing() {
        let map = build_header_map(&record(&["a", "b"]));
        let row = record(&["  x ", "   "]);
        assert_eq!(get_field(&row, &map, "a").as_deref(), Some("x"));
        assert_eq!(get_field(&row, &map, "b"), None);
        assert_eq!(get_field(&row, &map, "c"), None);
    }

    #[test]
    fn test_parse_field_reports_field_name() {
        let map = build_header_map(&record(&["total_contacts"]));
        let err = parse_field::<u32>(&record(&["many"]), &map, "total_contacts").unwrap_err();
        assert!(err.contains("total_contacts"));
        assert!(err.contains("many"));
    }

    #[test]
    fn test_check_headers_lists_missing() {
        let map = build_header_map(&record(&["wire_size"]));
        assert!(check_headers(&map, &["wire_size"]).is_ok());
        let err = check_headers(&map, &["wire_size", "system", "contact_size"]).unwrap_err();
        assert!(err.to_string().contains("system, contact_size"));
    }

    const CONTACTS_WITH_BAD_ROW: &str =
        "part_number,type,contact_size\n10-375-20,Pin,20\n10-999-20,Plug,20\n";

    #[test]
    fn test_stopped_import_rolls_back() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("contacts.csv");
        std::fs::write(&path, CONTACTS_WITH_BAD_ROW).unwrap();
        let catalog = Catalog::open_in_memory().unwrap();

        let result = import_rows::<Contact>(
            &catalog,
            &path,
            super::super::contacts::REQUIRED,
            ImportOptions::default(),
        );
        assert!(result.is_err());
        assert_eq!(catalog.counts().unwrap().contacts, 0);
    }

    #[test]
    fn test_skip_errors_commits_valid_rows() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("contacts.csv");
        std::fs::write(&path, CONTACTS_WITH_BAD_ROW).unwrap();
        let catalog = Catalog::open_in_memory().unwrap();

        let options = ImportOptions {
            skip_errors: true,
            ..Default::default()
        };
        let (stats, rows) = import_rows::<Contact>(
            &catalog,
            &path,
            super::super::contacts::REQUIRED,
            options,
        )
        .unwrap();
        assert_eq!(stats.inserted, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(catalog.counts().unwrap().contacts, 1);
    }
}
