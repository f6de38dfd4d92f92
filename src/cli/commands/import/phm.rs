//! PHM rows: arrangement, shell_size, dash_number

use csv::StringRecord;
use std::collections::HashMap;

use super::common::{parse_field, require_field, CatalogRow, StoreOutcome};
use crate::core::{Catalog, CatalogError};
use crate::entities::PhmMapping;

pub const REQUIRED: &[&str] = &["arrangement", "shell_size", "dash_number"];

impl CatalogRow for PhmMapping {
    fn from_record(
        record: &StringRecord,
        headers: &HashMap<String, usize>,
    ) -> Result<Self, String> {
        Ok(PhmMapping {
            arrangement: require_field(record, headers, "arrangement")?,
            shell_size: parse_field(record, headers, "shell_size")?,
            dash_number: require_field(record, headers, "dash_number")?,
        })
    }

    fn store(&self, catalog: &Catalog) -> Result<StoreOutcome, CatalogError> {
        let outcome = match catalog.phm_by_arrangement(&self.arrangement)? {
            Some(ref existing) if existing == self => return Ok(StoreOutcome::Duplicate),
            Some(_) => StoreOutcome::Updated,
            None => StoreOutcome::Inserted,
        };
        catalog.upsert_phm(self)?;
        Ok(outcome)
    }
}
