//! Arrangement rows: arrangement, total_contacts, contact_size, contact_count

use csv::StringRecord;
use std::collections::HashMap;

use super::common::{parse_field, require_field, CatalogRow, StoreOutcome};
use crate::core::{Catalog, CatalogError};
use crate::entities::Arrangement;

pub const REQUIRED: &[&str] = &["arrangement", "total_contacts", "contact_size", "contact_count"];

impl CatalogRow for Arrangement {
    fn from_record(
        record: &StringRecord,
        headers: &HashMap<String, usize>,
    ) -> Result<Self, String> {
        let total_contacts: u32 = parse_field(record, headers, "total_contacts")?;
        let contact_count: u32 = parse_field(record, headers, "contact_count")?;
        if total_contacts == 0 || contact_count == 0 {
            return Err("Contact counts must be at least 1".to_string());
        }

        Ok(Arrangement::new(
            require_field(record, headers, "arrangement")?,
            total_contacts,
            require_field(record, headers, "contact_size")?,
            contact_count,
        ))
    }

    fn store(&self, catalog: &Catalog) -> Result<StoreOutcome, CatalogError> {
        let existing = catalog
            .arrangement_details(&self.arrangement)?
            .into_iter()
            .find(|a| a.contact_size == self.contact_size);

        let outcome = match existing {
            Some(ref a) if a == self => return Ok(StoreOutcome::Duplicate),
            Some(_) => StoreOutcome::Updated,
            None => StoreOutcome::Inserted,
        };
        catalog.upsert_arrangement(self)?;
        Ok(outcome)
    }
}
