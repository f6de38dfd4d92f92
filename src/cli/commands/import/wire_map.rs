//! Wire mapping rows: wire_size, system, contact_size

use csv::StringRecord;
use std::collections::HashMap;

use super::common::{require_field, CatalogRow, StoreOutcome};
use crate::core::{Catalog, CatalogError};
use crate::entities::WireContactMapping;
use crate::glenair::wire::{parse_value, WireSystem};

pub const REQUIRED: &[&str] = &["wire_size", "system", "contact_size"];

impl CatalogRow for WireContactMapping {
    fn from_record(
        record: &StringRecord,
        headers: &HashMap<String, usize>,
    ) -> Result<Self, String> {
        let wire_size = require_field(record, headers, "wire_size")?;
        if parse_value(wire_size.as_str()).is_none() {
            return Err(format!("Invalid wire size '{}'", wire_size));
        }
        let system: WireSystem = require_field(record, headers, "system")?.parse()?;

        Ok(WireContactMapping::new(
            wire_size,
            system,
            require_field(record, headers, "contact_size")?,
        ))
    }

    fn store(&self, catalog: &Catalog) -> Result<StoreOutcome, CatalogError> {
        Ok(if catalog.add_wire_mapping(self)? {
            StoreOutcome::Inserted
        } else {
            StoreOutcome::Duplicate
        })
    }
}
