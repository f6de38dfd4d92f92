//! Contact rows: part_number, type, contact_size, awg_range, mm2_range, description

use csv::StringRecord;
use std::collections::HashMap;

use super::common::{get_field, require_field, CatalogRow, StoreOutcome};
use crate::core::{Catalog, CatalogError};
use crate::entities::{Contact, ContactType};

pub const REQUIRED: &[&str] = &["part_number", "type", "contact_size"];

impl CatalogRow for Contact {
    fn from_record(
        record: &StringRecord,
        headers: &HashMap<String, usize>,
    ) -> Result<Self, String> {
        let part_number = require_field(record, headers, "part_number")?;
        let contact_type: ContactType = require_field(record, headers, "type")?.parse()?;
        let contact_size = require_field(record, headers, "contact_size")?;

        let mut contact = Contact::new(part_number, contact_type, contact_size).with_ranges(
            get_field(record, headers, "awg_range"),
            get_field(record, headers, "mm2_range"),
        );
        if let Some(description) = get_field(record, headers, "description") {
            contact = contact.with_description(description);
        }
        Ok(contact)
    }

    fn store(&self, catalog: &Catalog) -> Result<StoreOutcome, CatalogError> {
        let existing = catalog
            .contact_by_part_number(&self.part_number)?
            .into_iter()
            .find(|c| c.contact_type == self.contact_type);

        let outcome = match existing {
            Some(ref c) if c == self => return Ok(StoreOutcome::Duplicate),
            Some(_) => StoreOutcome::Updated,
            None => StoreOutcome::Inserted,
        };
        catalog.upsert_contact(self)?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::import::common::build_header_map;

    fn headers() -> HashMap<String, usize> {
        build_header_map(&StringRecord::from(vec![
            "part_number",
            "type",
            "contact_size",
            "awg_range",
            "mm2_range",
            "description",
        ]))
    }

    #[test]
    fn test_parse_full_row() {
        let row = StringRecord::from(vec!["10-375-20", "pin", "20", "26-20", "", "Crimp pin"]);
        let contact = Contact::from_record(&row, &headers()).unwrap();
        assert_eq!(contact.contact_type, ContactType::Pin);
        assert_eq!(contact.awg_range.as_deref(), Some("26-20"));
        assert_eq!(contact.mm2_range, None);
        assert_eq!(contact.description.as_deref(), Some("Crimp pin"));
    }

    #[test]
    fn test_bad_type_rejected() {
        let row = StringRecord::from(vec!["10-375-20", "plug", "20", "", "", ""]);
        let err = Contact::from_record(&row, &headers()).unwrap_err();
        assert!(err.contains("plug"));
    }

    #[test]
    fn test_store_classifies_rows() {
        let catalog = Catalog::open_in_memory().unwrap();
        let pin = Contact::new("10-375-20", ContactType::Pin, "20");
        assert_eq!(pin.store(&catalog).unwrap(), StoreOutcome::Inserted);
        assert_eq!(pin.store(&catalog).unwrap(), StoreOutcome::Duplicate);

        let changed = pin.clone().with_description("Gold plated");
        assert_eq!(changed.store(&catalog).unwrap(), StoreOutcome::Updated);

        let socket = Contact::new("10-375-20", ContactType::Socket, "20");
        assert_eq!(socket.store(&catalog).unwrap(), StoreOutcome::Inserted);
    }
}
