//! Reference data lookups used by the part-number builder
//!
//! [`ReferenceData`] is the seam between the builder and whatever stores the
//! vendor catalog. [`Catalog`](crate::core::catalog::Catalog) implements it
//! over SQLite; [`MemoryCatalog`] keeps everything in vectors and is what the
//! builder's own tests run against.

use crate::core::catalog::CatalogError;
use crate::entities::{Arrangement, Contact, WireContactMapping};
use crate::glenair::wire::WireSystem;

/// Catalog queries the builder depends on
///
/// An empty result is never an error: a wire size with no known mapping
/// simply yields no contact sizes.
pub trait ReferenceData {
    /// Contact sizes that accept the given wire, in catalog order
    fn compatible_contact_sizes(
        &self,
        wire_value: &str,
        wire_system: WireSystem,
    ) -> Result<Vec<String>, CatalogError>;

    /// All contacts of a size, ordered by part number then type
    fn contacts_by_size(&self, size: &str) -> Result<Vec<Contact>, CatalogError>;

    /// Arrangement rows with exactly `count` contacts in total that include
    /// `size` in their breakdown, ordered by arrangement
    fn arrangements_by_contact_count(
        &self,
        count: u32,
        size: &str,
    ) -> Result<Vec<Arrangement>, CatalogError>;
}

/// In-memory catalog with the same insert semantics as the SQLite one
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    contacts: Vec<Contact>,
    arrangements: Vec<Arrangement>,
    wire_mappings: Vec<WireContactMapping>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a contact keyed by (part number, type)
    pub fn add_contact(&mut self, contact: Contact) {
        match self.contacts.iter_mut().find(|c| {
            c.part_number == contact.part_number && c.contact_type == contact.contact_type
        }) {
            Some(existing) => *existing = contact,
            None => self.contacts.push(contact),
        }
    }

    /// Insert or replace an arrangement row keyed by (arrangement, size)
    pub fn add_arrangement(&mut self, row: Arrangement) {
        match self
            .arrangements
            .iter_mut()
            .find(|a| a.arrangement == row.arrangement && a.contact_size == row.contact_size)
        {
            Some(existing) => *existing = row,
            None => self.arrangements.push(row),
        }
    }

    /// Add a wire mapping; returns false when the triple already exists
    pub fn add_wire_mapping(&mut self, mapping: WireContactMapping) -> bool {
        if self.wire_mappings.contains(&mapping) {
            return false;
        }
        self.wire_mappings.push(mapping);
        true
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn arrangements(&self) -> &[Arrangement] {
        &self.arrangements
    }

    pub fn wire_mappings(&self) -> &[WireContactMapping] {
        &self.wire_mappings
    }
}

impl ReferenceData for MemoryCatalog {
    fn compatible_contact_sizes(
        &self,
        wire_value: &str,
        wire_system: WireSystem,
    ) -> Result<Vec<String>, CatalogError> {
        let wire_value = wire_value.trim();
        Ok(self
            .wire_mappings
            .iter()
            .filter(|m| m.wire_size == wire_value && m.system == wire_system)
            .map(|m| m.contact_size.clone())
            .collect())
    }

    fn contacts_by_size(&self, size: &str) -> Result<Vec<Contact>, CatalogError> {
        let mut contacts: Vec<Contact> = self
            .contacts
            .iter()
            .filter(|c| c.contact_size == size)
            .cloned()
            .collect();
        contacts.sort_by(|a, b| {
            a.part_number
                .cmp(&b.part_number)
                .then_with(|| a.contact_type.as_str().cmp(b.contact_type.as_str()))
        });
        Ok(contacts)
    }

    fn arrangements_by_contact_count(
        &self,
        count: u32,
        size: &str,
    ) -> Result<Vec<Arrangement>, CatalogError> {
        let mut rows: Vec<Arrangement> = self
            .arrangements
            .iter()
            .filter(|a| a.total_contacts == count && a.contact_size == size)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.arrangement.cmp(&b.arrangement));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ContactType;

    #[test]
    fn test_duplicate_wire_mapping_ignored() {
        let mut catalog = MemoryCatalog::new();
        assert!(catalog.add_wire_mapping(WireContactMapping::new("20", WireSystem::Awg, "20")));
        assert!(!catalog.add_wire_mapping(WireContactMapping::new("20", WireSystem::Awg, "20")));
        assert!(catalog.add_wire_mapping(WireContactMapping::new("20", WireSystem::Mm2, "20")));
        assert_eq!(catalog.wire_mappings().len(), 2);
    }

    #[test]
    fn test_contact_replaced_within_type_only() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_contact(Contact::new("10-375-20", ContactType::Pin, "20"));
        catalog.add_contact(Contact::new("10-375-20", ContactType::Socket, "20"));
        catalog.add_contact(
            Contact::new("10-375-20", ContactType::Pin, "20").with_description("updated"),
        );
        assert_eq!(catalog.contacts().len(), 2);
        assert_eq!(catalog.contacts()[0].description.as_deref(), Some("updated"));
    }

    #[test]
    fn test_arrangement_filter_is_exact_count() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_arrangement(Arrangement::new("12S-4", 4, "20", 4));
        catalog.add_arrangement(Arrangement::new("14S-7", 7, "20", 7));
        catalog.add_arrangement(Arrangement::new("12S-3", 4, "16", 4));

        let rows = catalog.arrangements_by_contact_count(4, "20").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].arrangement, "12S-4");
    }

    #[test]
    fn test_unknown_wire_yields_empty() {
        let catalog = MemoryCatalog::new();
        assert!(catalog
            .compatible_contact_sizes("99", WireSystem::Awg)
            .unwrap()
            .is_empty());
    }
}
