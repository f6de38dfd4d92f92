//! Insert methods used by catalog imports

use rusqlite::{params, Transaction};

use super::{Catalog, CatalogError};
use crate::entities::{Arrangement, Contact, PhmMapping, WireContactMapping};

impl Catalog {
    /// Start a transaction covering every write until it is committed
    ///
    /// Dropping the returned transaction without committing rolls the writes
    /// back.
    pub fn begin_batch(&self) -> Result<Transaction<'_>, CatalogError> {
        Ok(self.conn.unchecked_transaction()?)
    }

    /// Insert or replace a contact keyed by (part number, type)
    pub fn upsert_contact(&self, contact: &Contact) -> Result<(), CatalogError> {
        self.conn.execute(
            r#"INSERT OR REPLACE INTO glenair_contacts
               (part_number, type, contact_size, awg_range, mm2_range, description)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            params![
                contact.part_number,
                contact.contact_type,
                contact.contact_size,
                contact.awg_range,
                contact.mm2_range,
                contact.description,
            ],
        )?;
        Ok(())
    }

    /// Insert or replace an arrangement row keyed by (arrangement, size)
    pub fn upsert_arrangement(&self, row: &Arrangement) -> Result<(), CatalogError> {
        self.conn.execute(
            r#"INSERT OR REPLACE INTO glenair_arrangements
               (arrangement, total_contacts, contact_size, contact_count)
               VALUES (?1, ?2, ?3, ?4)"#,
            params![
                row.arrangement,
                row.total_contacts,
                row.contact_size,
                row.contact_count,
            ],
        )?;
        Ok(())
    }

    /// Add a wire mapping; returns false when the triple already existed
    pub fn add_wire_mapping(&self, mapping: &WireContactMapping) -> Result<bool, CatalogError> {
        let changed = self.conn.execute(
            r#"INSERT OR IGNORE INTO glenair_wire_contacts (wire_size, system, contact_size)
               VALUES (?1, ?2, ?3)"#,
            params![mapping.wire_size, mapping.system, mapping.contact_size],
        )?;
        Ok(changed > 0)
    }

    /// Insert or replace the PHM mapping of an arrangement
    pub fn upsert_phm(&self, phm: &PhmMapping) -> Result<(), CatalogError> {
        self.conn.execute(
            r#"INSERT OR REPLACE INTO glenair_phm (arrangement, shell_size, dash_number)
               VALUES (?1, ?2, ?3)"#,
            params![phm.arrangement, phm.shell_size, phm.dash_number],
        )?;
        Ok(())
    }
}
