//! Query methods for reading the catalog

use rusqlite::{params, OptionalExtension, Row};
use serde::Serialize;

use super::{Catalog, CatalogError};
use crate::core::reference::ReferenceData;
use crate::entities::{Arrangement, Contact, PhmMapping, WireContactMapping};
use crate::glenair::wire::WireSystem;

const CONTACT_COLUMNS: &str =
    "part_number, type, contact_size, awg_range, mm2_range, description";

const ARRANGEMENT_COLUMNS: &str = "arrangement, total_contacts, contact_size, contact_count";

/// Row counts per catalog table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub contacts: u64,
    /// Distinct arrangement identifiers
    pub arrangements: u64,
    pub arrangement_rows: u64,
    pub wire_mappings: u64,
    pub phm: u64,
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        part_number: row.get(0)?,
        contact_type: row.get(1)?,
        contact_size: row.get(2)?,
        awg_range: row.get(3)?,
        mm2_range: row.get(4)?,
        description: row.get(5)?,
    })
}

fn arrangement_from_row(row: &Row<'_>) -> rusqlite::Result<Arrangement> {
    Ok(Arrangement {
        arrangement: row.get(0)?,
        total_contacts: row.get(1)?,
        contact_size: row.get(2)?,
        contact_count: row.get(3)?,
    })
}

impl Catalog {
    /// Contacts with a given vendor part number (at most one pin and one socket)
    pub fn contact_by_part_number(&self, part_number: &str) -> Result<Vec<Contact>, CatalogError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM glenair_contacts WHERE part_number = ?1 ORDER BY type",
            CONTACT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![part_number], contact_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// All contacts, optionally restricted to one size
    pub fn list_contacts(&self, size: Option<&str>) -> Result<Vec<Contact>, CatalogError> {
        match size {
            Some(size) => self.contacts_by_size(size),
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {} FROM glenair_contacts ORDER BY contact_size, part_number, type",
                    CONTACT_COLUMNS
                ))?;
                let rows = stmt.query_map([], contact_from_row)?;
                Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
            }
        }
    }

    /// Every size row of one arrangement
    pub fn arrangement_details(&self, arrangement: &str) -> Result<Vec<Arrangement>, CatalogError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM glenair_arrangements WHERE arrangement = ?1 ORDER BY contact_size",
            ARRANGEMENT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![arrangement], arrangement_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Every arrangement row in the catalog
    pub fn all_arrangement_rows(&self) -> Result<Vec<Arrangement>, CatalogError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM glenair_arrangements ORDER BY arrangement, contact_size",
            ARRANGEMENT_COLUMNS
        ))?;
        let rows = stmt.query_map([], arrangement_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// PHM mapping for an arrangement, if one is recorded
    pub fn phm_by_arrangement(&self, arrangement: &str) -> Result<Option<PhmMapping>, CatalogError> {
        Ok(self
            .conn
            .query_row(
                "SELECT arrangement, shell_size, dash_number FROM glenair_phm WHERE arrangement = ?1",
                params![arrangement],
                |row| {
                    Ok(PhmMapping {
                        arrangement: row.get(0)?,
                        shell_size: row.get(1)?,
                        dash_number: row.get(2)?,
                    })
                },
            )
            .optional()?)
    }

    /// Every wire mapping, grouped by system then wire size
    pub fn list_wire_mappings(&self) -> Result<Vec<WireContactMapping>, CatalogError> {
        let mut stmt = self.conn.prepare(
            "SELECT wire_size, system, contact_size FROM glenair_wire_contacts ORDER BY system, rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(WireContactMapping {
                wire_size: row.get(0)?,
                system: row.get(1)?,
                contact_size: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Row counts for a quick overview
    pub fn counts(&self) -> Result<CatalogCounts, CatalogError> {
        let count = |sql: &str| -> Result<u64, CatalogError> {
            Ok(self.conn.query_row(sql, [], |row| row.get::<_, i64>(0))? as u64)
        };

        Ok(CatalogCounts {
            contacts: count("SELECT COUNT(*) FROM glenair_contacts")?,
            arrangements: count("SELECT COUNT(DISTINCT arrangement) FROM glenair_arrangements")?,
            arrangement_rows: count("SELECT COUNT(*) FROM glenair_arrangements")?,
            wire_mappings: count("SELECT COUNT(*) FROM glenair_wire_contacts")?,
            phm: count("SELECT COUNT(*) FROM glenair_phm")?,
        })
    }
}

impl ReferenceData for Catalog {
    fn compatible_contact_sizes(
        &self,
        wire_value: &str,
        wire_system: WireSystem,
    ) -> Result<Vec<String>, CatalogError> {
        let mut stmt = self.conn.prepare(
            "SELECT contact_size FROM glenair_wire_contacts WHERE wire_size = ?1 AND system = ?2 ORDER BY rowid",
        )?;
        let rows = stmt.query_map(params![wire_value.trim(), wire_system], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<String>>>()?)
    }

    fn contacts_by_size(&self, size: &str) -> Result<Vec<Contact>, CatalogError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM glenair_contacts WHERE contact_size = ?1 ORDER BY part_number, type",
            CONTACT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![size], contact_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn arrangements_by_contact_count(
        &self,
        count: u32,
        size: &str,
    ) -> Result<Vec<Arrangement>, CatalogError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM glenair_arrangements WHERE total_contacts = ?1 AND contact_size = ?2 ORDER BY arrangement",
            ARRANGEMENT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![count, size], arrangement_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
