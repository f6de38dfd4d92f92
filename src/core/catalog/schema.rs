//! Database schema initialization

use rusqlite::params;

use super::{Catalog, CatalogError, SCHEMA_VERSION};

impl Catalog {
    /// Create all catalog tables and record the schema version
    pub(super) fn init_schema(&mut self) -> Result<(), CatalogError> {
        self.conn.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- Pin and socket contacts; part numbers are unique per type
            CREATE TABLE IF NOT EXISTS glenair_contacts (
                part_number TEXT NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('Pin', 'Socket')),
                contact_size TEXT NOT NULL,
                awg_range TEXT,
                mm2_range TEXT,
                description TEXT,
                PRIMARY KEY (part_number, type)
            );
            CREATE INDEX IF NOT EXISTS idx_contacts_size ON glenair_contacts(contact_size);

            -- One row per (arrangement, contact size)
            CREATE TABLE IF NOT EXISTS glenair_arrangements (
                arrangement TEXT NOT NULL,
                total_contacts INTEGER NOT NULL,
                contact_size TEXT NOT NULL,
                contact_count INTEGER NOT NULL,
                UNIQUE (arrangement, contact_size)
            );
            CREATE INDEX IF NOT EXISTS idx_arrangements_lookup
                ON glenair_arrangements(total_contacts, contact_size);

            -- Wire size to compatible contact size
            CREATE TABLE IF NOT EXISTS glenair_wire_contacts (
                wire_size TEXT NOT NULL,
                system TEXT NOT NULL CHECK (system IN ('AWG', 'MM2')),
                contact_size TEXT NOT NULL,
                UNIQUE (wire_size, system, contact_size)
            );

            -- Arrangement to shell size / protective hardware dash number
            CREATE TABLE IF NOT EXISTS glenair_phm (
                arrangement TEXT PRIMARY KEY,
                shell_size INTEGER NOT NULL,
                dash_number TEXT NOT NULL
            );
            "#,
        )?;

        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;

        Ok(())
    }
}
