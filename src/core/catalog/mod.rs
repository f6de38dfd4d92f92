//! SQLite-backed Series 80 reference catalog
//!
//! The catalog holds four tables: contacts, arrangement size breakdowns,
//! wire-to-contact-size mappings and PHM shell-size mappings. It implements
//! [`ReferenceData`](crate::core::reference::ReferenceData) so the builder can
//! run directly against it.
//!
//! Unlike a cache, the catalog cannot be regenerated from other files, so a
//! schema version mismatch is an error rather than a rebuild.

mod queries;
mod schema;
mod store;

pub use queries::CatalogCounts;

use std::fs;
use std::path::Path;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Connection;
use thiserror::Error;
use tracing::debug;

use crate::entities::ContactType;
use crate::glenair::wire::WireSystem;

/// Catalog file name inside the project directory
pub const CATALOG_FILE: &str = "catalog.db";

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Errors raised by catalog storage and lookups
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog schema version {found} is not supported (expected {expected})")]
    SchemaVersion { found: i32, expected: i32 },

    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// The reference catalog backed by SQLite
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Open or create the catalog at `path`
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        debug!(path = %path.display(), "opened catalog");

        Self::prepare(conn)
    }

    /// Open a private in-memory catalog
    pub fn open_in_memory() -> Result<Self, CatalogError> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> Result<Self, CatalogError> {
        let mut catalog = Self { conn };

        match catalog.schema_version()? {
            0 => catalog.init_schema()?,
            SCHEMA_VERSION => {}
            found => {
                return Err(CatalogError::SchemaVersion {
                    found,
                    expected: SCHEMA_VERSION,
                })
            }
        }

        Ok(catalog)
    }

    /// Stored schema version, 0 for a fresh database
    fn schema_version(&self) -> Result<i32, CatalogError> {
        let has_table: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |row| row.get(0),
        )?;
        if !has_table {
            return Ok(0);
        }

        let version = self
            .conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                row.get::<_, Option<i32>>(0)
            })?;
        Ok(version.unwrap_or(0))
    }
}

impl ToSql for ContactType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ContactType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

impl ToSql for WireSystem {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for WireSystem {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}
