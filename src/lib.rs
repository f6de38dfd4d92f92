//! CHD: connector and harness design tools
//!
//! Configures Glenair Series 80 connector part numbers from a local SQLite
//! reference catalog, by narrowing wire size, contact size, contacts,
//! arrangement and shell style in turn.

pub mod cli;
pub mod core;
pub mod entities;
pub mod glenair;
