//! Core module - project layout, configuration and the reference catalog

pub mod catalog;
pub mod config;
pub mod project;
pub mod reference;

pub use catalog::{Catalog, CatalogCounts, CatalogError};
pub use config::Config;
pub use project::{Project, ProjectError};
pub use reference::{MemoryCatalog, ReferenceData};
