//! CLI command implementations

pub mod build;
pub mod catalog;
pub mod completions;
pub mod config;
pub mod import;
pub mod init;
pub mod wire;
