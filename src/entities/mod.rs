//! Catalog entity types
//!
//! - [`Contact`] - Pin and socket contacts with their accepted wire ranges
//! - [`Arrangement`] - Insert arrangements broken down by contact size
//! - [`WireContactMapping`] - Wire sizes mapped to compatible contact sizes
//! - [`PhmMapping`] - Arrangement to shell size / hardware dash number

pub mod arrangement;
pub mod contact;
pub mod phm;
pub mod wire_mapping;

pub use arrangement::{check_arrangements, Arrangement, ArrangementViolation};
pub use contact::{Contact, ContactType};
pub use phm::PhmMapping;
pub use wire_mapping::WireContactMapping;
