//! Wire-to-contact mapping - which contact sizes accept a given wire

use serde::{Deserialize, Serialize};

use crate::glenair::wire::WireSystem;

/// Association between a wire size in one system and a contact size
///
/// `(wire_size, system, contact_size)` is the natural key. Inserting the same
/// triple twice is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WireContactMapping {
    pub wire_size: String,
    pub system: WireSystem,
    pub contact_size: String,
}

impl WireContactMapping {
    pub fn new(
        wire_size: impl Into<String>,
        system: WireSystem,
        contact_size: impl Into<String>,
    ) -> Self {
        Self {
            wire_size: wire_size.into(),
            system,
            contact_size: contact_size.into(),
        }
    }
}
