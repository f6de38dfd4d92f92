//! Contact entity - one pin or socket row from the Series 80 catalog

use serde::{Deserialize, Serialize};

/// Whether a contact is a pin (male) or a socket (female)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactType {
    Pin,
    Socket,
}

impl ContactType {
    /// Catalog spelling ("Pin" / "Socket")
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Pin => "Pin",
            ContactType::Socket => "Socket",
        }
    }

    /// Letter used for this contact type inside a connector part number
    pub fn code_letter(&self) -> char {
        match self {
            ContactType::Pin => 'P',
            ContactType::Socket => 'S',
        }
    }
}

impl std::fmt::Display for ContactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContactType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pin" | "p" => Ok(ContactType::Pin),
            "socket" | "s" => Ok(ContactType::Socket),
            _ => Err(format!(
                "Invalid contact type: {}. Use 'pin' or 'socket'",
                s
            )),
        }
    }
}

/// A single catalog contact
///
/// `part_number` is unique only within a contact type: the same vendor
/// number may exist once as a pin and once as a socket. Missing wire ranges
/// mean the catalog has no data, not that the contact accepts no wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub part_number: String,

    #[serde(rename = "type")]
    pub contact_type: ContactType,

    /// Size code, compared as an opaque string ("16" and "16S" are unrelated)
    pub contact_size: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awg_range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mm2_range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Contact {
    pub fn new(
        part_number: impl Into<String>,
        contact_type: ContactType,
        contact_size: impl Into<String>,
    ) -> Self {
        Self {
            part_number: part_number.into(),
            contact_type,
            contact_size: contact_size.into(),
            awg_range: None,
            mm2_range: None,
            description: None,
        }
    }

    pub fn with_ranges(mut self, awg: Option<String>, mm2: Option<String>) -> Self {
        self.awg_range = awg;
        self.mm2_range = mm2;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
