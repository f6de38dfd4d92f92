//! Series 80 part-number synthesis
//!
//! Part numbers follow `80<shell style>-<arrangement>-<contact letter><suffix>`,
//! e.g. `806-10SL-3-P20` for shell style 6, arrangement 10SL-3 and pin
//! contact 10-375-20.

use serde::Serialize;

use crate::entities::Contact;
use crate::glenair::wire::WireSystem;

/// Series prefix shared by every synthesized part number
pub const SERIES_PREFIX: &str = "80";

/// Suffix used when the contact part number has no dash-separated segment
pub const FALLBACK_SUFFIX: &str = "A";

/// Committed choices handed to [`synthesize`]
#[derive(Debug, Clone, Copy)]
pub struct SynthesisInput<'a> {
    pub shell_style: &'a str,
    pub arrangement: &'a str,
    /// Selected contacts in selection order
    pub contacts: &'a [Contact],
    pub wire_value: &'a str,
    pub wire_system: WireSystem,
}

/// Auxiliary facts recorded alongside a synthesized part number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultMetadata {
    #[serde(rename = "wireSize")]
    pub wire_size: String,
    #[serde(rename = "wireSystem")]
    pub wire_system: WireSystem,
    /// Contact part number the type letter and suffix were derived from
    #[serde(rename = "contactPN")]
    pub contact_pn: String,
}

/// Final output of the builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderResult {
    pub part_number: String,
    pub description: String,
    pub metadata: ResultMetadata,
}

/// Suffix derived from a vendor contact part number
///
/// Last `-` separated segment with `*` markers removed; [`FALLBACK_SUFFIX`]
/// when there is no dash at all.
pub fn contact_suffix(part_number: &str) -> String {
    match part_number.rsplit_once('-') {
        Some((_, last)) => last.replace('*', ""),
        None => FALLBACK_SUFFIX.to_string(),
    }
}

/// Encode committed choices into a connector part number
///
/// Returns `None` when no contact is selected. Only the first contact is
/// encoded: it drives the type letter and suffix, and any further selected
/// contacts do not appear in the part number.
pub fn synthesize(input: &SynthesisInput<'_>) -> Option<BuilderResult> {
    let primary = input.contacts.first()?;

    let part_number = format!(
        "{}{}-{}-{}{}",
        SERIES_PREFIX,
        input.shell_style,
        input.arrangement,
        primary.contact_type.code_letter(),
        contact_suffix(&primary.part_number)
    );

    let description = format!(
        "Glenair Series 80 Connector - Shell Style {}, Arrangement {}, {} Contacts",
        input.shell_style, input.arrangement, primary.contact_type
    );

    Some(BuilderResult {
        part_number,
        description,
        metadata: ResultMetadata {
            wire_size: input.wire_value.to_string(),
            wire_system: input.wire_system,
            contact_pn: primary.part_number.clone(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ContactType;

    fn input<'a>(shell: &'a str, arr: &'a str, contacts: &'a [Contact]) -> SynthesisInput<'a> {
        SynthesisInput {
            shell_style: shell,
            arrangement: arr,
            contacts,
            wire_value: "20",
            wire_system: WireSystem::Awg,
        }
    }

    #[test]
    fn test_pin_part_number() {
        let contacts = vec![Contact::new("10-375-20", ContactType::Pin, "20")];
        let result = synthesize(&input("6", "10SL-3", &contacts)).unwrap();
        assert_eq!(result.part_number, "806-10SL-3-P20");
        insta::assert_snapshot!(
            result.description,
            @"Glenair Series 80 Connector - Shell Style 6, Arrangement 10SL-3, Pin Contacts"
        );
        assert_eq!(result.metadata.contact_pn, "10-375-20");
        assert_eq!(result.metadata.wire_size, "20");
        assert_eq!(result.metadata.wire_system, WireSystem::Awg);
    }

    #[test]
    fn test_socket_without_dash_uses_fallback() {
        let contacts = vec![Contact::new("ABC", ContactType::Socket, "16")];
        let result = synthesize(&input("2", "12S-3", &contacts)).unwrap();
        assert_eq!(result.part_number, "802-12S-3-SA");
    }

    #[test]
    fn test_wildcards_stripped_from_suffix() {
        assert_eq!(contact_suffix("10-375-2*0*"), "20");
        assert_eq!(contact_suffix("NODASH"), "A");
        assert_eq!(contact_suffix("10-"), "");
    }

    #[test]
    fn test_first_contact_drives_encoding() {
        let contacts = vec![
            Contact::new("10-376-16", ContactType::Socket, "16"),
            Contact::new("10-375-20", ContactType::Pin, "20"),
        ];
        let result = synthesize(&input("0", "14S-5", &contacts)).unwrap();
        assert_eq!(result.part_number, "800-14S-5-S16");
        assert_eq!(result.metadata.contact_pn, "10-376-16");
    }

    #[test]
    fn test_empty_selection_yields_nothing() {
        assert!(synthesize(&input("6", "10SL-3", &[])).is_none());
    }

    #[test]
    fn test_deterministic() {
        let contacts = vec![Contact::new("10-375-20", ContactType::Pin, "20")];
        let a = synthesize(&input("6", "10SL-3", &contacts)).unwrap();
        let b = synthesize(&input("6", "10SL-3", &contacts)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_metadata_field_names() {
        let contacts = vec![Contact::new("10-375-20", ContactType::Pin, "20")];
        let result = synthesize(&input("6", "10SL-3", &contacts)).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["partNumber"], "806-10SL-3-P20");
        assert_eq!(json["metadata"]["wireSize"], "20");
        assert_eq!(json["metadata"]["wireSystem"], "AWG");
        assert_eq!(json["metadata"]["contactPN"], "10-375-20");
    }
}
