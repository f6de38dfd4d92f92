//! Arrangement entity - insert patterns and their contact-size breakdown
//!
//! The catalog stores one row per (arrangement, contact size). An arrangement
//! identifier such as "10SL-3" is therefore not unique on its own; every row
//! of the same arrangement repeats the overall `total_contacts`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One size breakdown row of an arrangement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrangement {
    pub arrangement: String,
    pub total_contacts: u32,
    pub contact_size: String,
    pub contact_count: u32,
}

impl Arrangement {
    pub fn new(
        arrangement: impl Into<String>,
        total_contacts: u32,
        contact_size: impl Into<String>,
        contact_count: u32,
    ) -> Self {
        Self {
            arrangement: arrangement.into(),
            total_contacts,
            contact_size: contact_size.into(),
            contact_count,
        }
    }
}

/// An arrangement whose rows disagree with its declared total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrangementViolation {
    pub arrangement: String,
    /// Distinct `total_contacts` values seen across the group
    pub declared_totals: Vec<u32>,
    /// Sum of `contact_count` across the group, widened so it cannot wrap
    pub counted: u64,
}

impl std::fmt::Display for ArrangementViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let declared: Vec<String> = self.declared_totals.iter().map(|t| t.to_string()).collect();
        write!(
            f,
            "{}: declares {} contact(s) but size rows sum to {}",
            self.arrangement,
            declared.join("/"),
            self.counted
        )
    }
}

/// Check that every arrangement's size rows sum to its total contact count
///
/// Groups that declare more than one distinct total are always reported.
/// Results are ordered by arrangement identifier.
pub fn check_arrangements(rows: &[Arrangement]) -> Vec<ArrangementViolation> {
    let mut groups: BTreeMap<&str, (Vec<u32>, u64)> = BTreeMap::new();

    for row in rows {
        let entry = groups.entry(row.arrangement.as_str()).or_default();
        if !entry.0.contains(&row.total_contacts) {
            entry.0.push(row.total_contacts);
        }
        entry.1 += u64::from(row.contact_count);
    }

    groups
        .into_iter()
        .filter(|(_, (totals, counted))| totals.len() != 1 || u64::from(totals[0]) != *counted)
        .map(|(arrangement, (mut declared_totals, counted))| {
            declared_totals.sort_unstable();
            ArrangementViolation {
                arrangement: arrangement.to_string(),
                declared_totals,
                counted,
            }
        })
        .collect()
}
