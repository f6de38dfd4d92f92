//! Guided selection state machine for the Series 80 part-number builder
//!
//! A [`BuilderSession`] walks the user forward through the stages in
//! [`Stage`] order. The only way back is [`BuilderSession::reset`].
//!
//! Stages that need catalog data use a two-phase protocol so a lookup can run
//! outside the `&mut` borrow of the session:
//!
//! 1. `begin_*` commits the inputs and returns a [`PendingQuery`] tagged with
//!    the session's current generation.
//! 2. [`PendingQuery::run`] performs the lookups against any [`ReferenceData`].
//! 3. [`BuilderSession::apply`] lands the outcome, or ignores it when the
//!    session has since been reset, re-submitted, or advanced.
//!
//! [`BuilderSession::commit_wire`] and [`BuilderSession::select_contact_size`]
//! run all three phases in one call.

use miette::Diagnostic;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::catalog::CatalogError;
use crate::core::reference::ReferenceData;
use crate::entities::{Arrangement, Contact};
use crate::glenair::synth::{synthesize, BuilderResult, SynthesisInput};
use crate::glenair::wire::WireSystem;

/// Builder stages, in the only order the session moves through them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Stage {
    #[default]
    WireSelection,
    ContactSizeSelection,
    ContactSelection,
    ArrangementSelection,
    ShellStyleSelection,
    Synthesis,
    Complete,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::WireSelection => "wire selection",
            Stage::ContactSizeSelection => "contact size selection",
            Stage::ContactSelection => "contact selection",
            Stage::ArrangementSelection => "arrangement selection",
            Stage::ShellStyleSelection => "shell style selection",
            Stage::Synthesis => "synthesis",
            Stage::Complete => "complete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Choices committed so far in a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuilderSelection {
    pub wire_system: WireSystem,
    pub wire_value: String,
    pub conductor_count: u32,
    pub contact_size: Option<String>,
    /// Selected contacts in selection order, unique by part number
    pub selected_contacts: Vec<Contact>,
    pub arrangement: Option<String>,
    pub shell_style: Option<String>,
}

impl Default for BuilderSelection {
    fn default() -> Self {
        Self {
            wire_system: WireSystem::Awg,
            wire_value: String::new(),
            conductor_count: 1,
            contact_size: None,
            selected_contacts: Vec::new(),
            arrangement: None,
            shell_style: None,
        }
    }
}

impl BuilderSelection {
    /// Add the contact, or remove it if a contact with the same part number
    /// is already selected. Returns whether it is selected afterwards.
    pub fn toggle_contact(&mut self, contact: &Contact) -> bool {
        let before = self.selected_contacts.len();
        self.selected_contacts
            .retain(|c| c.part_number != contact.part_number);
        if self.selected_contacts.len() != before {
            return false;
        }
        self.selected_contacts.push(contact.clone());
        true
    }

    pub fn is_selected(&self, part_number: &str) -> bool {
        self.selected_contacts
            .iter()
            .any(|c| c.part_number == part_number)
    }
}

/// Errors reported by session transitions
///
/// Every error leaves the session at the stage it was in.
#[derive(Debug, Error, Diagnostic)]
pub enum BuilderError {
    #[error("reference data lookup failed during {stage}: {source}")]
    #[diagnostic(code(chd::builder::query), help("Check the catalog with `chd catalog stats`"))]
    QueryFailure {
        stage: Stage,
        #[source]
        source: CatalogError,
    },

    #[error("{action} is not accepted during {actual} (expected {expected})")]
    #[diagnostic(code(chd::builder::stage))]
    WrongStage {
        action: &'static str,
        expected: Stage,
        actual: Stage,
    },

    #[error("a wire size is required")]
    #[diagnostic(code(chd::builder::wire))]
    MissingWireValue,

    #[error("conductor count must be at least 1")]
    #[diagnostic(code(chd::builder::conductors))]
    InvalidConductorCount,

    #[error("arrangement '{0}' is not among the candidates for this selection")]
    #[diagnostic(
        code(chd::builder::arrangement),
        help("List candidates with `chd catalog arrangements --count N --size S`")
    )]
    UnknownArrangement(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum QueryKind {
    ContactSizes {
        wire_value: String,
        wire_system: WireSystem,
    },
    Candidates {
        contact_size: String,
        conductor_count: u32,
    },
}

/// A catalog lookup issued by a session, not yet run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    generation: u64,
    kind: QueryKind,
}

/// Data returned by a lookup
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    ContactSizes(Vec<String>),
    /// Both candidate sets for a contact size; always applied together
    Candidates {
        contacts: Vec<Contact>,
        arrangements: Vec<Arrangement>,
    },
}

/// A finished lookup, ready for [`BuilderSession::apply`]
#[derive(Debug)]
pub struct QueryOutcome {
    generation: u64,
    stage: Stage,
    result: Result<QueryResult, CatalogError>,
}

impl QueryOutcome {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn result(&self) -> Result<&QueryResult, &CatalogError> {
        self.result.as_ref()
    }
}

/// What [`BuilderSession::apply`] did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The outcome landed and the session moved to this stage
    Advanced(Stage),
    /// The outcome belonged to an older generation and was discarded
    Stale,
}

impl PendingQuery {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stage that issued this query
    pub fn stage(&self) -> Stage {
        match self.kind {
            QueryKind::ContactSizes { .. } => Stage::WireSelection,
            QueryKind::Candidates { .. } => Stage::ContactSizeSelection,
        }
    }

    /// Run the lookups one after the other
    pub fn run<R: ReferenceData + ?Sized>(&self, data: &R) -> QueryOutcome {
        let result = match &self.kind {
            QueryKind::ContactSizes {
                wire_value,
                wire_system,
            } => data
                .compatible_contact_sizes(wire_value, *wire_system)
                .map(QueryResult::ContactSizes),
            QueryKind::Candidates {
                contact_size,
                conductor_count,
            } => {
                let contacts = data.contacts_by_size(contact_size);
                let arrangements = data.arrangements_by_contact_count(*conductor_count, contact_size);
                combine_candidates(contacts, arrangements)
            }
        };
        self.finish(result)
    }

    /// Run the contact and arrangement lookups on separate threads
    ///
    /// Only the candidate query has two independent lookups; the contact-size
    /// query runs inline.
    pub fn run_concurrent<R: ReferenceData + Sync + ?Sized>(&self, data: &R) -> QueryOutcome {
        let QueryKind::Candidates {
            contact_size,
            conductor_count,
        } = &self.kind
        else {
            return self.run(data);
        };

        let (contacts, arrangements) = std::thread::scope(|scope| {
            let contacts = scope.spawn(|| data.contacts_by_size(contact_size));
            let arrangements = data.arrangements_by_contact_count(*conductor_count, contact_size);
            let contacts = contacts
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
            (contacts, arrangements)
        });

        self.finish(combine_candidates(contacts, arrangements))
    }

    fn finish(&self, result: Result<QueryResult, CatalogError>) -> QueryOutcome {
        QueryOutcome {
            generation: self.generation,
            stage: self.stage(),
            result,
        }
    }
}

fn combine_candidates(
    contacts: Result<Vec<Contact>, CatalogError>,
    arrangements: Result<Vec<Arrangement>, CatalogError>,
) -> Result<QueryResult, CatalogError> {
    Ok(QueryResult::Candidates {
        contacts: contacts?,
        arrangements: arrangements?,
    })
}

/// One configurator session
///
/// Owns its selection exclusively; all mutation goes through `&mut self`.
#[derive(Debug, Default)]
pub struct BuilderSession {
    stage: Stage,
    selection: BuilderSelection,
    generation: u64,
    pending: Option<u64>,
    available_contact_sizes: Vec<String>,
    available_contacts: Vec<Contact>,
    available_arrangements: Vec<Arrangement>,
    result: Option<BuilderResult>,
}

impl BuilderSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn selection(&self) -> &BuilderSelection {
        &self.selection
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a query has been issued and not yet applied
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn available_contact_sizes(&self) -> &[String] {
        &self.available_contact_sizes
    }

    pub fn available_contacts(&self) -> &[Contact] {
        &self.available_contacts
    }

    pub fn available_arrangements(&self) -> &[Arrangement] {
        &self.available_arrangements
    }

    pub fn result(&self) -> Option<&BuilderResult> {
        self.result.as_ref()
    }

    fn expect_stage(&self, expected: Stage, action: &'static str) -> Result<(), BuilderError> {
        if self.stage != expected {
            return Err(BuilderError::WrongStage {
                action,
                expected,
                actual: self.stage,
            });
        }
        Ok(())
    }

    fn advance(&mut self, next: Stage) -> Applied {
        debug!(from = %self.stage, to = %next, "builder stage advanced");
        self.stage = next;
        self.generation += 1;
        Applied::Advanced(next)
    }

    fn issue(&mut self, kind: QueryKind) -> PendingQuery {
        self.generation += 1;
        self.pending = Some(self.generation);
        PendingQuery {
            generation: self.generation,
            kind,
        }
    }

    /// Commit the wire choice and issue the contact-size lookup
    pub fn begin_wire_selection(
        &mut self,
        wire_system: WireSystem,
        wire_value: &str,
        conductor_count: u32,
    ) -> Result<PendingQuery, BuilderError> {
        self.expect_stage(Stage::WireSelection, "wire selection")?;

        let wire_value = wire_value.trim();
        if wire_value.is_empty() {
            return Err(BuilderError::MissingWireValue);
        }
        if conductor_count == 0 {
            return Err(BuilderError::InvalidConductorCount);
        }

        self.selection.wire_system = wire_system;
        self.selection.wire_value = wire_value.to_string();
        self.selection.conductor_count = conductor_count;

        Ok(self.issue(QueryKind::ContactSizes {
            wire_value: wire_value.to_string(),
            wire_system,
        }))
    }

    /// Commit a contact size and issue the contact and arrangement lookups
    ///
    /// The size is not checked against the offered candidates.
    pub fn begin_contact_size(&mut self, contact_size: &str) -> Result<PendingQuery, BuilderError> {
        self.expect_stage(Stage::ContactSizeSelection, "contact size selection")?;

        self.selection.contact_size = Some(contact_size.to_string());

        Ok(self.issue(QueryKind::Candidates {
            contact_size: contact_size.to_string(),
            conductor_count: self.selection.conductor_count,
        }))
    }

    /// Land a finished lookup
    ///
    /// Outcomes from an older generation are discarded without touching the
    /// session. A failed lookup leaves the stage unchanged so the caller can
    /// re-submit it.
    pub fn apply(&mut self, outcome: QueryOutcome) -> Result<Applied, BuilderError> {
        if self.pending != Some(outcome.generation) || outcome.stage != self.stage {
            warn!(
                outcome_generation = outcome.generation,
                session_generation = self.generation,
                "discarding stale reference data"
            );
            return Ok(Applied::Stale);
        }
        self.pending = None;

        match outcome.result {
            Err(source) => Err(BuilderError::QueryFailure {
                stage: self.stage,
                source,
            }),
            Ok(QueryResult::ContactSizes(sizes)) => {
                debug!(count = sizes.len(), "compatible contact sizes loaded");
                self.available_contact_sizes = sizes;
                Ok(self.advance(Stage::ContactSizeSelection))
            }
            Ok(QueryResult::Candidates {
                contacts,
                arrangements,
            }) => {
                debug!(
                    contacts = contacts.len(),
                    arrangements = arrangements.len(),
                    "contact candidates loaded"
                );
                self.available_contacts = contacts;
                self.available_arrangements = arrangements;
                Ok(self.advance(Stage::ContactSelection))
            }
        }
    }

    /// Commit the wire choice and load compatible contact sizes
    pub fn commit_wire<R: ReferenceData + ?Sized>(
        &mut self,
        data: &R,
        wire_system: WireSystem,
        wire_value: &str,
        conductor_count: u32,
    ) -> Result<&[String], BuilderError> {
        let query = self.begin_wire_selection(wire_system, wire_value, conductor_count)?;
        self.apply(query.run(data))?;
        Ok(&self.available_contact_sizes)
    }

    /// Commit a contact size and load candidate contacts and arrangements
    pub fn select_contact_size<R: ReferenceData + ?Sized>(
        &mut self,
        data: &R,
        contact_size: &str,
    ) -> Result<(), BuilderError> {
        let query = self.begin_contact_size(contact_size)?;
        self.apply(query.run(data))?;
        Ok(())
    }

    /// Toggle a contact in or out of the selection
    ///
    /// Returns whether the contact is selected afterwards. Never advances the
    /// stage.
    pub fn toggle_contact(&mut self, contact: &Contact) -> Result<bool, BuilderError> {
        self.expect_stage(Stage::ContactSelection, "contact toggle")?;
        Ok(self.selection.toggle_contact(contact))
    }

    /// Finish contact selection and move on to arrangement selection
    pub fn confirm_contacts(&mut self) -> Result<(), BuilderError> {
        self.expect_stage(Stage::ContactSelection, "contact confirmation")?;
        self.advance(Stage::ArrangementSelection);
        Ok(())
    }

    /// Commit one of the candidate arrangements
    ///
    /// Accepted during contact selection too, which confirms the contacts.
    pub fn select_arrangement(&mut self, arrangement: &str) -> Result<(), BuilderError> {
        if !matches!(
            self.stage,
            Stage::ContactSelection | Stage::ArrangementSelection
        ) {
            return Err(BuilderError::WrongStage {
                action: "arrangement selection",
                expected: Stage::ArrangementSelection,
                actual: self.stage,
            });
        }

        if !self
            .available_arrangements
            .iter()
            .any(|a| a.arrangement == arrangement)
        {
            return Err(BuilderError::UnknownArrangement(arrangement.to_string()));
        }

        self.selection.arrangement = Some(arrangement.to_string());
        self.advance(Stage::ShellStyleSelection);
        Ok(())
    }

    /// Commit a shell style code; any vendor code is accepted
    pub fn select_shell_style(&mut self, shell_style: &str) -> Result<(), BuilderError> {
        self.expect_stage(Stage::ShellStyleSelection, "shell style selection")?;
        self.selection.shell_style = Some(shell_style.trim().to_string());
        self.advance(Stage::Synthesis);
        Ok(())
    }

    /// Synthesize the part number from the committed selection
    ///
    /// Returns `None` and leaves the session untouched when called outside the
    /// synthesis stage, or when the shell style, the arrangement, or the
    /// contact selection is missing.
    pub fn build_part(&mut self) -> Option<&BuilderResult> {
        if self.stage != Stage::Synthesis {
            debug!(stage = %self.stage, "build requested outside synthesis");
            return None;
        }

        let result = {
            let sel = &self.selection;
            let shell_style = sel.shell_style.as_deref().filter(|s| !s.is_empty())?;
            let arrangement = sel.arrangement.as_deref().filter(|s| !s.is_empty())?;
            synthesize(&SynthesisInput {
                shell_style,
                arrangement,
                contacts: &sel.selected_contacts,
                wire_value: &sel.wire_value,
                wire_system: sel.wire_system,
            })?
        };

        self.advance(Stage::Complete);
        Some(&*self.result.insert(result))
    }

    /// Discard everything and return to wire selection
    ///
    /// Outstanding queries become stale.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        debug!(generation, "builder session reset");
        *self = Self {
            generation,
            ..Self::default()
        };
    }
}
