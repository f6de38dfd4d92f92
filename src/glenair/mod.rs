//! Glenair Series 80 connector part-number builder
//!
//! - [`wire`] - AWG / mm² parsing, formatting and cross-reference table
//! - [`session`] - The guided selection state machine
//! - [`synth`] - Part-number synthesis from a finished selection
//! - [`shell`] - Known shell style codes and labels

pub mod session;
pub mod shell;
pub mod synth;
pub mod wire;

pub use session::{
    Applied, BuilderError, BuilderSelection, BuilderSession, PendingQuery, QueryOutcome,
    QueryResult, Stage,
};
pub use shell::{shell_style_label, ShellStyle, SHELL_STYLES};
pub use synth::{synthesize, BuilderResult, ResultMetadata, SynthesisInput};
pub use wire::{format_value, parse_value, WireSystem};
