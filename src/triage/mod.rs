//! The adaptive diagnostic session engine: narrative normalization,
//! evidence gating, bilingual question banks, and follow-up selection.

pub mod gate;
pub mod language;
pub mod normalize;
pub mod questions;
pub mod selector;

use thiserror::Error;

use crate::model::ModelError;

pub use gate::Admission;
pub use language::Language;
pub use questions::{Question, QuestionBank, QuestionCategory};
pub use selector::{SelectionMode, SessionDecision, SessionState, StopReason};

/// Triage pipeline errors. Machine-readable kind plus a free-text reason —
/// never encoded inside message strings.
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("insufficient symptom evidence: {reason}")]
    InsufficientEvidence { reason: String },

    #[error("unsupported language: {detected}")]
    UnsupportedLanguage { detected: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}
