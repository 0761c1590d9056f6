//! Error type shared by the page state machines and catalogue validation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DelegateError {
    #[error("goal required: enter your high-level goal before proceeding")]
    GoalRequired,

    #[error("interpretation not confirmed: confirm the AI interpretation before starting")]
    InterpretationNotConfirmed,

    #[error("unknown constraint type: {0}")]
    UnknownConstraintType(String),

    #[error("constraint value must be non-empty")]
    EmptyConstraintValue,

    #[error("no constraint with id {0}")]
    ConstraintNotFound(u64),

    #[error("unsupported document type: {0} (PDF, DOC, XLS, or image files only)")]
    UnsupportedDocument(String),

    #[error("document {name} is {size_bytes} bytes; the limit is {limit_bytes}")]
    DocumentTooLarge {
        name: String,
        size_bytes: u64,
        limit_bytes: u64,
    },

    #[error("unknown task: {0}")]
    UnknownTask(String),

    #[error("unknown recommendation: {0}")]
    UnknownRecommendation(String),

    #[error("unknown integration: {0}")]
    UnknownIntegration(String),

    #[error("invalid catalogue: {0}")]
    InvalidCatalog(String),

    #[error("invalid simulator config: {0}")]
    InvalidSimulatorConfig(String),
}

pub type Result<T> = std::result::Result<T, DelegateError>;
