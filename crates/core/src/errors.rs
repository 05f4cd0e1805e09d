//! Core error types for the Bizdesk document and pipeline core.
//!
//! Collaborator implementations (REST clients, storage adapters, test doubles)
//! report their own failures as [`Error::Collaborator`]; the core never wraps
//! or retries them, it only propagates what it was given.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Pipeline operation failed: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("External collaborator failed: {0}")]
    Collaborator(String),

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Pre-submission checks on a document draft.
///
/// These block submission and are surfaced to the user, who recovers by
/// editing the draft.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("A customer must be selected before submitting the document")]
    MissingCustomer,

    #[error("The document must contain at least one line item")]
    EmptyLineItems,
}

/// Errors raised by the pipeline stage engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A transition named a stage outside the fixed enumeration.
    #[error("Unknown pipeline stage '{0}'")]
    UnknownStage(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Settings(err.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Unexpected(format!("Background task failed: {}", err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
