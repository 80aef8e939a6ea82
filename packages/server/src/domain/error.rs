//! Domain layer error definitions.

use serde::Serialize;
use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ParticipantName validation error
    #[error("ParticipantName cannot be empty")]
    ParticipantNameEmpty,

    /// ParticipantName too long error
    #[error("ParticipantName cannot exceed {max} characters (got {actual})")]
    ParticipantNameTooLong { max: usize, actual: usize },

    /// Audience validation error
    #[error("Audience cannot be empty")]
    AudienceEmpty,

    /// Audience too long error
    #[error("Audience cannot exceed {max} characters (got {actual})")]
    AudienceTooLong { max: usize, actual: usize },

    /// MessageText validation error
    #[error("MessageText cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("MessageText cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },

    /// Unknown message type
    #[error("unknown message type: {0}")]
    UnknownMessageKind(String),

    /// MessageId invalid format error (not a valid UUID format)
    #[error("MessageId must be a valid UUID format (got: {0})")]
    MessageIdInvalidFormat(String),
}

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field as it appears on the wire (`name`, `to`, ...)
    pub field: String,
    /// Human readable reason
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Input rejected by the validation collaborator.
///
/// Always carries at least one field error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("validation failed: {}", summarize(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors surfaced by repository implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A live participant with this name is already registered
    #[error("participant already registered: {0}")]
    ParticipantAlreadyExists(String),

    /// No live participant with this name
    #[error("participant not found: {0}")]
    ParticipantNotFound(String),

    /// No message with this id
    #[error("message not found: {0}")]
    MessageNotFound(String),

    /// The backing store could not serve the request
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
