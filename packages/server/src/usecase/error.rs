//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RepositoryError, ValidationError};

/// Error kinds returned by every externally exposed operation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UseCaseError {
    /// A live participant already uses this name
    #[error("name already taken: {0}")]
    NameTaken(String),

    /// Participant or message does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller may not perform this operation
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Input rejected by validation
    #[error(transparent)]
    ValidationFailed(#[from] ValidationError),

    /// Store unavailable or timed out
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<RepositoryError> for UseCaseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ParticipantAlreadyExists(name) => UseCaseError::NameTaken(name),
            RepositoryError::ParticipantNotFound(name) => {
                UseCaseError::NotFound(format!("participant {name}"))
            }
            RepositoryError::MessageNotFound(id) => UseCaseError::NotFound(format!("message {id}")),
            RepositoryError::Unavailable(reason) => {
                tracing::error!("Store unavailable: {}", reason);
                UseCaseError::Infrastructure(reason)
            }
        }
    }
}
