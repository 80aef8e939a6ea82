//! Repository traits (the abstract store).
//!
//! The domain layer defines these; the infrastructure layer implements them.
//! Implementations must make every call atomic on its own. In particular
//! `sweep_expired` is a compare-and-delete against the same records that
//! `join` and `heartbeat` modify.

use std::{num::NonZeroUsize, time::Duration};

use async_trait::async_trait;

use super::{
    Message, MessageDraft, MessageId, MessagePatch, Participant, ParticipantName, RepositoryError,
    Timestamp,
};

/// Store of live participants and their heartbeats.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Insert a participant unless one with the same name is live.
    ///
    /// # Errors
    ///
    /// `RepositoryError::ParticipantAlreadyExists` if the name is taken.
    async fn join(&self, participant: Participant) -> Result<(), RepositoryError>;

    /// Refresh the heartbeat of an existing participant.
    ///
    /// # Errors
    ///
    /// `RepositoryError::ParticipantNotFound` if the participant is not live.
    async fn heartbeat(&self, name: &ParticipantName, now: Timestamp)
    -> Result<(), RepositoryError>;

    /// All live participants, in no particular order.
    async fn list(&self) -> Result<Vec<Participant>, RepositoryError>;

    /// Whether a participant with this name is live.
    async fn contains(&self, name: &ParticipantName) -> Result<bool, RepositoryError>;

    /// Remove and return every participant whose last heartbeat is at least
    /// `ttl` older than `now`.
    async fn sweep_expired(
        &self,
        now: Timestamp,
        ttl: Duration,
    ) -> Result<Vec<Participant>, RepositoryError>;
}

/// Append-ordered message log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Store a message, assigning its id and time.
    async fn append(&self, draft: MessageDraft) -> Result<Message, RepositoryError>;

    /// Store several messages in one call, in the given order.
    async fn append_batch(&self, drafts: Vec<MessageDraft>)
    -> Result<Vec<Message>, RepositoryError>;

    /// Messages visible to `viewer`.
    ///
    /// Without a limit, every visible message in insertion order.
    /// With a limit, at most that many of the most recent ones, newest first.
    async fn read_for(
        &self,
        viewer: &ParticipantName,
        limit: Option<NonZeroUsize>,
    ) -> Result<Vec<Message>, RepositoryError>;

    /// # Errors
    ///
    /// `RepositoryError::MessageNotFound` if there is no such message.
    async fn get(&self, id: &MessageId) -> Result<Message, RepositoryError>;

    /// Replace `to`, `text` and `kind` of a message and return the result.
    ///
    /// # Errors
    ///
    /// `RepositoryError::MessageNotFound` if there is no such message.
    async fn update(&self, id: &MessageId, patch: MessagePatch)
    -> Result<Message, RepositoryError>;

    /// # Errors
    ///
    /// `RepositoryError::MessageNotFound` if there is no such message.
    async fn remove(&self, id: &MessageId) -> Result<(), RepositoryError>;
}
