//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod policy;
pub mod repository;
pub mod validation;
pub mod value_object;

pub use entity::{JOIN_NOTICE, LEAVE_NOTICE, Message, MessageDraft, MessagePatch, Participant};
pub use error::{FieldError, RepositoryError, ValidationError, ValueObjectError};
pub use factory::MessageIdFactory;
pub use repository::{MessageRepository, ParticipantRepository};
#[cfg(test)]
pub use repository::{MockMessageRepository, MockParticipantRepository};
pub use value_object::{Audience, MessageId, MessageKind, MessageText, ParticipantName, Timestamp};
