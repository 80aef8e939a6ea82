//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum length of a participant name (in characters)
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of a message body (in characters)
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Participant name value object.
///
/// The natural key of a participant. There is no identity proofing behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct ParticipantName(String);

impl ParticipantName {
    /// Create a new ParticipantName.
    ///
    /// # Arguments
    ///
    /// * `name` - The already sanitized participant name
    ///
    /// # Returns
    ///
    /// A Result containing the ParticipantName or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::ParticipantNameEmpty);
        }
        let len = name.chars().count();
        if len > MAX_NAME_LENGTH {
            return Err(ValueObjectError::ParticipantNameTooLong {
                max: MAX_NAME_LENGTH,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ParticipantName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Target audience of a message (the `to` field).
///
/// Either the broadcast marker or the name of a single participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Audience(String);

impl Audience {
    /// Wire value meaning "everyone".
    pub const BROADCAST: &'static str = "Todos";

    pub fn new(to: String) -> Result<Self, ValueObjectError> {
        if to.is_empty() {
            return Err(ValueObjectError::AudienceEmpty);
        }
        let len = to.chars().count();
        if len > MAX_NAME_LENGTH {
            return Err(ValueObjectError::AudienceTooLong {
                max: MAX_NAME_LENGTH,
                actual: len,
            });
        }
        Ok(Self(to))
    }

    /// The broadcast audience.
    pub fn broadcast() -> Self {
        Self(Self::BROADCAST.to_string())
    }

    pub fn is_broadcast(&self) -> bool {
        self.0 == Self::BROADCAST
    }

    /// Whether this audience is exactly the given participant.
    pub fn is_participant(&self, name: &ParticipantName) -> bool {
        self.0 == name.as_str()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Audience {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message body value object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct MessageText(String);

impl MessageText {
    pub fn new(text: String) -> Result<Self, ValueObjectError> {
        if text.is_empty() {
            return Err(ValueObjectError::MessageTextEmpty);
        }
        let len = text.chars().count();
        if len > MAX_TEXT_LENGTH {
            return Err(ValueObjectError::MessageTextTooLong {
                max: MAX_TEXT_LENGTH,
                actual: len,
            });
        }
        Ok(Self(text))
    }

    /// Fixed system notice bodies, known to be valid.
    pub(super) fn notice(body: &'static str) -> Self {
        Self(body.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a message.
///
/// `Status` is reserved for system generated join/leave notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Message,
    PrivateMessage,
    Status,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Message => "message",
            MessageKind::PrivateMessage => "private_message",
            MessageKind::Status => "status",
        }
    }

    /// Whether participants may author messages of this kind.
    pub fn is_user_authored(&self) -> bool {
        !matches!(self, MessageKind::Status)
    }
}

impl FromStr for MessageKind {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(MessageKind::Message),
            "private_message" => Ok(MessageKind::PrivateMessage),
            "status" => Ok(MessageKind::Status),
            other => Err(ValueObjectError::UnknownMessageKind(other.to_string())),
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message identifier value object (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a MessageId from its textual form.
    pub fn parse(id: &str) -> Result<Self, ValueObjectError> {
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| ValueObjectError::MessageIdInvalidFormat(id.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Whether at least `span` has passed between `earlier` and `self`.
    pub fn has_elapsed_since(&self, earlier: Timestamp, span: Duration) -> bool {
        let span_millis = i64::try_from(span.as_millis()).unwrap_or(i64::MAX);
        self.0.saturating_sub(earlier.0) >= span_millis
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
