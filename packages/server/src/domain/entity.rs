//! Core domain models for the chat application.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::value_object::{Audience, MessageId, MessageKind, MessageText, ParticipantName, Timestamp};

/// Body of the status notice appended when a participant joins
pub const JOIN_NOTICE: &str = "entra na sala...";

/// Body of the status notice appended when a participant is evicted
pub const LEAVE_NOTICE: &str = "sai da sala...";

/// Represents a live participant and its presence heartbeat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Participant name (natural key)
    pub name: ParticipantName,
    /// Timestamp of the latest join or heartbeat
    pub last_heartbeat: Timestamp,
}

impl Participant {
    /// Create a new participant
    pub fn new(name: ParticipantName, last_heartbeat: Timestamp) -> Self {
        Self {
            name,
            last_heartbeat,
        }
    }

    /// Record a heartbeat. The stored value never moves backwards.
    pub fn touch(&mut self, now: Timestamp) {
        self.last_heartbeat = self.last_heartbeat.max(now);
    }

    /// Whether no heartbeat was seen for at least `ttl` as of `now`
    pub fn is_expired(&self, now: Timestamp, ttl: Duration) -> bool {
        now.has_elapsed_since(self.last_heartbeat, ttl)
    }
}

/// Represents a stored chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Identifier assigned by the store
    pub id: MessageId,
    /// Sender's name
    pub from: ParticipantName,
    /// Target audience
    pub to: Audience,
    /// Message body
    pub text: MessageText,
    /// Message kind
    pub kind: MessageKind,
    /// Time assigned by the store on append
    pub time: Timestamp,
}

impl Message {
    /// Replace the editable fields. `id`, `from` and `time` stay untouched.
    pub fn apply(&mut self, patch: MessagePatch) {
        self.to = patch.to;
        self.text = patch.text;
        self.kind = patch.kind;
    }
}

/// A message that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub from: ParticipantName,
    pub to: Audience,
    pub text: MessageText,
    pub kind: MessageKind,
}

impl MessageDraft {
    pub fn new(from: ParticipantName, to: Audience, text: MessageText, kind: MessageKind) -> Self {
        Self {
            from,
            to,
            text,
            kind,
        }
    }

    /// Broadcast status notice "`name` joined"
    pub fn join_notice(name: ParticipantName) -> Self {
        Self::status(name, JOIN_NOTICE)
    }

    /// Broadcast status notice "`name` left"
    pub fn leave_notice(name: ParticipantName) -> Self {
        Self::status(name, LEAVE_NOTICE)
    }

    fn status(name: ParticipantName, body: &'static str) -> Self {
        Self {
            from: name,
            to: Audience::broadcast(),
            text: MessageText::notice(body),
            kind: MessageKind::Status,
        }
    }

    /// Turn the draft into a stored message
    pub fn into_message(self, id: MessageId, time: Timestamp) -> Message {
        Message {
            id,
            from: self.from,
            to: self.to,
            text: self.text,
            kind: self.kind,
            time,
        }
    }
}

/// Replacement values for an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePatch {
    pub to: Audience,
    pub text: MessageText,
    pub kind: MessageKind,
}
