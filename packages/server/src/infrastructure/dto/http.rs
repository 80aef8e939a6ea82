//! HTTP API request/response DTOs for the chat application.

use roll_call_shared::time::timestamp_to_clock_time;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{FieldError, Message, Participant},
    usecase::UseCaseError,
};

/// Body of `POST /participants`
#[derive(Debug, Clone, Deserialize)]
pub struct JoinRequestDto {
    pub name: Option<String>,
}

/// Query of `GET /messages`
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesQueryDto {
    pub limit: Option<String>,
}

/// Participant as listed by `GET /participants`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub name: String,
    /// Last heartbeat, Unix milliseconds
    #[serde(rename = "lastStatus")]
    pub last_status: i64,
}

impl From<Participant> for ParticipantDto {
    fn from(participant: Participant) -> Self {
        Self {
            name: participant.name.into_string(),
            last_status: participant.last_heartbeat.value(),
        }
    }
}

/// Message as returned by the message endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Local wall-clock time, HH:MM:SS
    pub time: String,
}

impl From<Message> for MessageDto {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.to_string(),
            from: message.from.into_string(),
            to: message.to.as_str().to_string(),
            text: message.text.as_str().to_string(),
            kind: message.kind.as_str().to_string(),
            time: timestamp_to_clock_time(message.time.value()),
        }
    }
}

/// Error body shared by every endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDto {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl From<&UseCaseError> for ErrorDto {
    fn from(err: &UseCaseError) -> Self {
        let (error, details) = match err {
            UseCaseError::NameTaken(_) => ("name_taken", Vec::new()),
            UseCaseError::NotFound(_) => ("not_found", Vec::new()),
            UseCaseError::Unauthorized(_) => ("unauthorized", Vec::new()),
            UseCaseError::ValidationFailed(v) => ("validation_failed", v.errors.clone()),
            UseCaseError::Infrastructure(_) => ("infrastructure", Vec::new()),
        };
        Self {
            error,
            message: err.to_string(),
            details,
        }
    }
}
