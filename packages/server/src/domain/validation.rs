//! Input sanitization and validation.
//!
//! Every free-text field goes through [`sanitize`] before it is checked, so
//! the rest of the core only ever sees trimmed strings without markup.
//! All field errors are collected; validation never stops at the first one.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::{
    Audience, FieldError, MessageDraft, MessageKind, MessagePatch, MessageText, ParticipantName,
    ValidationError,
};

/// `<script>`/`<style>` elements with their content. An element that is never
/// closed runs to the end of the input.
static RAW_TEXT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?(?:</(?:script|style)[^>]*>|$)")
        .unwrap_or_else(|e| panic!("invalid raw text pattern: {e}"))
});

/// Any tag, including an unterminated `<...` tail.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*(?:>|$)").unwrap_or_else(|e| panic!("invalid tag pattern: {e}"))
});

/// Unvalidated message fields as received from a client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageInput {
    pub to: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Strip HTML tags (and the content of `<script>`/`<style>`) and trim.
///
/// Everything from a `<` with no closing `>` to the end of the input is
/// dropped, so the result never contains a `<`.
pub fn sanitize(raw: &str) -> String {
    let without_raw_text = RAW_TEXT_ELEMENT.replace_all(raw, "");
    TAG.replace_all(&without_raw_text, "").trim().to_string()
}

/// Sanitize a required field, recording an error when it is missing or blank.
fn required(field: &str, raw: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    let Some(raw) = raw else {
        errors.push(FieldError::new(field, format!("\"{field}\" is required")));
        return None;
    };
    let clean = sanitize(raw);
    if clean.is_empty() {
        errors.push(FieldError::new(field, format!("\"{field}\" must not be empty")));
        return None;
    }
    Some(clean)
}

fn participant_name(
    field: &str,
    raw: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> Option<ParticipantName> {
    let clean = required(field, raw, errors)?;
    ParticipantName::new(clean)
        .map_err(|e| errors.push(FieldError::new(field, e.to_string())))
        .ok()
}

fn user_kind(raw: Option<&str>, errors: &mut Vec<FieldError>) -> Option<MessageKind> {
    let clean = required("type", raw, errors)?;
    match clean.parse::<MessageKind>() {
        Ok(kind) if kind.is_user_authored() => Some(kind),
        _ => {
            errors.push(FieldError::new(
                "type",
                "\"type\" must be \"message\" or \"private_message\"",
            ));
            None
        }
    }
}

fn body(
    input: &MessageInput,
    errors: &mut Vec<FieldError>,
) -> (Option<Audience>, Option<MessageText>, Option<MessageKind>) {
    let to = required("to", input.to.as_deref(), errors).and_then(|clean| {
        Audience::new(clean)
            .map_err(|e| errors.push(FieldError::new("to", e.to_string())))
            .ok()
    });
    let text = required("text", input.text.as_deref(), errors).and_then(|clean| {
        MessageText::new(clean)
            .map_err(|e| errors.push(FieldError::new("text", e.to_string())))
            .ok()
    });
    let kind = user_kind(input.kind.as_deref(), errors);
    (to, text, kind)
}

/// Validate a participant name (field `name`).
pub fn validate_name(raw: Option<&str>) -> Result<ParticipantName, ValidationError> {
    validate_identity("name", raw)
}

/// Validate a name used to identify the caller (e.g. the `User` header).
pub fn validate_identity(field: &str, raw: Option<&str>) -> Result<ParticipantName, ValidationError> {
    let mut errors = Vec::new();
    match participant_name(field, raw, &mut errors) {
        Some(name) => Ok(name),
        None => Err(ValidationError { errors }),
    }
}

/// Validate a new message posted by `from`.
pub fn validate_message(
    from: Option<&str>,
    input: &MessageInput,
) -> Result<MessageDraft, ValidationError> {
    let mut errors = Vec::new();
    let (to, text, kind) = body(input, &mut errors);
    let from = participant_name("from", from, &mut errors);

    match (from, to, text, kind) {
        (Some(from), Some(to), Some(text), Some(kind)) if errors.is_empty() => {
            Ok(MessageDraft::new(from, to, text, kind))
        }
        _ => Err(ValidationError { errors }),
    }
}

/// Validate the replacement fields of an edit.
pub fn validate_patch(input: &MessageInput) -> Result<MessagePatch, ValidationError> {
    let mut errors = Vec::new();
    match body(input, &mut errors) {
        (Some(to), Some(text), Some(kind)) if errors.is_empty() => {
            Ok(MessagePatch { to, text, kind })
        }
        _ => Err(ValidationError { errors }),
    }
}
