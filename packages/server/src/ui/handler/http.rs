//! HTTP API endpoint handlers.
//!
//! The caller identifies itself with the `User` header.

use std::{num::NonZeroUsize, sync::Arc};

use axum::{
    Json,
    extract::{FromRequest, Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{
    domain::{FieldError, ValidationError, validation::MessageInput},
    infrastructure::dto::http::{
        ErrorDto, JoinRequestDto, MessageDto, MessagesQueryDto, ParticipantDto,
    },
    ui::state::AppState,
    usecase::{
        DeleteMessageUseCase, EditMessageUseCase, HeartbeatUseCase, JoinParticipantUseCase,
        ListParticipantsUseCase, PostMessageUseCase, ReadMessagesUseCase, UseCaseError,
    },
};

const USER_HEADER: &str = "user";

/// UseCaseError rendered as an HTTP response
pub struct ApiError(UseCaseError);

impl From<UseCaseError> for ApiError {
    fn from(err: UseCaseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            UseCaseError::NameTaken(_) => StatusCode::CONFLICT,
            UseCaseError::NotFound(_) => StatusCode::NOT_FOUND,
            UseCaseError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            UseCaseError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            UseCaseError::Infrastructure(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status, Json(ErrorDto::from(&self.0))).into_response()
    }
}

/// Malformed or mistyped bodies are reported like any other validation error.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(UseCaseError::ValidationFailed(ValidationError {
            errors: vec![FieldError::new("body", rejection.body_text())],
        }))
    }
}

/// `Json` extractor whose rejection is an [`ApiError`]
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

fn user(headers: &HeaderMap) -> Option<&str> {
    headers.get(USER_HEADER).and_then(|v| v.to_str().ok())
}

/// `limit` must be a positive integer when present.
fn parse_limit(raw: Option<&str>) -> Result<Option<NonZeroUsize>, UseCaseError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(NonZeroUsize::new)
        .map(Some)
        .ok_or_else(|| {
            UseCaseError::ValidationFailed(ValidationError {
                errors: vec![FieldError::new(
                    "limit",
                    "\"limit\" must be a positive integer",
                )],
            })
        })
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /participants`
pub async fn join(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<JoinRequestDto>,
) -> Result<(StatusCode, Json<ParticipantDto>), ApiError> {
    let usecase = JoinParticipantUseCase::new(
        state.participants.clone(),
        state.messages.clone(),
        state.clock.clone(),
    );
    let participant = usecase.execute(body.name.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(participant.into())))
}

/// `GET /participants`
pub async fn list_participants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ParticipantDto>>, ApiError> {
    let usecase = ListParticipantsUseCase::new(state.participants.clone());
    let participants = usecase.execute().await?;
    Ok(Json(participants.into_iter().map(Into::into).collect()))
}

/// `POST /messages`
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    JsonBody(body): JsonBody<MessageInput>,
) -> Result<(StatusCode, Json<MessageDto>), ApiError> {
    let usecase = PostMessageUseCase::new(state.participants.clone(), state.messages.clone());
    let message = usecase.execute(user(&headers), &body).await?;
    Ok((StatusCode::CREATED, Json(message.into())))
}

/// `GET /messages?limit=N`
pub async fn read_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<MessagesQueryDto>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let limit = parse_limit(query.limit.as_deref())?;
    let usecase = ReadMessagesUseCase::new(state.messages.clone());
    let messages = usecase.execute(user(&headers), limit).await?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

/// `PUT /messages/{id}`
pub async fn edit_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    JsonBody(body): JsonBody<MessageInput>,
) -> Result<Json<MessageDto>, ApiError> {
    let usecase = EditMessageUseCase::new(state.messages.clone());
    let message = usecase.execute(&id, user(&headers), &body).await?;
    Ok(Json(message.into()))
}

/// `DELETE /messages/{id}`
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteMessageUseCase::new(state.messages.clone());
    usecase.execute(&id, user(&headers)).await?;
    Ok(StatusCode::OK)
}

/// `POST /status`
pub async fn heartbeat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let usecase = HeartbeatUseCase::new(state.participants.clone(), state.clock.clone());
    usecase.execute(user(&headers)).await?;
    Ok(StatusCode::OK)
}
