//! Server wiring and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    common::time::{Clock, SystemClock},
    config::ServerConfig,
    domain::{MessageRepository, ParticipantRepository},
    infrastructure::repository::{InMemoryMessageRepository, InMemoryParticipantRepository},
    reaper::PresenceReaper,
    ui::{handler, signal::shutdown_signal, state::AppState},
};

/// Build the HTTP router over the given state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handler::health_check))
        .route(
            "/participants",
            post(handler::join).get(handler::list_participants),
        )
        .route(
            "/messages",
            post(handler::post_message).get(handler::read_messages),
        )
        .route(
            "/messages/{id}",
            put(handler::edit_message).delete(handler::delete_message),
        )
        .route("/status", post(handler::heartbeat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the presence reaper and serve HTTP until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let participants: Arc<dyn ParticipantRepository> =
        Arc::new(InMemoryParticipantRepository::new());
    let messages: Arc<dyn MessageRepository> =
        Arc::new(InMemoryMessageRepository::new(clock.clone()));

    let reaper = PresenceReaper::new(
        participants.clone(),
        messages.clone(),
        clock.clone(),
        config.reaper_settings(),
    );
    let reaper_handle = tokio::spawn(reaper.run());

    let state = Arc::new(AppState::new(participants, messages, clock));
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    let result = axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    reaper_handle.abort();
    result
}
