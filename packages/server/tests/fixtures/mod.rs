//! Test server fixture.
//!
//! Starts the real router on an ephemeral port, backed by in-memory stores and
//! a manual clock, so tests can move time forward and run reaper cycles.

use std::{sync::Arc, time::Duration};

use roll_call_server::{
    common::time::ManualClock,
    domain::{MessageRepository, ParticipantRepository, Timestamp},
    infrastructure::repository::{InMemoryMessageRepository, InMemoryParticipantRepository},
    reaper::{PresenceReaper, ReaperSettings},
    ui::{build_router, state::AppState},
};
use tokio::{net::TcpListener, task::JoinHandle};

pub const HEARTBEAT_TTL: Duration = Duration::from_secs(10);

pub struct TestServer {
    base_url: String,
    pub clock: Arc<ManualClock>,
    pub reaper: PresenceReaper,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let clock = Arc::new(ManualClock::new(Timestamp::new(1_700_000_000_000)));
        let participants: Arc<dyn ParticipantRepository> =
            Arc::new(InMemoryParticipantRepository::new());
        let messages: Arc<dyn MessageRepository> =
            Arc::new(InMemoryMessageRepository::new(clock.clone()));

        let reaper = PresenceReaper::new(
            participants.clone(),
            messages.clone(),
            clock.clone(),
            ReaperSettings {
                heartbeat_ttl: HEARTBEAT_TTL,
                period: Duration::from_secs(15),
            },
        );
        let state = Arc::new(AppState::new(participants, messages, clock.clone()));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, build_router(state))
                .await
                .expect("Test server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            clock,
            reaper,
            handle,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
