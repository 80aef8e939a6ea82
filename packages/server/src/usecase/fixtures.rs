//! Test fixtures shared by the use case tests.

use std::sync::Arc;

use crate::{
    common::time::{Clock, ManualClock},
    domain::{Participant, ParticipantName, ParticipantRepository, Timestamp},
    infrastructure::repository::{InMemoryMessageRepository, InMemoryParticipantRepository},
};

pub struct Fixture {
    pub clock: Arc<ManualClock>,
    pub participants: Arc<InMemoryParticipantRepository>,
    pub messages: Arc<InMemoryMessageRepository>,
}

impl Fixture {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new(Timestamp::new(1_000_000)));
        Self {
            participants: Arc::new(InMemoryParticipantRepository::new()),
            messages: Arc::new(InMemoryMessageRepository::new(clock.clone())),
            clock,
        }
    }

    /// Register participants directly in the store, without join notices.
    pub async fn with_participants(names: &[&str]) -> Self {
        let fixture = Self::new();
        for n in names {
            fixture
                .participants
                .join(Participant::new(name(n), fixture.clock.now()))
                .await
                .unwrap();
        }
        fixture
    }
}

pub fn name(value: &str) -> ParticipantName {
    ParticipantName::new(value.to_string()).unwrap()
}
