//! Presence reaper.
//!
//! Periodically evicts participants whose heartbeat is older than the TTL and
//! posts one broadcast departure notice per evicted participant. Each cycle
//! runs `Idle -> Scanning -> (Evicting ->) Idle`. Store errors are logged and
//! the cycle ends; the next tick sweeps again with an absolute cutoff, so a
//! missed cycle never accumulates a backlog.
//!
//! Eviction and its notice are two separate store writes. If appending the
//! notices fails, the participants stay evicted without a departure notice.

use std::{sync::Arc, time::Duration};

use tokio::time::{Instant, MissedTickBehavior};

use crate::{
    common::time::Clock,
    domain::{
        MessageDraft, MessageRepository, Participant, ParticipantName, ParticipantRepository,
        RepositoryError,
    },
};

/// Timing of the reaper. TTL and period are tuned independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaperSettings {
    /// Maximum gap since the last heartbeat
    pub heartbeat_ttl: Duration,
    /// Time between two sweeps
    pub period: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaperState {
    Idle,
    Scanning,
    Evicting,
}

/// Outcome of a single cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepReport {
    /// Nobody expired
    Quiet,
    /// These participants were removed and announced
    Evicted(Vec<ParticipantName>),
    /// The cycle was abandoned; the next tick retries from scratch
    Failed(RepositoryError),
}

pub struct PresenceReaper {
    participants: Arc<dyn ParticipantRepository>,
    messages: Arc<dyn MessageRepository>,
    clock: Arc<dyn Clock>,
    settings: ReaperSettings,
    state: ReaperState,
}

impl PresenceReaper {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        messages: Arc<dyn MessageRepository>,
        clock: Arc<dyn Clock>,
        settings: ReaperSettings,
    ) -> Self {
        Self {
            participants,
            messages,
            clock,
            settings,
            state: ReaperState::Idle,
        }
    }

    pub fn state(&self) -> ReaperState {
        self.state
    }

    /// Run one full cycle and return to `Idle`.
    pub async fn tick(&mut self) -> SweepReport {
        self.state = ReaperState::Scanning;
        let now = self.clock.now();

        let report = match self
            .participants
            .sweep_expired(now, self.settings.heartbeat_ttl)
            .await
        {
            Ok(evicted) if evicted.is_empty() => SweepReport::Quiet,
            Ok(evicted) => {
                self.state = ReaperState::Evicting;
                self.announce(evicted).await
            }
            Err(e) => {
                tracing::warn!("Presence sweep failed, retrying next cycle: {}", e);
                SweepReport::Failed(e)
            }
        };

        self.state = ReaperState::Idle;
        report
    }

    async fn announce(&self, evicted: Vec<Participant>) -> SweepReport {
        let names: Vec<ParticipantName> = evicted.into_iter().map(|p| p.name).collect();
        let notices = names
            .iter()
            .cloned()
            .map(MessageDraft::leave_notice)
            .collect();

        match self.messages.append_batch(notices).await {
            Ok(_) => {
                for name in &names {
                    tracing::info!("Participant '{}' evicted after heartbeat timeout", name);
                }
                SweepReport::Evicted(names)
            }
            Err(e) => {
                tracing::warn!(
                    "Evicted {} participant(s) but could not post departure notices: {}",
                    names.len(),
                    e
                );
                SweepReport::Failed(e)
            }
        }
    }

    /// Sweep every `period` for the lifetime of the process.
    ///
    /// The first sweep happens one period after start.
    pub async fn run(mut self) {
        let period = self.settings.period;
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            "Presence reaper started (ttl: {:?}, period: {:?})",
            self.settings.heartbeat_ttl,
            period
        );
        loop {
            interval.tick().await;
            self.tick().await;
        }
    }
}
