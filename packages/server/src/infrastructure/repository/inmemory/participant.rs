//! InMemory Participant Repository 実装
//!
//! HashMap をインメモリ DB として使用します。
//! 全ての操作は 1 回のロック取得内で完結するため、`sweep_expired` の
//! 比較と削除は `join` / `heartbeat` に対してアトミックです。

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Participant, ParticipantName, ParticipantRepository, RepositoryError, Timestamp};

/// インメモリ Participant Repository 実装
#[derive(Default)]
pub struct InMemoryParticipantRepository {
    /// 参加者名 → 参加者
    participants: Mutex<HashMap<String, Participant>>,
}

impl InMemoryParticipantRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn join(&self, participant: Participant) -> Result<(), RepositoryError> {
        let mut participants = self.participants.lock().await;
        let key = participant.name.as_str().to_string();
        if participants.contains_key(&key) {
            return Err(RepositoryError::ParticipantAlreadyExists(key));
        }
        participants.insert(key, participant);
        Ok(())
    }

    async fn heartbeat(
        &self,
        name: &ParticipantName,
        now: Timestamp,
    ) -> Result<(), RepositoryError> {
        let mut participants = self.participants.lock().await;
        let participant = participants
            .get_mut(name.as_str())
            .ok_or_else(|| RepositoryError::ParticipantNotFound(name.to_string()))?;
        participant.touch(now);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Participant>, RepositoryError> {
        let participants = self.participants.lock().await;
        Ok(participants.values().cloned().collect())
    }

    async fn contains(&self, name: &ParticipantName) -> Result<bool, RepositoryError> {
        let participants = self.participants.lock().await;
        Ok(participants.contains_key(name.as_str()))
    }

    async fn sweep_expired(
        &self,
        now: Timestamp,
        ttl: Duration,
    ) -> Result<Vec<Participant>, RepositoryError> {
        let mut participants = self.participants.lock().await;
        let expired: Vec<String> = participants
            .values()
            .filter(|p| p.is_expired(now, ttl))
            .map(|p| p.name.as_str().to_string())
            .collect();

        Ok(expired
            .iter()
            .filter_map(|key| participants.remove(key))
            .collect())
    }
}
