//! UseCase: ハートビート (在室確認) 処理

use std::sync::Arc;

use crate::{
    common::time::Clock,
    domain::{ParticipantRepository, validation},
};

use super::error::UseCaseError;

/// ハートビートのユースケース
pub struct HeartbeatUseCase {
    participants: Arc<dyn ParticipantRepository>,
    clock: Arc<dyn Clock>,
}

impl HeartbeatUseCase {
    pub fn new(participants: Arc<dyn ParticipantRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            participants,
            clock,
        }
    }

    /// Refresh the caller's heartbeat.
    ///
    /// `NotFound` means the participant was evicted (or never joined) and
    /// has to join again; retrying the heartbeat will not help.
    pub async fn execute(&self, raw_name: Option<&str>) -> Result<(), UseCaseError> {
        let name = validation::validate_identity("user", raw_name)?;
        self.participants
            .heartbeat(&name, self.clock.now())
            .await
            .map_err(UseCaseError::from)
    }
}
