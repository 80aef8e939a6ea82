//! UseCase: 参加者一覧の取得

use std::sync::Arc;

use crate::domain::{Participant, ParticipantRepository};

use super::error::UseCaseError;

pub struct ListParticipantsUseCase {
    participants: Arc<dyn ParticipantRepository>,
}

impl ListParticipantsUseCase {
    pub fn new(participants: Arc<dyn ParticipantRepository>) -> Self {
        Self { participants }
    }

    /// Current membership, in no particular order.
    pub async fn execute(&self) -> Result<Vec<Participant>, UseCaseError> {
        Ok(self.participants.list().await?)
    }
}
