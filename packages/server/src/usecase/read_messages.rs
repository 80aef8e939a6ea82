//! UseCase: メッセージ一覧の取得

use std::{num::NonZeroUsize, sync::Arc};

use crate::domain::{Message, MessageRepository, validation};

use super::error::UseCaseError;

/// メッセージ取得のユースケース
pub struct ReadMessagesUseCase {
    messages: Arc<dyn MessageRepository>,
}

impl ReadMessagesUseCase {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    /// Messages visible to `viewer`.
    ///
    /// Without `limit`, all of them in insertion order. With `limit`, the
    /// most recent ones, newest first.
    pub async fn execute(
        &self,
        viewer: Option<&str>,
        limit: Option<NonZeroUsize>,
    ) -> Result<Vec<Message>, UseCaseError> {
        let viewer = validation::validate_identity("user", viewer)?;
        Ok(self.messages.read_for(&viewer, limit).await?)
    }
}
