//! UseCase: メッセージ編集処理

use std::sync::Arc;

use crate::domain::{
    Message, MessageId, MessageRepository, policy,
    validation::{self, MessageInput},
};

use super::error::UseCaseError;

/// メッセージ編集のユースケース
pub struct EditMessageUseCase {
    messages: Arc<dyn MessageRepository>,
}

impl EditMessageUseCase {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    /// Replace `to`, `text` and `type` of a message owned by `requester`.
    ///
    /// # Errors
    ///
    /// * `ValidationFailed` - requester or replacement fields are invalid
    /// * `NotFound` - no message with this id (including malformed ids)
    /// * `Unauthorized` - requester is not the sender
    pub async fn execute(
        &self,
        id: &str,
        requester: Option<&str>,
        input: &MessageInput,
    ) -> Result<Message, UseCaseError> {
        let requester = validation::validate_identity("user", requester)?;
        let patch = validation::validate_patch(input)?;
        let id = MessageId::parse(id).map_err(|_| UseCaseError::NotFound(format!("message {id}")))?;

        let message = self.messages.get(&id).await?;
        if !policy::can_mutate(&message, &requester) {
            tracing::warn!("'{}' may not edit message {} from '{}'", requester, id, message.from);
            return Err(UseCaseError::Unauthorized(format!(
                "{requester} is not the sender of message {id}"
            )));
        }

        Ok(self.messages.update(&id, patch).await?)
    }
}
