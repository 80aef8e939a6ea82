//! UseCase: メッセージ削除処理

use std::sync::Arc;

use crate::domain::{MessageId, MessageRepository, policy, validation};

use super::error::UseCaseError;

/// メッセージ削除のユースケース
pub struct DeleteMessageUseCase {
    messages: Arc<dyn MessageRepository>,
}

impl DeleteMessageUseCase {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    /// Delete a message owned by `requester`.
    pub async fn execute(&self, id: &str, requester: Option<&str>) -> Result<(), UseCaseError> {
        let requester = validation::validate_identity("user", requester)?;
        let id = MessageId::parse(id).map_err(|_| UseCaseError::NotFound(format!("message {id}")))?;

        let message = self.messages.get(&id).await?;
        if !policy::can_mutate(&message, &requester) {
            tracing::warn!("'{}' may not delete message {} from '{}'", requester, id, message.from);
            return Err(UseCaseError::Unauthorized(format!(
                "{requester} is not the sender of message {id}"
            )));
        }

        Ok(self.messages.remove(&id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            Audience, MessageDraft, MessageKind, MessageText, MockMessageRepository,
            RepositoryError, Timestamp,
        },
        usecase::fixtures::{Fixture, name},
    };

    async fn private_from_ana(fixture: &Fixture) -> crate::domain::Message {
        fixture
            .messages
            .append(MessageDraft::new(
                name("Ana"),
                Audience::new("Bia".to_string()).unwrap(),
                MessageText::new("segredo".to_string()).unwrap(),
                MessageKind::PrivateMessage,
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_delete_by_sender_succeeds() {
        // テスト項目: 送信者本人は削除できる
        // given (前提条件):
        let fixture = Fixture::new();
        let message = private_from_ana(&fixture).await;
        let usecase = DeleteMessageUseCase::new(fixture.messages.clone());

        // when (操作):
        let result = usecase.execute(&message.id.to_string(), Some("Ana")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(fixture.messages.get(&message.id).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_by_recipient_is_unauthorized() {
        // テスト項目: 宛先であっても送信者以外は削除できない
        // given (前提条件):
        let fixture = Fixture::new();
        let message = private_from_ana(&fixture).await;
        let usecase = DeleteMessageUseCase::new(fixture.messages.clone());

        // when (操作):
        let result = usecase.execute(&message.id.to_string(), Some("Bia")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(UseCaseError::Unauthorized(_))));
        assert_eq!(fixture.messages.get(&message.id).await.unwrap(), message);
    }

    #[tokio::test]
    async fn test_delete_missing_message_is_not_found() {
        // テスト項目: 存在しないメッセージの削除は NotFound
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = DeleteMessageUseCase::new(fixture.messages.clone());

        // when (操作):
        let result = usecase
            .execute("8d3c1c2e-4a55-4f7a-9d1e-2b1f0b7e9a10", Some("Ana"))
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(UseCaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_store_unavailable_after_lookup() {
        // テスト項目: 削除時のストア障害は Infrastructure として返される
        // given (前提条件):
        let stored = MessageDraft::new(
            name("Ana"),
            Audience::broadcast(),
            MessageText::new("oi".to_string()).unwrap(),
            MessageKind::Message,
        )
        .into_message(crate::domain::MessageIdFactory::generate(), Timestamp::new(0));
        let id = stored.id;
        let mut messages = MockMessageRepository::new();
        messages
            .expect_get()
            .returning(move |_| Ok(stored.clone()));
        messages
            .expect_remove()
            .returning(|_| Err(RepositoryError::Unavailable("down".to_string())));
        let usecase = DeleteMessageUseCase::new(Arc::new(messages));

        // when (操作):
        let result = usecase.execute(&id.to_string(), Some("Ana")).await;

        // then (期待する結果):
        assert_eq!(result, Err(UseCaseError::Infrastructure("down".to_string())));
    }
}
