//! InMemory Message Repository 実装
//!
//! Vec を挿入順のログとして使用します。`time` はストアが割り当て、
//! 挿入順に対して単調非減少になります。

use std::{num::NonZeroUsize, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    common::time::Clock,
    domain::{
        Message, MessageDraft, MessageId, MessageIdFactory, MessagePatch, MessageRepository,
        ParticipantName, RepositoryError, Timestamp, policy,
    },
};

#[derive(Default)]
struct MessageLog {
    /// 挿入順のメッセージ
    messages: Vec<Message>,
    /// 最後に割り当てた時刻
    last_time: Option<Timestamp>,
}

impl MessageLog {
    fn push(&mut self, draft: MessageDraft, now: Timestamp) -> Message {
        let time = match self.last_time {
            Some(last) => last.max(now),
            None => now,
        };
        self.last_time = Some(time);
        let message = draft.into_message(MessageIdFactory::generate(), time);
        self.messages.push(message.clone());
        message
    }

    fn position(&self, id: &MessageId) -> Result<usize, RepositoryError> {
        self.messages
            .iter()
            .position(|m| m.id == *id)
            .ok_or_else(|| RepositoryError::MessageNotFound(id.to_string()))
    }
}

/// インメモリ Message Repository 実装
pub struct InMemoryMessageRepository {
    log: Mutex<MessageLog>,
    clock: Arc<dyn Clock>,
}

impl InMemoryMessageRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            log: Mutex::new(MessageLog::default()),
            clock,
        }
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, draft: MessageDraft) -> Result<Message, RepositoryError> {
        let mut log = self.log.lock().await;
        Ok(log.push(draft, self.clock.now()))
    }

    async fn append_batch(
        &self,
        drafts: Vec<MessageDraft>,
    ) -> Result<Vec<Message>, RepositoryError> {
        let mut log = self.log.lock().await;
        let now = self.clock.now();
        Ok(drafts
            .into_iter()
            .map(|draft| log.push(draft, now))
            .collect())
    }

    async fn read_for(
        &self,
        viewer: &ParticipantName,
        limit: Option<NonZeroUsize>,
    ) -> Result<Vec<Message>, RepositoryError> {
        let log = self.log.lock().await;
        Ok(policy::select_visible(&log.messages, viewer, limit))
    }

    async fn get(&self, id: &MessageId) -> Result<Message, RepositoryError> {
        let log = self.log.lock().await;
        let index = log.position(id)?;
        Ok(log.messages[index].clone())
    }

    async fn update(
        &self,
        id: &MessageId,
        patch: MessagePatch,
    ) -> Result<Message, RepositoryError> {
        let mut log = self.log.lock().await;
        let index = log.position(id)?;
        let message = &mut log.messages[index];
        message.apply(patch);
        Ok(message.clone())
    }

    async fn remove(&self, id: &MessageId) -> Result<(), RepositoryError> {
        let mut log = self.log.lock().await;
        let index = log.position(id)?;
        log.messages.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::time::ManualClock,
        domain::{Audience, MessageKind, MessageText},
    };
    use std::time::Duration;

    fn name(value: &str) -> ParticipantName {
        ParticipantName::new(value.to_string()).unwrap()
    }

    fn draft(from: &str, to: &str, text: &str, kind: MessageKind) -> MessageDraft {
        MessageDraft::new(
            name(from),
            Audience::new(to.to_string()).unwrap(),
            MessageText::new(text.to_string()).unwrap(),
            kind,
        )
    }

    fn create_test_repository() -> (Arc<ManualClock>, InMemoryMessageRepository) {
        let clock = Arc::new(ManualClock::new(Timestamp::new(1_000)));
        let repo = InMemoryMessageRepository::new(clock.clone());
        (clock, repo)
    }

    #[tokio::test]
    async fn test_append_assigns_id_and_time() {
        // テスト項目: append で id と time が割り当てられる
        // given (前提条件):
        let (_clock, repo) = create_test_repository();

        // when (操作):
        let stored = repo
            .append(draft("Ana", "Todos", "oi", MessageKind::Message))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(stored.time, Timestamp::new(1_000));
        assert_eq!(repo.get(&stored.id).await.unwrap(), stored);
    }

    #[tokio::test]
    async fn test_append_time_never_goes_backwards() {
        // テスト項目: 時計が戻っても time は単調非減少
        // given (前提条件):
        let (clock, repo) = create_test_repository();
        let first = repo
            .append(draft("Ana", "Todos", "1", MessageKind::Message))
            .await
            .unwrap();

        // when (操作):
        clock.set(Timestamp::new(500));
        let second = repo
            .append(draft("Ana", "Todos", "2", MessageKind::Message))
            .await
            .unwrap();

        // then (期待する結果):
        assert!(second.time >= first.time);
    }

    #[tokio::test]
    async fn test_append_batch_keeps_order() {
        // テスト項目: まとめて追加したメッセージは順序を保つ
        // given (前提条件):
        let (_clock, repo) = create_test_repository();

        // when (操作):
        let stored = repo
            .append_batch(vec![
                MessageDraft::leave_notice(name("Ana")),
                MessageDraft::leave_notice(name("Bia")),
            ])
            .await
            .unwrap();

        // then (期待する結果):
        let read = repo.read_for(&name("Caio"), None).await.unwrap();
        assert_eq!(read, stored);
        assert_eq!(read[0].from, name("Ana"));
        assert_eq!(read[1].from, name("Bia"));
    }

    #[tokio::test]
    async fn test_read_for_applies_visibility_and_limit() {
        // テスト項目: 閲覧者に見えるメッセージだけが返り、limit 指定時は新しい順
        // given (前提条件):
        let (clock, repo) = create_test_repository();
        for (from, to, text, kind) in [
            ("Ana", "Todos", "a", MessageKind::Message),
            ("Ana", "Bia", "b", MessageKind::PrivateMessage),
            ("Bia", "Todos", "c", MessageKind::Message),
        ] {
            repo.append(draft(from, to, text, kind)).await.unwrap();
            clock.advance(Duration::from_secs(1));
        }

        // when (操作):
        let caio_all = repo.read_for(&name("Caio"), None).await.unwrap();
        let bia_last_two = repo
            .read_for(&name("Bia"), NonZeroUsize::new(2))
            .await
            .unwrap();

        // then (期待する結果):
        let texts = |ms: &[Message]| ms.iter().map(|m| m.text.to_string()).collect::<Vec<_>>();
        assert_eq!(texts(&caio_all), vec!["a", "c"]);
        assert_eq!(texts(&bia_last_two), vec!["c", "b"]);
    }

    #[tokio::test]
    async fn test_update_replaces_editable_fields_only() {
        // テスト項目: update は to / text / type だけを置き換える
        // given (前提条件):
        let (clock, repo) = create_test_repository();
        let stored = repo
            .append(draft("Ana", "Todos", "oi", MessageKind::Message))
            .await
            .unwrap();
        clock.advance(Duration::from_secs(30));

        // when (操作):
        let updated = repo
            .update(
                &stored.id,
                MessagePatch {
                    to: Audience::new("Bia".to_string()).unwrap(),
                    text: MessageText::new("oi Bia".to_string()).unwrap(),
                    kind: MessageKind::PrivateMessage,
                },
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(updated.id, stored.id);
        assert_eq!(updated.from, stored.from);
        assert_eq!(updated.time, stored.time);
        assert_eq!(updated.text.as_str(), "oi Bia");
        assert_eq!(repo.get(&stored.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_remove_and_missing_message() {
        // テスト項目: 削除後は NotFound になる
        // given (前提条件):
        let (_clock, repo) = create_test_repository();
        let stored = repo
            .append(draft("Ana", "Todos", "oi", MessageKind::Message))
            .await
            .unwrap();

        // when (操作):
        repo.remove(&stored.id).await.unwrap();

        // then (期待する結果):
        let missing = RepositoryError::MessageNotFound(stored.id.to_string());
        assert_eq!(repo.get(&stored.id).await, Err(missing.clone()));
        assert_eq!(repo.remove(&stored.id).await, Err(missing));
    }
}
