//! Visibility and mutation rules for messages.

use std::num::NonZeroUsize;

use super::{Message, MessageKind, ParticipantName, ParticipantRepository, RepositoryError};

/// Whether `viewer` may see `message`.
///
/// The three conditions are independent and OR'd: a broadcast is visible to
/// everyone whatever its kind, a private message is visible to both of its
/// ends, and every message is visible to its own sender.
pub fn is_visible(message: &Message, viewer: &ParticipantName) -> bool {
    let to_everyone = message.to.is_broadcast();
    let private_between = message.kind == MessageKind::PrivateMessage
        && (message.from == *viewer || message.to.is_participant(viewer));
    let sent_by_viewer = message.from == *viewer;

    to_everyone || private_between || sent_by_viewer
}

/// Filter an insertion-ordered slice down to what `viewer` may see.
///
/// `None` keeps insertion order. `Some(n)` keeps the `n` most recent, newest first.
pub fn select_visible(
    messages: &[Message],
    viewer: &ParticipantName,
    limit: Option<NonZeroUsize>,
) -> Vec<Message> {
    let visible = |m: &&Message| is_visible(m, viewer);
    match limit {
        None => messages.iter().filter(visible).cloned().collect(),
        Some(n) => messages
            .iter()
            .rev()
            .filter(visible)
            .take(n.get())
            .cloned()
            .collect(),
    }
}

/// Only live participants may post.
pub async fn can_post(
    participants: &dyn ParticipantRepository,
    sender: &ParticipantName,
) -> Result<bool, RepositoryError> {
    participants.contains(sender).await
}

/// Only the original sender may edit or delete a message.
pub fn can_mutate(message: &Message, requester: &ParticipantName) -> bool {
    message.from == *requester
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Audience, MessageDraft, MessageIdFactory, MessageText, Timestamp};

    fn name(value: &str) -> ParticipantName {
        ParticipantName::new(value.to_string()).unwrap()
    }

    fn message(from: &str, to: &str, kind: MessageKind, time: i64) -> Message {
        MessageDraft::new(
            name(from),
            Audience::new(to.to_string()).unwrap(),
            MessageText::new("oi".to_string()).unwrap(),
            kind,
        )
        .into_message(MessageIdFactory::generate(), Timestamp::new(time))
    }

    #[test]
    fn test_broadcast_is_visible_to_everyone() {
        // テスト項目: 全員宛てのメッセージは種別に関係なく誰にでも見える
        // given (前提条件):
        let public = message("Ana", "Todos", MessageKind::Message, 1);
        let private_to_all = message("Ana", "Todos", MessageKind::PrivateMessage, 2);
        let status = message("Ana", "Todos", MessageKind::Status, 3);

        // then (期待する結果):
        for m in [&public, &private_to_all, &status] {
            assert!(is_visible(m, &name("Caio")));
        }
    }

    #[test]
    fn test_private_message_visible_only_to_its_ends() {
        // テスト項目: private_message は送信者と宛先にだけ見える
        // given (前提条件):
        let private = message("Ana", "Bia", MessageKind::PrivateMessage, 1);

        // then (期待する結果):
        assert!(is_visible(&private, &name("Ana")));
        assert!(is_visible(&private, &name("Bia")));
        assert!(!is_visible(&private, &name("Caio")));
    }

    #[test]
    fn test_targeted_plain_message_is_not_visible_to_target() {
        // テスト項目: 特定宛ての通常メッセージは宛先には見えず送信者にだけ見える
        // given (前提条件):
        let targeted = message("Ana", "Bia", MessageKind::Message, 1);

        // then (期待する結果):
        assert!(is_visible(&targeted, &name("Ana")));
        assert!(!is_visible(&targeted, &name("Bia")));
        assert!(!is_visible(&targeted, &name("Caio")));
    }

    #[test]
    fn test_select_visible_without_limit_keeps_insertion_order() {
        // テスト項目: 件数指定なしでは挿入順 (昇順) で返される
        // given (前提条件):
        let log = vec![
            message("Ana", "Todos", MessageKind::Message, 1),
            message("Ana", "Bia", MessageKind::PrivateMessage, 2),
            message("Bia", "Todos", MessageKind::Message, 3),
        ];

        // when (操作):
        let seen = select_visible(&log, &name("Caio"), None);

        // then (期待する結果):
        let times: Vec<i64> = seen.iter().map(|m| m.time.value()).collect();
        assert_eq!(times, vec![1, 3]);
    }

    #[test]
    fn test_select_visible_with_limit_is_newest_first() {
        // テスト項目: 件数指定ありでは新しい順に指定件数だけ返される
        // given (前提条件):
        let log = vec![
            message("Ana", "Todos", MessageKind::Message, 1),
            message("Ana", "Todos", MessageKind::Message, 2),
            message("Ana", "Bia", MessageKind::PrivateMessage, 3),
            message("Ana", "Todos", MessageKind::Message, 4),
        ];

        // when (操作):
        let seen = select_visible(&log, &name("Caio"), NonZeroUsize::new(2));

        // then (期待する結果): Caio には見えない 3 は数に含まれない
        let times: Vec<i64> = seen.iter().map(|m| m.time.value()).collect();
        assert_eq!(times, vec![4, 2]);
    }

    #[test]
    fn test_can_mutate_only_sender() {
        // テスト項目: 編集・削除できるのは送信者本人だけ (宛先も不可)
        // given (前提条件):
        let private = message("Ana", "Bia", MessageKind::PrivateMessage, 1);

        // then (期待する結果):
        assert!(can_mutate(&private, &name("Ana")));
        assert!(!can_mutate(&private, &name("Bia")));
        assert!(!can_mutate(&private, &name("Caio")));
    }

    #[tokio::test]
    async fn test_can_post_requires_live_participant() {
        // テスト項目: 登録中の参加者だけが投稿できる
        // given (前提条件):
        let mut participants = crate::domain::MockParticipantRepository::new();
        participants
            .expect_contains()
            .returning(|n| Ok(n.as_str() == "Ana"));

        // then (期待する結果):
        assert_eq!(can_post(&participants, &name("Ana")).await, Ok(true));
        assert_eq!(can_post(&participants, &name("Caio")).await, Ok(false));
    }
}
