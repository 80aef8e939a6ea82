//! UseCase: メッセージ投稿処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PostMessageUseCase::execute() メソッド
//! - 投稿権限 (在室中の参加者のみ) と入力検証
//!
//! ### どのような状況を想定しているか
//! - 正常系：在室中の参加者による投稿
//! - 異常系：未登録・退室済みの送信者、不正な種別

use std::sync::Arc;

use crate::domain::{
    Message, MessageRepository, ParticipantRepository, policy,
    validation::{self, MessageInput},
};

use super::error::UseCaseError;

/// メッセージ投稿のユースケース
pub struct PostMessageUseCase {
    participants: Arc<dyn ParticipantRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl PostMessageUseCase {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            participants,
            messages,
        }
    }

    /// メッセージ投稿を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - 保存されたメッセージ (id / time 付き)
    /// * `Err(UseCaseError)` - `ValidationFailed` / `Unauthorized` / `Infrastructure`
    pub async fn execute(
        &self,
        from: Option<&str>,
        input: &MessageInput,
    ) -> Result<Message, UseCaseError> {
        let draft = validation::validate_message(from, input)?;

        if !policy::can_post(self.participants.as_ref(), &draft.from).await? {
            tracing::warn!("Rejected message from unregistered sender '{}'", draft.from);
            return Err(UseCaseError::Unauthorized(format!(
                "{} is not a participant",
                draft.from
            )));
        }

        Ok(self.messages.append(draft).await?)
    }
}
