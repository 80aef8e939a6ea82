//! UseCase: 参加者の入室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinParticipantUseCase::execute() メソッド
//! - 参加者登録と入室通知 (status メッセージ) の追加
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の入室
//! - 異常系：同名の参加者が既に存在する / 名前が不正 / ストア障害

use std::sync::Arc;

use crate::{
    common::time::Clock,
    domain::{
        MessageDraft, MessageRepository, Participant, ParticipantRepository, validation,
    },
};

use super::error::UseCaseError;

/// 入室のユースケース (registerAndAnnounce)
///
/// Registration and the join notice are two separate store writes. If the
/// second one fails the participant stays registered without a notice.
pub struct JoinParticipantUseCase {
    participants: Arc<dyn ParticipantRepository>,
    messages: Arc<dyn MessageRepository>,
    clock: Arc<dyn Clock>,
}

impl JoinParticipantUseCase {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        messages: Arc<dyn MessageRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            participants,
            messages,
            clock,
        }
    }

    /// 入室を実行
    ///
    /// # Arguments
    ///
    /// * `raw_name` - クライアントから受け取った未検証の名前
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 登録された参加者
    /// * `Err(UseCaseError)` - `ValidationFailed` / `NameTaken` / `Infrastructure`
    pub async fn execute(&self, raw_name: Option<&str>) -> Result<Participant, UseCaseError> {
        let name = validation::validate_name(raw_name)?;

        // 1. 参加者を登録（同名が存在すれば NameTaken）
        let participant = Participant::new(name.clone(), self.clock.now());
        self.participants.join(participant.clone()).await?;

        // 2. 入室通知を追加
        self.messages.append(MessageDraft::join_notice(name)).await?;

        tracing::info!("Participant '{}' joined", participant.name);
        Ok(participant)
    }
}
