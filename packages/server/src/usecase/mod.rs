//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod delete_message;
pub mod edit_message;
pub mod error;
pub mod heartbeat;
pub mod join_participant;
pub mod list_participants;
pub mod post_message;
pub mod read_messages;

#[cfg(test)]
pub(crate) mod fixtures;

pub use delete_message::DeleteMessageUseCase;
pub use edit_message::EditMessageUseCase;
pub use error::UseCaseError;
pub use heartbeat::HeartbeatUseCase;
pub use join_participant::JoinParticipantUseCase;
pub use list_participants::ListParticipantsUseCase;
pub use post_message::PostMessageUseCase;
pub use read_messages::ReadMessagesUseCase;
