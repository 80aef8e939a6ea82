//! Shared application state.

use std::sync::Arc;

use crate::{
    common::time::Clock,
    domain::{MessageRepository, ParticipantRepository},
};

/// Store handles and clock, constructed once at startup and shared by every handler
pub struct AppState {
    /// Repository（参加者ストアの抽象化）
    pub participants: Arc<dyn ParticipantRepository>,
    /// Repository（メッセージログの抽象化）
    pub messages: Arc<dyn MessageRepository>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
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
}
