//! Chat message entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the chat_messages table.
///
/// `seq` is the insertion sequence used to tie-break equal timestamps within
/// a channel; it never leaves the persistence layer.
#[derive(Debug, Clone, FromRow)]
pub struct ChatMessageEntity {
    pub id: Uuid,
    pub request_id: Uuid,
    pub sender_id: Uuid,
    pub message: Option<String>,
    pub image_url: Option<String>,
    pub seq: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessageEntity> for domain::models::ChatMessage {
    fn from(entity: ChatMessageEntity) -> Self {
        Self {
            id: entity.id,
            request_id: entity.request_id,
            sender_id: entity.sender_id,
            message: entity.message,
            image_url: entity.image_url,
            created_at: entity.created_at,
        }
    }
}

/// The two identities entitled to a rental request's chat.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ChatParticipants {
    pub renter_id: Uuid,
    pub owner_id: Uuid,
}

impl ChatParticipants {
    /// True when the given user may read and post in the channel.
    pub fn includes(&self, user_id: Uuid) -> bool {
        self.renter_id == user_id || self.owner_id == user_id
    }
}
