//! Chat message repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ChatMessageEntity, ChatParticipants};
use crate::metrics::QueryTimer;

const MESSAGE_COLUMNS: &str = "id, request_id, sender_id, message, image_url, seq, created_at";

/// Repository for chat-message database operations.
#[derive(Clone)]
pub struct ChatMessageRepository {
    pool: PgPool,
}

impl ChatMessageRepository {
    /// Creates a new ChatMessageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The renter and device owner of a rental request, or None when the
    /// request does not exist.
    pub async fn find_participants(
        &self,
        request_id: Uuid,
    ) -> Result<Option<ChatParticipants>, sqlx::Error> {
        let timer = QueryTimer::new("find_chat_participants");
        let result = sqlx::query_as::<_, ChatParticipants>(
            r#"
            SELECT rr.renter_id, d.owner_id
            FROM rental_requests rr
            JOIN devices d ON rr.device_id = d.id
            WHERE rr.id = $1
            "#,
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All messages of a channel in creation order, insertion sequence as the
    /// tie-break.
    pub async fn list_for_request(
        &self,
        request_id: Uuid,
    ) -> Result<Vec<ChatMessageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_chat_messages");
        let result = sqlx::query_as::<_, ChatMessageEntity>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM chat_messages
            WHERE request_id = $1
            ORDER BY created_at ASC, seq ASC
            "#
        ))
        .bind(request_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Append a message. The timestamp and sequence are server-assigned.
    pub async fn insert(
        &self,
        request_id: Uuid,
        sender_id: Uuid,
        message: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<ChatMessageEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_chat_message");
        let result = sqlx::query_as::<_, ChatMessageEntity>(&format!(
            r#"
            INSERT INTO chat_messages (request_id, sender_id, message, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(request_id)
        .bind(sender_id)
        .bind(message)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
