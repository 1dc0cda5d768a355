//! Refresh session repository for database operations.
//!
//! This is the revocation list behind logout: refresh tokens are stored as
//! SHA-256 digests and flipped to revoked instead of deleted, so a replayed
//! token stays dead.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SessionEntity;
use crate::metrics::QueryTimer;

/// Repository for refresh-session database operations.
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Creates a new SessionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a freshly issued refresh token.
    pub async fn insert(
        &self,
        user_id: Uuid,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<SessionEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_session");
        let result = sqlx::query_as::<_, SessionEntity>(
            r#"
            INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, refresh_token_hash, revoked, expires_at, created_at
            "#,
        )
        .bind(user_id)
        .bind(refresh_token_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a live (unrevoked, unexpired) session by token digest.
    pub async fn find_live_by_hash(
        &self,
        refresh_token_hash: &str,
    ) -> Result<Option<SessionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_live_session");
        let result = sqlx::query_as::<_, SessionEntity>(
            r#"
            SELECT id, user_id, refresh_token_hash, revoked, expires_at, created_at
            FROM user_sessions
            WHERE refresh_token_hash = $1 AND revoked = false AND expires_at > NOW()
            "#,
        )
        .bind(refresh_token_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Revoke the session holding the given token digest.
    ///
    /// Returns the number of rows affected (0 if no live session matched).
    pub async fn revoke_by_hash(&self, refresh_token_hash: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("revoke_session");
        let result = sqlx::query(
            r#"
            UPDATE user_sessions
            SET revoked = true
            WHERE refresh_token_hash = $1 AND revoked = false
            "#,
        )
        .bind(refresh_token_hash)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected());
        timer.record();
        result
    }

    /// Drop sessions that expired more than the retention window ago.
    pub async fn purge_expired(&self) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("purge_expired_sessions");
        let result = sqlx::query(
            r#"
            DELETE FROM user_sessions
            WHERE expires_at < NOW() - INTERVAL '30 days'
            "#,
        )
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected());
        timer.record();
        result
    }
}
