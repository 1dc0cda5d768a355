//! Refresh session entity (database row mapping).
//!
//! Sessions stand in for the token blacklist: a refresh token is valid only
//! while its session row is unrevoked and unexpired.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the user_sessions table.
#[derive(Debug, Clone, FromRow)]
pub struct SessionEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub refresh_token_hash: String,
    pub revoked: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl SessionEntity {
    /// True when the session can still mint new access tokens.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(revoked: bool, expires_in_secs: i64) -> SessionEntity {
        SessionEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            refresh_token_hash: "abc".to_string(),
            revoked,
            expires_at: Utc::now() + Duration::seconds(expires_in_secs),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_live_session() {
        assert!(session(false, 3600).is_live(Utc::now()));
    }

    #[test]
    fn test_revoked_session_is_dead() {
        assert!(!session(true, 3600).is_live(Utc::now()));
    }

    #[test]
    fn test_expired_session_is_dead() {
        assert!(!session(false, -1).is_live(Utc::now()));
    }
}
