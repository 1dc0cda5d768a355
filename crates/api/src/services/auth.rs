//! Authentication service for user registration, login, and token management.
//!
//! The refresh-session store is the revocation list: logout revokes the
//! session row, refresh rotates it. Access tokens stay valid until they
//! expire, so revocation affects subsequent refreshes, never in-flight
//! requests.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use domain::models::User;
use persistence::repositories::{SessionRepository, UserRepository};
use shared::crypto::sha256_hex;
use shared::jwt::{JwtConfig, JwtError};
use shared::password::{hash_password, verify_password, PasswordError};

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User is disabled")]
    UserDisabled,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Result of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of a successful token refresh.
#[derive(Debug, Clone)]
pub struct RefreshResult {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication service.
pub struct AuthService {
    users: UserRepository,
    sessions: SessionRepository,
    jwt: Arc<JwtConfig>,
}

impl AuthService {
    /// Creates a new AuthService over the given pool and JWT configuration.
    pub fn new(pool: PgPool, jwt: Arc<JwtConfig>) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool),
            jwt,
        }
    }

    /// Register a new user and issue a token pair.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<AuthResult, AuthError> {
        let email = normalize_email(email);
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .insert(&email, &password_hash, display_name)
            .await
            .map_err(|e| match unique_violation(&e) {
                true => AuthError::EmailAlreadyExists,
                false => AuthError::DatabaseError(e),
            })?;

        let user: User = user.into();
        let (access_token, refresh_token) = self.issue_tokens(user.id).await?;

        Ok(AuthResult {
            user,
            access_token,
            refresh_token,
        })
    }

    /// Verify credentials and issue a token pair.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        let email = normalize_email(email);

        let Some(entity) = self.users.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &entity.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        if !entity.is_active {
            return Err(AuthError::UserDisabled);
        }

        let user: User = entity.into();
        let (access_token, refresh_token) = self.issue_tokens(user.id).await?;

        Ok(AuthResult {
            user,
            access_token,
            refresh_token,
        })
    }

    /// Rotate a refresh token: validate it, revoke its session, issue a new
    /// pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResult, AuthError> {
        let claims = self
            .jwt
            .validate_refresh_token(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidRefreshToken)?;

        let token_hash = sha256_hex(refresh_token);
        let Some(session) = self.sessions.find_live_by_hash(&token_hash).await? else {
            return Err(AuthError::InvalidRefreshToken);
        };

        if session.user_id != user_id || !session.is_live(Utc::now()) {
            return Err(AuthError::InvalidRefreshToken);
        }

        self.sessions.revoke_by_hash(&token_hash).await?;
        let (access_token, refresh_token) = self.issue_tokens(user_id).await?;

        Ok(RefreshResult {
            access_token,
            refresh_token,
        })
    }

    /// Revoke the session behind a refresh token.
    ///
    /// Subsequent refresh calls with the token fail; the matching access
    /// token keeps working until its own expiry.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.jwt
            .validate_refresh_token(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        let token_hash = sha256_hex(refresh_token);
        let revoked = self.sessions.revoke_by_hash(&token_hash).await?;
        if revoked == 0 {
            return Err(AuthError::InvalidRefreshToken);
        }
        Ok(())
    }

    /// Fetch the caller's own profile.
    pub async fn profile(&self, user_id: Uuid) -> Result<Option<User>, AuthError> {
        Ok(self.users.find_by_id(user_id).await?.map(Into::into))
    }

    async fn issue_tokens(&self, user_id: Uuid) -> Result<(String, String), AuthError> {
        let (access_token, _) = self.jwt.generate_access_token(user_id)?;
        let (refresh_token, _) = self.jwt.generate_refresh_token(user_id)?;

        let expires_at = Utc::now() + Duration::seconds(self.jwt.refresh_token_expiry_secs);
        self.sessions
            .insert(user_id, &sha256_hex(&refresh_token), expires_at)
            .await?;

        Ok((access_token, refresh_token))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alex@Example.COM "), "alex@example.com");
        assert_eq!(normalize_email("alex@example.com"), "alex@example.com");
    }

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthError::EmailAlreadyExists.to_string(),
            "Email already registered"
        );
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
        assert_eq!(
            AuthError::InvalidRefreshToken.to_string(),
            "Invalid refresh token"
        );
    }

    #[test]
    fn test_unique_violation_ignores_other_errors() {
        assert!(!unique_violation(&sqlx::Error::RowNotFound));
    }
}
