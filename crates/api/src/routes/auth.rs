//! Authentication routes: registration, login, token refresh, logout,
//! profile.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Serialize;
use serde_json::json;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;
use crate::services::auth::{AuthError, AuthService};
use domain::models::user::{
    LoginRequest, LogoutRequest, ProfileResponse, RefreshRequest, RegisterRequest,
    TokenPairResponse,
};

/// Response body for successful registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegisterResponse {
    pub user: ProfileResponse,
    pub tokens: TokenPairResponse,
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailAlreadyExists => {
                ApiError::Conflict("Email already registered".to_string())
            }
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::UserDisabled => ApiError::Forbidden("Account is disabled".to_string()),
            AuthError::InvalidRefreshToken => {
                ApiError::Unauthorized("Invalid or expired refresh token".to_string())
            }
            AuthError::DatabaseError(db_err) => ApiError::from(db_err),
            AuthError::PasswordError(e) => ApiError::Internal(format!("Password error: {}", e)),
            AuthError::TokenError(e) => ApiError::Internal(format!("Token error: {}", e)),
        }
    }
}

/// Register a new user with email and password.
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    request.validate()?;

    let auth_service = AuthService::new(state.pool.clone(), state.jwt.clone());
    let result = auth_service
        .register(&request.email, &request.password, &request.display_name)
        .await?;

    let response = RegisterResponse {
        user: result.user.into(),
        tokens: TokenPairResponse {
            access: result.access_token,
            refresh: result.refresh_token,
        },
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Authenticate with email and password.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    request.validate()?;

    let auth_service = AuthService::new(state.pool.clone(), state.jwt.clone());
    let result = auth_service.login(&request.email, &request.password).await?;

    Ok(Json(TokenPairResponse {
        access: result.access_token,
        refresh: result.refresh_token,
    }))
}

/// Rotate a refresh token into a new token pair.
///
/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let auth_service = AuthService::new(state.pool.clone(), state.jwt.clone());
    let result = auth_service.refresh(&request.refresh).await?;

    Ok(Json(TokenPairResponse {
        access: result.access_token,
        refresh: result.refresh_token,
    }))
}

/// Revoke the caller's refresh token.
///
/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(_auth): Extension<UserAuth>,
    Json(request): Json<LogoutRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let auth_service = AuthService::new(state.pool.clone(), state.jwt.clone());
    auth_service.logout(&request.refresh).await?;

    Ok(Json(json!({ "detail": "Logged out successfully." })))
}

/// The caller's own profile.
///
/// GET /api/v1/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let auth_service = AuthService::new(state.pool.clone(), state.jwt.clone());
    let user = auth_service
        .profile(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_maps_to_conflict() {
        let error: ApiError = AuthError::EmailAlreadyExists.into();
        assert!(matches!(error, ApiError::Conflict(_)));
    }

    #[test]
    fn test_auth_error_maps_to_unauthorized() {
        let error: ApiError = AuthError::InvalidCredentials.into();
        assert!(matches!(error, ApiError::Unauthorized(_)));

        let error: ApiError = AuthError::InvalidRefreshToken.into();
        assert!(matches!(error, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_register_request_validation() {
        let request = RegisterRequest {
            email: "renter@example.com".to_string(),
            password: "correct-horse-battery".to_string(),
            display_name: "Renter".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_invalid_email() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "correct-horse-battery".to_string(),
            display_name: "Renter".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
