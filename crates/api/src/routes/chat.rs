//! Chat channel endpoint handlers.
//!
//! A channel is scoped to one rental request and visible only to its two
//! participants. Unlike the rental-decision endpoints, non-participants get
//! an explicit Forbidden here rather than a folded NotFound.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;
use domain::models::chat_message::{ChatMessageResponse, PostMessageRequest};
use persistence::entities::ChatParticipants;
use persistence::repositories::ChatMessageRepository;

/// All messages of the request's channel, oldest first.
///
/// GET /api/v1/requests/:request_id/chat
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(request_id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessageResponse>>, ApiError> {
    let repo = ChatMessageRepository::new(state.pool.clone());
    authorize_participant(&repo, request_id, auth.user_id).await?;

    let messages = repo.list_for_request(request_id).await?;

    Ok(Json(
        messages
            .into_iter()
            .map(|m| ChatMessageResponse::for_caller(m.into(), auth.user_id))
            .collect(),
    ))
}

/// Append a message to the request's channel.
///
/// POST /api/v1/requests/:request_id/chat
pub async fn post_message(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(request_id): Path<Uuid>,
    Json(request): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessageResponse>), ApiError> {
    let repo = ChatMessageRepository::new(state.pool.clone());
    authorize_participant(&repo, request_id, auth.user_id).await?;

    if request.is_empty() {
        return Err(ApiError::InvalidInput(
            "A message needs text or an image".to_string(),
        ));
    }

    let message = repo
        .insert(
            request_id,
            auth.user_id,
            request.message.as_deref().map(str::trim).filter(|m| !m.is_empty()),
            request
                .image_url
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty()),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ChatMessageResponse::for_caller(message.into(), auth.user_id)),
    ))
}

/// NotFound when the request is absent, Forbidden when the caller is neither
/// renter nor owner.
async fn authorize_participant(
    repo: &ChatMessageRepository,
    request_id: Uuid,
    user_id: Uuid,
) -> Result<ChatParticipants, ApiError> {
    let participants = repo
        .find_participants(request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Rental request not found".to_string()))?;

    if !participants.includes(user_id) {
        return Err(ApiError::Forbidden(
            "Only the renter and the device owner may access this chat".to_string(),
        ));
    }

    Ok(participants)
}
