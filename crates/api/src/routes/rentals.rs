//! Booking engine endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_booking_decision;
use crate::middleware::UserAuth;
use domain::models::rental_request::{CreateRentalRequest, ManagedRequestItem, RentalListItem};
use domain::models::{DecideAction, RentalRequest};
use domain::services::booking;
use persistence::repositories::{BookingError, RentalRequestRepository};

/// Create a rental request for `[start_date, end_date)` on a device.
///
/// POST /api/v1/rent/:device_id
pub async fn create_rental_request(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(device_id): Path<Uuid>,
    Json(request): Json<CreateRentalRequest>,
) -> Result<(StatusCode, Json<RentalRequest>), ApiError> {
    if !booking::is_valid_window(request.start_date, request.end_date) {
        return Err(ApiError::InvalidRange(
            "start_date must be before end_date".to_string(),
        ));
    }

    let repo = RentalRequestRepository::new(state.pool.clone());
    let created = repo
        .create_pending(device_id, auth.user_id, request.start_date, request.end_date)
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Requests the caller created, newest first.
///
/// GET /api/v1/my-rentals
pub async fn list_my_rentals(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
) -> Result<Json<Vec<RentalListItem>>, ApiError> {
    let repo = RentalRequestRepository::new(state.pool.clone());
    let rentals = repo.list_by_renter(auth.user_id).await?;

    Ok(Json(rentals.into_iter().map(Into::into).collect()))
}

/// Requests targeting the caller's devices, newest first.
///
/// GET /api/v1/manage-requests
pub async fn list_managed_requests(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
) -> Result<Json<Vec<ManagedRequestItem>>, ApiError> {
    let repo = RentalRequestRepository::new(state.pool.clone());
    let requests = repo.list_by_owner(auth.user_id).await?;

    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

/// Approve or reject a rental request.
///
/// Ownership is folded into existence: deciding on a request whose device the
/// caller does not own yields the same NotFound as an unknown id. An approve
/// that loses the overlap race yields Conflict and leaves the request as it
/// was.
///
/// POST /api/v1/manage-requests/:request_id/:action
pub async fn decide_request(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path((request_id, action)): Path<(Uuid, String)>,
) -> Result<Json<RentalRequest>, ApiError> {
    let action: DecideAction = action.parse().map_err(|_| {
        ApiError::InvalidAction(format!(
            "Unknown action '{}'; expected 'approve' or 'reject'",
            action
        ))
    })?;

    let repo = RentalRequestRepository::new(state.pool.clone());
    let decided = repo
        .decide(request_id, auth.user_id, action.resulting_status().into())
        .await
        .map_err(|e| {
            if matches!(e, BookingError::Overlap) {
                record_booking_decision("conflict");
            }
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Rental request not found".to_string()))?;

    record_booking_decision(match action {
        DecideAction::Approve => "approved",
        DecideAction::Reject => "rejected",
    });

    Ok(Json(decided.into()))
}
