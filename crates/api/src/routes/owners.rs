//! Owner public profile endpoint.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;
use domain::models::device::DeviceSummary;
use domain::models::user::PublicUser;
use domain::models::Device;
use persistence::repositories::{DeviceRepository, UserRepository};

/// Public subset of an owner plus their listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OwnerProfileResponse {
    pub owner: PublicUser,
    pub devices: Vec<DeviceSummary>,
}

/// An owner's public profile and listings.
///
/// GET /api/v1/owners/:owner_id
pub async fn owner_profile(
    State(state): State<AppState>,
    Extension(_auth): Extension<UserAuth>,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<OwnerProfileResponse>, ApiError> {
    let users = UserRepository::new(state.pool.clone());
    let owner = users
        .find_by_id(owner_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Owner not found".to_string()))?;

    let devices = DeviceRepository::new(state.pool.clone())
        .list_by_owner(owner_id)
        .await?;

    Ok(Json(OwnerProfileResponse {
        owner: domain::models::User::from(owner).into(),
        devices: devices
            .into_iter()
            .map(|d| Device::from(d).into())
            .collect(),
    }))
}
