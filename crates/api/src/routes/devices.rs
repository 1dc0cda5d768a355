//! Device registry endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;
use domain::models::device::{
    CreateDeviceRequest, DeviceDetailResponse, DeviceSummary, UpdateDeviceRequest,
};
use domain::models::Device;
use persistence::repositories::DeviceRepository;

/// Create a device listing owned by the caller.
///
/// POST /api/v1/devices
pub async fn create_device(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Json(request): Json<CreateDeviceRequest>,
) -> Result<(StatusCode, Json<Device>), ApiError> {
    request.validate()?;
    request
        .validate_window()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let repo = DeviceRepository::new(state.pool.clone());
    let device = repo.create(auth.user_id, &request).await?;

    Ok((StatusCode::CREATED, Json(device.into())))
}

/// The caller's own device listings.
///
/// GET /api/v1/devices
pub async fn list_own_devices(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
) -> Result<Json<Vec<Device>>, ApiError> {
    let repo = DeviceRepository::new(state.pool.clone());
    let devices = repo.list_by_owner(auth.user_id).await?;

    Ok(Json(devices.into_iter().map(Into::into).collect()))
}

/// All listings, for public browsing. No authentication.
///
/// GET /api/v1/public-devices
pub async fn list_public_devices(
    State(state): State<AppState>,
) -> Result<Json<Vec<DeviceSummary>>, ApiError> {
    let repo = DeviceRepository::new(state.pool.clone());
    let devices = repo.list_all().await?;

    Ok(Json(
        devices
            .into_iter()
            .map(|d| Device::from(d).into())
            .collect(),
    ))
}

/// Device detail, annotated with whether the caller owns it. Reads are never
/// restricted by ownership.
///
/// GET /api/v1/devices/:device_id
pub async fn get_device(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(device_id): Path<Uuid>,
) -> Result<Json<DeviceDetailResponse>, ApiError> {
    let repo = DeviceRepository::new(state.pool.clone());
    let device = repo
        .find_by_id(device_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Device not found".to_string()))?;

    let device: Device = device.into();
    let is_owner = device.owner_id == auth.user_id;

    Ok(Json(DeviceDetailResponse { device, is_owner }))
}

/// Partial update of a listing. Owner only; non-owners see NotFound.
///
/// PUT /api/v1/devices/:device_id
pub async fn update_device(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(device_id): Path<Uuid>,
    Json(request): Json<UpdateDeviceRequest>,
) -> Result<Json<Device>, ApiError> {
    request.validate()?;
    if let (Some(from), Some(to)) = (request.available_from, request.available_to) {
        shared::validation::validate_availability_window(from, to)
            .map_err(|e| ApiError::Validation(e.to_string()))?;
    }

    let repo = DeviceRepository::new(state.pool.clone());
    let device = repo
        .update(auth.user_id, device_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Device not found".to_string()))?;

    Ok(Json(device.into()))
}

/// Delete a listing. Owner only; rental requests and chat messages cascade.
///
/// DELETE /api/v1/devices/:device_id
pub async fn delete_device(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(device_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = DeviceRepository::new(state.pool.clone());
    let deleted = repo.delete(auth.user_id, device_id).await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Device not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
