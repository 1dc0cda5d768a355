//! Device listing domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A device listed for rent.
///
/// Prices are fixed-point: cents, two implied decimals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Device {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub city: String,
    pub price_per_day_cents: i64,
    pub available_from: NaiveDate,
    pub available_to: NaiveDate,
    pub rules: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a device listing.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateDeviceRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    #[validate(custom(function = "shared::validation::validate_non_blank"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 100, message = "City must be 1-100 characters"))]
    pub city: String,

    #[validate(range(min = 0, message = "Price per day must be non-negative"))]
    pub price_per_day_cents: i64,

    pub available_from: NaiveDate,
    pub available_to: NaiveDate,

    #[serde(default)]
    pub rules: String,

    /// Reference into the external blob store; the backend never touches bytes.
    pub image_url: Option<String>,
}

impl CreateDeviceRequest {
    /// Cross-field check the derive cannot express.
    pub fn validate_window(&self) -> Result<(), validator::ValidationError> {
        shared::validation::validate_availability_window(self.available_from, self.available_to)
    }
}

/// Request payload for updating a device listing. All fields optional;
/// omitted fields are left unchanged.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateDeviceRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100, message = "City must be 1-100 characters"))]
    pub city: Option<String>,

    #[validate(range(min = 0, message = "Price per day must be non-negative"))]
    pub price_per_day_cents: Option<i64>,
    pub available_from: Option<NaiveDate>,
    pub available_to: Option<NaiveDate>,
    pub rules: Option<String>,
    pub image_url: Option<String>,
}

/// Device detail annotated with whether the caller owns it.
///
/// The flag is informational; reads are never restricted by ownership.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DeviceDetailResponse {
    #[serde(flatten)]
    pub device: Device,
    pub is_owner: bool,
}

/// Device summary for browse listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DeviceSummary {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub city: String,
    pub price_per_day_cents: i64,
    pub available_from: NaiveDate,
    pub available_to: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<Device> for DeviceSummary {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            owner_id: device.owner_id,
            title: device.title,
            city: device.city,
            price_per_day_cents: device.price_per_day_cents,
            available_from: device.available_from,
            available_to: device.available_to,
            image_url: device.image_url,
        }
    }
}
