//! Rental request entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::rental_request::{DeviceInfo, ManagedRequestItem, RentalListItem, RenterInfo};
use domain::models::RequestStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database-side approval status, mapped to the `request_status` enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
pub enum RequestStatusDb {
    Pending,
    Approved,
    Rejected,
}

impl From<RequestStatusDb> for RequestStatus {
    fn from(status: RequestStatusDb) -> Self {
        match status {
            RequestStatusDb::Pending => RequestStatus::Pending,
            RequestStatusDb::Approved => RequestStatus::Approved,
            RequestStatusDb::Rejected => RequestStatus::Rejected,
        }
    }
}

impl From<RequestStatus> for RequestStatusDb {
    fn from(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Pending => RequestStatusDb::Pending,
            RequestStatus::Approved => RequestStatusDb::Approved,
            RequestStatus::Rejected => RequestStatusDb::Rejected,
        }
    }
}

/// Database row mapping for the rental_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct RentalRequestEntity {
    pub id: Uuid,
    pub device_id: Uuid,
    pub renter_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: RequestStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RentalRequestEntity> for domain::models::RentalRequest {
    fn from(entity: RentalRequestEntity) -> Self {
        Self {
            id: entity.id,
            device_id: entity.device_id,
            renter_id: entity.renter_id,
            start_date: entity.start_date,
            end_date: entity.end_date,
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Row mapping for a renter's request joined with its device.
#[derive(Debug, Clone, FromRow)]
pub struct RentalWithDeviceEntity {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: RequestStatusDb,
    pub created_at: DateTime<Utc>,
    pub device_id: Uuid,
    pub device_title: String,
    pub device_city: String,
    pub price_per_day_cents: i64,
}

impl From<RentalWithDeviceEntity> for RentalListItem {
    fn from(entity: RentalWithDeviceEntity) -> Self {
        Self {
            id: entity.id,
            device: DeviceInfo {
                id: entity.device_id,
                title: entity.device_title,
                city: entity.device_city,
                price_per_day_cents: entity.price_per_day_cents,
            },
            start_date: entity.start_date,
            end_date: entity.end_date,
            status: entity.status.into(),
            created_at: entity.created_at,
        }
    }
}

/// Row mapping for an owner-side request joined with device and renter.
#[derive(Debug, Clone, FromRow)]
pub struct ManagedRequestEntity {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: RequestStatusDb,
    pub created_at: DateTime<Utc>,
    pub device_id: Uuid,
    pub device_title: String,
    pub device_city: String,
    pub price_per_day_cents: i64,
    pub renter_id: Uuid,
    pub renter_display_name: String,
}

impl From<ManagedRequestEntity> for ManagedRequestItem {
    fn from(entity: ManagedRequestEntity) -> Self {
        Self {
            id: entity.id,
            device: DeviceInfo {
                id: entity.device_id,
                title: entity.device_title,
                city: entity.device_city,
                price_per_day_cents: entity.price_per_day_cents,
            },
            renter: RenterInfo {
                id: entity.renter_id,
                display_name: entity.renter_display_name,
            },
            start_date: entity.start_date,
            end_date: entity.end_date,
            status: entity.status.into(),
            created_at: entity.created_at,
        }
    }
}
