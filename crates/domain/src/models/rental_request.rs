//! Rental request domain models for the booking workflow.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Approval state of a rental request.
///
/// `PENDING -> APPROVED` or `PENDING -> REJECTED`. Terminal states are
/// re-enterable: the owner may repeat or flip a decision, and an approve
/// re-runs the conflict check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "approved" => Ok(RequestStatus::Approved),
            "rejected" => Ok(RequestStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// Owner decision on a rental request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecideAction {
    Approve,
    Reject,
}

impl DecideAction {
    /// Status the request ends up in when the decision commits.
    pub fn resulting_status(&self) -> RequestStatus {
        match self {
            DecideAction::Approve => RequestStatus::Approved,
            DecideAction::Reject => RequestStatus::Rejected,
        }
    }
}

impl FromStr for DecideAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(DecideAction::Approve),
            "reject" => Ok(DecideAction::Reject),
            _ => Err(()),
        }
    }
}

/// A rental request against a device, with a half-open booking window
/// `[start_date, end_date)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RentalRequest {
    pub id: Uuid,
    pub device_id: Uuid,
    pub renter_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a rental request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateRentalRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Brief device info embedded in rental listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DeviceInfo {
    pub id: Uuid,
    pub title: String,
    pub city: String,
    pub price_per_day_cents: i64,
}

/// Brief user info embedded in managed-request listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RenterInfo {
    pub id: Uuid,
    pub display_name: String,
}

/// A renter's own request, with the device it targets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RentalListItem {
    pub id: Uuid,
    pub device: DeviceInfo,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// A request against one of the caller's devices, with the renter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ManagedRequestItem {
    pub id: Uuid,
    pub device: DeviceInfo,
    pub renter: RenterInfo,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}
