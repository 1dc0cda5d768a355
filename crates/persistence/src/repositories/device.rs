//! Device repository for database operations.

use domain::models::device::{CreateDeviceRequest, UpdateDeviceRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::DeviceEntity;
use crate::metrics::QueryTimer;

const DEVICE_COLUMNS: &str = "id, owner_id, title, description, city, price_per_day_cents, \
     available_from, available_to, rules, image_url, created_at, updated_at";

/// Repository for device-related database operations.
#[derive(Clone)]
pub struct DeviceRepository {
    pool: PgPool,
}

impl DeviceRepository {
    /// Creates a new DeviceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a device listing owned by `owner_id`.
    pub async fn create(
        &self,
        owner_id: Uuid,
        request: &CreateDeviceRequest,
    ) -> Result<DeviceEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_device");
        let result = sqlx::query_as::<_, DeviceEntity>(&format!(
            r#"
            INSERT INTO devices (owner_id, title, description, city, price_per_day_cents,
                                 available_from, available_to, rules, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {DEVICE_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.city)
        .bind(request.price_per_day_cents)
        .bind(request.available_from)
        .bind(request.available_to)
        .bind(&request.rules)
        .bind(&request.image_url)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a device by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<DeviceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_device_by_id");
        let result = sqlx::query_as::<_, DeviceEntity>(&format!(
            r#"
            SELECT {DEVICE_COLUMNS}
            FROM devices
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All devices owned by the given user, newest first.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<DeviceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_devices_by_owner");
        let result = sqlx::query_as::<_, DeviceEntity>(&format!(
            r#"
            SELECT {DEVICE_COLUMNS}
            FROM devices
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All devices, for the public browse listing.
    pub async fn list_all(&self) -> Result<Vec<DeviceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_devices");
        let result = sqlx::query_as::<_, DeviceEntity>(&format!(
            r#"
            SELECT {DEVICE_COLUMNS}
            FROM devices
            ORDER BY created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partial update, scoped to the owner. Returns None when no device with
    /// that id belongs to `owner_id`.
    pub async fn update(
        &self,
        owner_id: Uuid,
        device_id: Uuid,
        request: &UpdateDeviceRequest,
    ) -> Result<Option<DeviceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_device");
        let result = sqlx::query_as::<_, DeviceEntity>(&format!(
            r#"
            UPDATE devices
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                city = COALESCE($5, city),
                price_per_day_cents = COALESCE($6, price_per_day_cents),
                available_from = COALESCE($7, available_from),
                available_to = COALESCE($8, available_to),
                rules = COALESCE($9, rules),
                image_url = COALESCE($10, image_url),
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING {DEVICE_COLUMNS}
            "#
        ))
        .bind(device_id)
        .bind(owner_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.city)
        .bind(request.price_per_day_cents)
        .bind(request.available_from)
        .bind(request.available_to)
        .bind(&request.rules)
        .bind(&request.image_url)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a device, scoped to the owner. Rental requests and their chat
    /// messages go with it via ON DELETE CASCADE.
    ///
    /// Returns the number of rows affected (0 when the device is absent or
    /// owned by someone else).
    pub async fn delete(&self, owner_id: Uuid, device_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_device");
        let result = sqlx::query(
            r#"
            DELETE FROM devices
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(device_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected());
        timer.record();
        result
    }
}
