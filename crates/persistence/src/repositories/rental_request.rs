//! Rental request repository: the booking engine's storage core.
//!
//! The overlap check and the write it guards always run in one transaction
//! that first takes a row lock on the device. Two transactions booking the
//! same device therefore serialize, and the partial exclusion constraint on
//! approved rows (migration 0002) catches anything that slips past.

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{
    ManagedRequestEntity, RentalRequestEntity, RentalWithDeviceEntity, RequestStatusDb,
};
use crate::metrics::QueryTimer;

const REQUEST_COLUMNS: &str =
    "id, device_id, renter_id, start_date, end_date, status, created_at, updated_at";

/// Errors from booking operations that the plain `sqlx::Error` cannot carry.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("an approved request already overlaps the requested window")]
    Overlap,

    #[error("device not found")]
    DeviceNotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Repository for rental-request database operations.
#[derive(Clone)]
pub struct RentalRequestRepository {
    pool: PgPool,
}

impl RentalRequestRepository {
    /// Creates a new RentalRequestRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a PENDING request for `[start_date, end_date)` on the device.
    ///
    /// Fails with `Overlap` when an approved request on the same device
    /// overlaps the window, and with `DeviceNotFound` when the device id does
    /// not resolve. The caller validates `start_date < end_date` beforehand.
    pub async fn create_pending(
        &self,
        device_id: Uuid,
        renter_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<RentalRequestEntity, BookingError> {
        let timer = QueryTimer::new("create_rental_request");
        let result = async {
            let mut tx = self.pool.begin().await?;

            lock_device(&mut tx, device_id)
                .await?
                .ok_or(BookingError::DeviceNotFound)?;

            if approved_overlap_exists(&mut tx, device_id, start_date, end_date, None).await? {
                return Err(BookingError::Overlap);
            }

            let entity = sqlx::query_as::<_, RentalRequestEntity>(&format!(
                r#"
                INSERT INTO rental_requests (device_id, renter_id, start_date, end_date)
                VALUES ($1, $2, $3, $4)
                RETURNING {REQUEST_COLUMNS}
                "#
            ))
            .bind(device_id)
            .bind(renter_id)
            .bind(start_date)
            .bind(end_date)
            .fetch_one(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok(entity)
        }
        .await;
        timer.record();
        result
    }

    /// Find a request by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<RentalRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_rental_request_by_id");
        let result = sqlx::query_as::<_, RentalRequestEntity>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM rental_requests
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Requests created by the given renter, newest first, with device info.
    pub async fn list_by_renter(
        &self,
        renter_id: Uuid,
    ) -> Result<Vec<RentalWithDeviceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_rentals_by_renter");
        let result = sqlx::query_as::<_, RentalWithDeviceEntity>(
            r#"
            SELECT rr.id, rr.start_date, rr.end_date, rr.status, rr.created_at,
                   d.id as device_id, d.title as device_title, d.city as device_city,
                   d.price_per_day_cents
            FROM rental_requests rr
            JOIN devices d ON rr.device_id = d.id
            WHERE rr.renter_id = $1
            ORDER BY rr.created_at DESC
            "#,
        )
        .bind(renter_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Requests targeting devices owned by the given user, newest first, with
    /// device and renter info.
    pub async fn list_by_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<ManagedRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_requests_by_owner");
        let result = sqlx::query_as::<_, ManagedRequestEntity>(
            r#"
            SELECT rr.id, rr.start_date, rr.end_date, rr.status, rr.created_at,
                   d.id as device_id, d.title as device_title, d.city as device_city,
                   d.price_per_day_cents,
                   u.id as renter_id, u.display_name as renter_display_name
            FROM rental_requests rr
            JOIN devices d ON rr.device_id = d.id
            JOIN users u ON rr.renter_id = u.id
            WHERE d.owner_id = $1
            ORDER BY rr.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Apply an owner decision to a request.
    ///
    /// Ownership is folded into existence: returns `Ok(None)` both when the
    /// request id is unknown and when its device belongs to someone else, so
    /// callers cannot tell the two apart.
    ///
    /// An approve re-validates the overlap invariant at commit time under the
    /// device row lock; the losing side of a race gets `Overlap` and the row
    /// keeps its previous status. Re-deciding an already decided request is
    /// allowed and overwrites the status.
    pub async fn decide(
        &self,
        request_id: Uuid,
        owner_id: Uuid,
        status: RequestStatusDb,
    ) -> Result<Option<RentalRequestEntity>, BookingError> {
        let timer = QueryTimer::new("decide_rental_request");
        let result = async {
            let mut tx = self.pool.begin().await?;

            let request = sqlx::query_as::<_, RentalRequestEntity>(
                r#"
                SELECT rr.id, rr.device_id, rr.renter_id, rr.start_date, rr.end_date,
                       rr.status, rr.created_at, rr.updated_at
                FROM rental_requests rr
                JOIN devices d ON rr.device_id = d.id
                WHERE rr.id = $1 AND d.owner_id = $2
                "#,
            )
            .bind(request_id)
            .bind(owner_id)
            .fetch_optional(&mut *tx)
            .await?;

            let Some(request) = request else {
                return Ok(None);
            };

            // Serialize against concurrent bookings on the same device.
            lock_device(&mut tx, request.device_id)
                .await?
                .ok_or(BookingError::DeviceNotFound)?;

            if status == RequestStatusDb::Approved
                && approved_overlap_exists(
                    &mut tx,
                    request.device_id,
                    request.start_date,
                    request.end_date,
                    Some(request.id),
                )
                .await?
            {
                tracing::debug!(
                    request_id = %request.id,
                    device_id = %request.device_id,
                    "approval denied: window already taken"
                );
                return Err(BookingError::Overlap);
            }

            let updated = sqlx::query_as::<_, RentalRequestEntity>(&format!(
                r#"
                UPDATE rental_requests
                SET status = $2, updated_at = NOW()
                WHERE id = $1
                RETURNING {REQUEST_COLUMNS}
                "#
            ))
            .bind(request.id)
            .bind(status)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_exclusion_violation)?;

            tx.commit().await?;
            Ok(Some(updated))
        }
        .await;
        timer.record();
        result
    }
}

/// Take a row lock on the device, serializing bookings per device.
async fn lock_device(
    tx: &mut Transaction<'_, Postgres>,
    device_id: Uuid,
) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id FROM devices WHERE id = $1 FOR UPDATE
        "#,
    )
    .bind(device_id)
    .fetch_optional(&mut **tx)
    .await
}

/// Half-open overlap test against approved requests on the device, optionally
/// excluding one request id (the one being re-approved).
async fn approved_overlap_exists(
    tx: &mut Transaction<'_, Postgres>,
    device_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    exclude: Option<Uuid>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM rental_requests
            WHERE device_id = $1
              AND status = 'approved'
              AND start_date < $3
              AND end_date > $2
              AND ($4::uuid IS NULL OR id <> $4)
        )
        "#,
    )
    .bind(device_id)
    .bind(start_date)
    .bind(end_date)
    .bind(exclude)
    .fetch_one(&mut **tx)
    .await
}

/// The partial exclusion constraint on approved rows is the storage-layer
/// backstop; a 23P01 means another transaction won the window.
fn map_exclusion_violation(err: sqlx::Error) -> BookingError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23P01") {
            return BookingError::Overlap;
        }
    }
    BookingError::Database(err)
}
