//! Booking repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_entity::booking::{Booking, BookingDetail, BookingFilter, BookingStatus, NewBooking};

/// Repository for booking persistence and search.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a booking by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    /// Find blocking bookings for a room whose closed interval overlaps the
    /// given interval.
    pub async fn find_blocking_in_range(
        &self,
        room_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings \
             WHERE room_id = $1 \
               AND status IN ('pending', 'approved') \
               AND start_time <= $3 \
               AND end_time >= $2",
        )
        .bind(room_id)
        .bind(start_time)
        .bind(end_time)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query overlapping bookings", e)
        })
    }

    /// Insert a new pending booking.
    ///
    /// The database-level exclusion constraint is the last line of defense
    /// against concurrent overlapping inserts; a violation maps to a
    /// conflict error just like an overlap detected up front.
    pub async fn insert(&self, data: &NewBooking) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (user_id, room_id, start_time, end_time, note) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.room_id)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(&data.note)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("bookings_no_overlap") =>
            {
                AppError::conflict("The room is already booked for this time range".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create booking", e),
        })
    }

    /// Set a booking's status.
    pub async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update booking status", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))
    }

    /// Search bookings joined with booker and room data.
    pub async fn search(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BookingDetail>> {
        let username_pattern = filter.username.as_deref().map(|v| format!("%{v}%"));
        let room_name_pattern = filter.room_name.as_deref().map(|v| format!("%{v}%"));
        let location_pattern = filter.room_location.as_deref().map(|v| format!("%{v}%"));

        let where_clause = "($1::text IS NULL OR u.username ILIKE $1) \
             AND ($2::text IS NULL OR r.name ILIKE $2) \
             AND ($3::text IS NULL OR r.location ILIKE $3) \
             AND ($4::timestamptz IS NULL OR b.start_time >= $4) \
             AND ($5::timestamptz IS NULL OR b.end_time <= $5) \
             AND ($6::booking_status IS NULL OR b.status = $6)";

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM bookings b \
             JOIN users u ON u.id = b.user_id \
             JOIN meeting_rooms r ON r.id = b.room_id \
             WHERE {where_clause}"
        ))
        .bind(&username_pattern)
        .bind(&room_name_pattern)
        .bind(&location_pattern)
        .bind(filter.start_after)
        .bind(filter.end_before)
        .bind(filter.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))?;

        let bookings = sqlx::query_as::<_, BookingDetail>(&format!(
            "SELECT b.id, b.user_id, u.username, b.room_id, \
                    r.name AS room_name, r.location AS room_location, \
                    b.start_time, b.end_time, b.status, b.note, b.created_at \
             FROM bookings b \
             JOIN users u ON u.id = b.user_id \
             JOIN meeting_rooms r ON r.id = b.room_id \
             WHERE {where_clause} \
             ORDER BY b.start_time DESC LIMIT $7 OFFSET $8"
        ))
        .bind(&username_pattern)
        .bind(&room_name_pattern)
        .bind(&location_pattern)
        .bind(filter.start_after)
        .bind(filter.end_before)
        .bind(filter.status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search bookings", e))?;

        Ok(PageResponse::new(
            bookings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
