//! Aggregate statistics queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;

/// Booking count per user within a time window.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserBookingCount {
    pub user_id: Uuid,
    pub username: String,
    pub booking_count: i64,
}

/// Booking count per meeting room within a time window.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoomUsageCount {
    pub room_id: Uuid,
    pub room_name: String,
    pub usage_count: i64,
}

/// Repository for aggregate booking statistics.
#[derive(Debug, Clone)]
pub struct StatisticRepository {
    pool: PgPool,
}

impl StatisticRepository {
    /// Create a new statistics repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Count bookings per user within the given window.
    pub async fn user_booking_counts(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<UserBookingCount>> {
        sqlx::query_as::<_, UserBookingCount>(
            "SELECT u.id AS user_id, u.username, COUNT(b.id) AS booking_count \
             FROM users u \
             JOIN bookings b ON b.user_id = u.id \
             WHERE b.start_time >= $1 AND b.start_time <= $2 \
             GROUP BY u.id, u.username \
             ORDER BY booking_count DESC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count user bookings", e)
        })
    }

    /// Count bookings per meeting room within the given window.
    pub async fn room_usage_counts(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<RoomUsageCount>> {
        sqlx::query_as::<_, RoomUsageCount>(
            "SELECT r.id AS room_id, r.name AS room_name, COUNT(b.id) AS usage_count \
             FROM meeting_rooms r \
             JOIN bookings b ON b.room_id = r.id \
             WHERE b.start_time >= $1 AND b.start_time <= $2 \
             GROUP BY r.id, r.name \
             ORDER BY usage_count DESC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count room usage", e)
        })
    }
}
