//! Aggregate statistics over bookings.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use roomhub_core::error::AppError;
use roomhub_core::result::AppResult;
use roomhub_database::repositories::StatisticRepository;
use roomhub_database::repositories::statistic::{RoomUsageCount, UserBookingCount};

/// Serves aggregate booking statistics for the admin dashboard.
#[derive(Debug, Clone)]
pub struct StatisticService {
    repo: Arc<StatisticRepository>,
}

impl StatisticService {
    /// Creates a new statistics service.
    pub fn new(repo: Arc<StatisticRepository>) -> Self {
        Self { repo }
    }

    fn check_window(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<()> {
        if start >= end {
            return Err(AppError::validation("Window start must be before its end"));
        }
        Ok(())
    }

    /// Bookings per user within a time window.
    pub async fn user_booking_counts(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<UserBookingCount>> {
        Self::check_window(start, end)?;
        self.repo.user_booking_counts(start, end).await
    }

    /// Bookings per meeting room within a time window.
    pub async fn room_usage_counts(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<RoomUsageCount>> {
        Self::check_window(start, end)?;
        self.repo.room_usage_counts(start, end).await
    }
}
