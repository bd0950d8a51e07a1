//! Persistence seam for the booking engine.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use roomhub_core::result::AppResult;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_database::repositories::{BookingRepository, RoomRepository};
use roomhub_entity::booking::{Booking, BookingDetail, BookingFilter, BookingStatus, NewBooking};
use roomhub_entity::room::MeetingRoom;

/// Storage operations the booking engine needs.
///
/// The sqlx-backed implementation is used in production; tests substitute an
/// in-memory store so the conflict and state machine logic runs without a
/// database.
#[async_trait]
pub trait BookingStore: Send + Sync + 'static {
    /// Look up a room.
    async fn find_room(&self, room_id: Uuid) -> AppResult<Option<MeetingRoom>>;

    /// Blocking bookings for a room whose closed interval overlaps the given one.
    async fn find_blocking_in_range(
        &self,
        room_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>>;

    /// Insert a new pending booking.
    async fn insert(&self, data: &NewBooking) -> AppResult<Booking>;

    /// Look up a booking.
    async fn find_booking(&self, id: Uuid) -> AppResult<Option<Booking>>;

    /// Set a booking's status.
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking>;

    /// Search bookings joined with booker and room data.
    async fn search(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BookingDetail>>;
}

/// The sqlx-backed booking store.
#[derive(Debug, Clone)]
pub struct SqlBookingStore {
    bookings: Arc<BookingRepository>,
    rooms: Arc<RoomRepository>,
}

impl SqlBookingStore {
    /// Creates a new store over the given repositories.
    pub fn new(bookings: Arc<BookingRepository>, rooms: Arc<RoomRepository>) -> Self {
        Self { bookings, rooms }
    }
}

#[async_trait]
impl BookingStore for SqlBookingStore {
    async fn find_room(&self, room_id: Uuid) -> AppResult<Option<MeetingRoom>> {
        self.rooms.find_by_id(room_id).await
    }

    async fn find_blocking_in_range(
        &self,
        room_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>> {
        self.bookings
            .find_blocking_in_range(room_id, start_time, end_time)
            .await
    }

    async fn insert(&self, data: &NewBooking) -> AppResult<Booking> {
        self.bookings.insert(data).await
    }

    async fn find_booking(&self, id: Uuid) -> AppResult<Option<Booking>> {
        self.bookings.find_by_id(id).await
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking> {
        self.bookings.update_status(id, status).await
    }

    async fn search(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BookingDetail>> {
        self.bookings.search(filter, page).await
    }
}
