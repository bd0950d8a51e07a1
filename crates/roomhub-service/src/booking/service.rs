//! Booking proposals, conflict detection and status transitions.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use roomhub_core::error::AppError;
use roomhub_core::result::AppResult;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_entity::booking::{
    Booking, BookingDetail, BookingFilter, BookingStatus, NewBooking, intervals_overlap,
};

use super::locks::RoomLocks;
use super::store::BookingStore;

/// The booking engine.
#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    locks: RoomLocks,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self {
            store,
            locks: RoomLocks::new(),
        }
    }

    /// Propose a booking for a room and time interval.
    ///
    /// The room lock is held across the overlap check and the insert, so two
    /// concurrent proposals for the same room cannot both pass the check.
    pub async fn propose(&self, data: NewBooking) -> AppResult<Booking> {
        if data.start_time >= data.end_time {
            return Err(AppError::validation("Start time must be before end time"));
        }

        self.store
            .find_room(data.room_id)
            .await?
            .ok_or_else(|| {
                AppError::room_not_found(format!("Meeting room {} not found", data.room_id))
            })?;

        let _room_guard = self.locks.acquire(data.room_id).await;

        let blocking = self
            .store
            .find_blocking_in_range(data.room_id, data.start_time, data.end_time)
            .await?;
        if blocking.iter().any(|existing| {
            existing.status.is_blocking()
                && intervals_overlap(
                    existing.start_time,
                    existing.end_time,
                    data.start_time,
                    data.end_time,
                )
        }) {
            return Err(AppError::conflict(
                "The room is already booked for this time range",
            ));
        }

        let booking = self.store.insert(&data).await?;
        info!(booking_id = %booking.id, room_id = %booking.room_id, "Booking proposed");
        Ok(booking)
    }

    /// Approve a pending booking.
    pub async fn approve(&self, id: Uuid) -> AppResult<Booking> {
        self.transition(id, BookingStatus::Approved).await
    }

    /// Reject a pending booking.
    pub async fn reject(&self, id: Uuid) -> AppResult<Booking> {
        self.transition(id, BookingStatus::Rejected).await
    }

    /// Release a pending or approved booking, freeing its interval.
    pub async fn release(&self, id: Uuid) -> AppResult<Booking> {
        self.transition(id, BookingStatus::Released).await
    }

    /// Fetch a booking by ID.
    pub async fn find(&self, id: Uuid) -> AppResult<Booking> {
        self.store
            .find_booking(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))
    }

    /// Search bookings.
    pub async fn search(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BookingDetail>> {
        self.store.search(filter, page).await
    }

    async fn transition(&self, id: Uuid, target: BookingStatus) -> AppResult<Booking> {
        let booking = self.find(id).await?;

        if !booking.status.can_transition_to(target) {
            return Err(AppError::illegal_transition(format!(
                "Cannot move booking from {} to {}",
                booking.status, target
            )));
        }

        let updated = self.store.update_status(id, target).await?;
        info!(booking_id = %id, from = %booking.status, to = %target, "Booking status changed");
        Ok(updated)
    }
}
