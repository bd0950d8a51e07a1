//! In-memory fakes shared by the service tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use roomhub_core::result::AppResult;
use roomhub_core::traits::credentials::{CredentialStore, IdentityRecord, LoginCredential};
use roomhub_core::traits::mailer::{Mailer, OutboundEmail};
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_entity::booking::{
    Booking, BookingDetail, BookingFilter, BookingStatus, NewBooking, intervals_overlap,
};
use roomhub_entity::room::MeetingRoom;
use roomhub_service::booking::BookingStore;

/// A timestamp on a fixed day, for readable interval tests.
pub fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, hour, min, 0).unwrap()
}

pub fn make_room(id: Uuid) -> MeetingRoom {
    MeetingRoom {
        id,
        name: "Jupiter".to_string(),
        capacity: 10,
        location: "3F east wing".to_string(),
        equipment: "whiteboard".to_string(),
        description: String::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// In-memory booking store.
///
/// `find_blocking_in_range` yields back to the scheduler after reading, so a
/// missing room lock in the service would let two concurrent proposals both
/// observe an empty range.
#[derive(Debug, Default)]
pub struct MemoryBookingStore {
    pub rooms: Mutex<HashMap<Uuid, MeetingRoom>>,
    pub bookings: Mutex<Vec<Booking>>,
}

impl MemoryBookingStore {
    pub fn with_room(room: MeetingRoom) -> Self {
        let store = Self::default();
        store.rooms.lock().unwrap().insert(room.id, room);
        store
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn find_room(&self, room_id: Uuid) -> AppResult<Option<MeetingRoom>> {
        Ok(self.rooms.lock().unwrap().get(&room_id).cloned())
    }

    async fn find_blocking_in_range(
        &self,
        room_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>> {
        let matches: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| {
                b.room_id == room_id
                    && b.status.is_blocking()
                    && intervals_overlap(b.start_time, b.end_time, start_time, end_time)
            })
            .cloned()
            .collect();
        tokio::task::yield_now().await;
        Ok(matches)
    }

    async fn insert(&self, data: &NewBooking) -> AppResult<Booking> {
        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            room_id: data.room_id,
            start_time: data.start_time,
            end_time: data.end_time,
            status: BookingStatus::Pending,
            note: data.note.clone(),
            created_at: now,
            updated_at: now,
        };
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(booking)
    }

    async fn find_booking(&self, id: Uuid) -> AppResult<Option<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking> {
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .expect("booking exists");
        booking.status = status;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    async fn search(
        &self,
        _filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BookingDetail>> {
        Ok(PageResponse::new(Vec::new(), page.page, page.page_size, 0))
    }
}

/// In-memory credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    pub users: Mutex<Vec<LoginCredential>>,
    pub admin_lookups: AtomicU32,
}

impl MemoryCredentials {
    pub fn with_users(users: Vec<LoginCredential>) -> Self {
        Self {
            users: Mutex::new(users),
            admin_lookups: AtomicU32::new(0),
        }
    }

    pub fn remove_user(&self, user_id: Uuid) {
        self.users
            .lock()
            .unwrap()
            .retain(|c| c.identity.user_id != user_id);
    }
}

pub fn make_identity(username: &str, is_admin: bool) -> IdentityRecord {
    IdentityRecord {
        user_id: Uuid::new_v4(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        is_admin,
        roles: vec![if is_admin {
            "administrator".to_string()
        } else {
            "regular user".to_string()
        }],
        permissions: if is_admin {
            vec![
                "booking:approve".to_string(),
                "meeting_room:manage".to_string(),
            ]
        } else {
            Vec::new()
        },
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentials {
    async fn find_identity(
        &self,
        user_id: Uuid,
        is_admin: bool,
    ) -> AppResult<Option<IdentityRecord>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.identity.user_id == user_id && c.identity.is_admin == is_admin)
            .map(|c| c.identity.clone()))
    }

    async fn find_login(
        &self,
        username: &str,
        is_admin: bool,
    ) -> AppResult<Option<LoginCredential>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.identity.username == username && c.identity.is_admin == is_admin)
            .cloned())
    }

    async fn first_admin(&self) -> AppResult<Option<IdentityRecord>> {
        self.admin_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.identity.is_admin)
            .map(|c| c.identity.clone()))
    }
}

/// A mailer that records every message it is asked to deliver.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutboundEmail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutboundEmail) -> AppResult<()> {
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}
