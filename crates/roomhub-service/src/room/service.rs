//! Meeting room CRUD.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use roomhub_core::error::AppError;
use roomhub_core::result::AppResult;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_database::repositories::RoomRepository;
use roomhub_entity::room::{CreateRoom, MeetingRoom, UpdateRoom};

/// Handles meeting room management.
///
/// Name uniqueness is enforced by the database; the repository maps the
/// constraint violation to a conflict error.
#[derive(Debug, Clone)]
pub struct RoomService {
    room_repo: Arc<RoomRepository>,
}

impl RoomService {
    /// Creates a new room service.
    pub fn new(room_repo: Arc<RoomRepository>) -> Self {
        Self { room_repo }
    }

    /// Fetch a room by ID.
    pub async fn find(&self, id: Uuid) -> AppResult<MeetingRoom> {
        self.room_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::room_not_found(format!("Meeting room {id} not found")))
    }

    /// List rooms with optional filters.
    pub async fn list(
        &self,
        name: Option<&str>,
        capacity: Option<i32>,
        equipment: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<MeetingRoom>> {
        self.room_repo.find_all(name, capacity, equipment, page).await
    }

    /// Create a room.
    pub async fn create(&self, data: CreateRoom) -> AppResult<MeetingRoom> {
        if data.capacity <= 0 {
            return Err(AppError::validation("Capacity must be positive"));
        }
        let room = self.room_repo.create(&data).await?;
        info!(room_id = %room.id, name = %room.name, "Meeting room created");
        Ok(room)
    }

    /// Update a room.
    pub async fn update(&self, id: Uuid, data: UpdateRoom) -> AppResult<MeetingRoom> {
        if let Some(capacity) = data.capacity {
            if capacity <= 0 {
                return Err(AppError::validation("Capacity must be positive"));
            }
        }
        self.room_repo.update(id, &data).await
    }

    /// Delete a room.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let deleted = self.room_repo.delete(id).await?;
        if !deleted {
            return Err(AppError::room_not_found(format!(
                "Meeting room {id} not found"
            )));
        }
        info!(room_id = %id, "Meeting room deleted");
        Ok(())
    }
}
