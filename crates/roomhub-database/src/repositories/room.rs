//! Meeting room repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_entity::room::{CreateRoom, MeetingRoom, UpdateRoom};

/// Repository for meeting room CRUD and query operations.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a room by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MeetingRoom>> {
        sqlx::query_as::<_, MeetingRoom>("SELECT * FROM meeting_rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find room", e))
    }

    /// List rooms with optional filters on name, capacity and equipment.
    pub async fn find_all(
        &self,
        name: Option<&str>,
        capacity: Option<i32>,
        equipment: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<MeetingRoom>> {
        let name_pattern = name.map(|v| format!("%{v}%"));
        let equipment_pattern = equipment.map(|v| format!("%{v}%"));

        let filter = "($1::text IS NULL OR name ILIKE $1) \
             AND ($2::int IS NULL OR capacity >= $2) \
             AND ($3::text IS NULL OR equipment ILIKE $3)";

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM meeting_rooms WHERE {filter}"))
                .bind(&name_pattern)
                .bind(capacity)
                .bind(&equipment_pattern)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count rooms", e)
                })?;

        let rooms = sqlx::query_as::<_, MeetingRoom>(&format!(
            "SELECT * FROM meeting_rooms WHERE {filter} \
             ORDER BY created_at DESC LIMIT $4 OFFSET $5"
        ))
        .bind(&name_pattern)
        .bind(capacity)
        .bind(&equipment_pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list rooms", e))?;

        Ok(PageResponse::new(
            rooms,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new room. A duplicate name maps to a conflict error.
    pub async fn create(&self, data: &CreateRoom) -> AppResult<MeetingRoom> {
        sqlx::query_as::<_, MeetingRoom>(
            "INSERT INTO meeting_rooms (name, capacity, location, equipment, description) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(data.capacity)
        .bind(&data.location)
        .bind(&data.equipment)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("meeting_rooms_name_key") =>
            {
                AppError::conflict(format!("Meeting room '{}' already exists", data.name))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create room", e),
        })
    }

    /// Update a room's fields. `None` fields are left unchanged.
    pub async fn update(&self, id: Uuid, data: &UpdateRoom) -> AppResult<MeetingRoom> {
        sqlx::query_as::<_, MeetingRoom>(
            "UPDATE meeting_rooms SET name = COALESCE($2, name), \
                                      capacity = COALESCE($3, capacity), \
                                      location = COALESCE($4, location), \
                                      equipment = COALESCE($5, equipment), \
                                      description = COALESCE($6, description), \
                                      updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.capacity)
        .bind(&data.location)
        .bind(&data.equipment)
        .bind(&data.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("meeting_rooms_name_key") =>
            {
                AppError::conflict("Meeting room name already in use".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update room", e),
        })?
        .ok_or_else(|| AppError::room_not_found(format!("Meeting room {id} not found")))
    }

    /// Delete a room by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM meeting_rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete room", e))?;

        Ok(result.rows_affected() > 0)
    }
}
