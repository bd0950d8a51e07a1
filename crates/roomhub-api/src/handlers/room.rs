//! Meeting room handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use crate::error::ApiError;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_entity::room::{CreateRoom, MeetingRoom, UpdateRoom};

use super::validate_dto;
use crate::dto::request::{CreateRoomDto, RoomListQuery, UpdateRoomDto};
use crate::dto::response::MessageResponse;
use crate::state::AppState;

/// GET /api/meeting-room/list
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<RoomListQuery>,
) -> Result<Json<PageResponse<MeetingRoom>>, ApiError> {
    let page = PageRequest::new(query.page.unwrap_or(1), query.page_size.unwrap_or(10));
    let rooms = state
        .room_service
        .list(
            query.name.as_deref(),
            query.capacity,
            query.equipment.as_deref(),
            &page,
        )
        .await?;
    Ok(Json(rooms))
}

/// GET /api/meeting-room/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MeetingRoom>, ApiError> {
    let room = state.room_service.find(id).await?;
    Ok(Json(room))
}

/// POST /api/meeting-room/create
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateRoomDto>,
) -> Result<Json<MeetingRoom>, ApiError> {
    let body = validate_dto(body)?;
    let room = state
        .room_service
        .create(CreateRoom {
            name: body.name,
            capacity: body.capacity,
            location: body.location,
            equipment: body.equipment,
            description: body.description,
        })
        .await?;
    Ok(Json(room))
}

/// POST /api/meeting-room/update/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateRoomDto>,
) -> Result<Json<MeetingRoom>, ApiError> {
    let body = validate_dto(body)?;
    let room = state
        .room_service
        .update(
            id,
            UpdateRoom {
                name: body.name,
                capacity: body.capacity,
                location: body.location,
                equipment: body.equipment,
                description: body.description,
            },
        )
        .await?;
    Ok(Json(room))
}

/// DELETE /api/meeting-room/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.room_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Meeting room deleted")))
}
