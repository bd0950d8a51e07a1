//! Statistics handlers for the admin dashboard.

use axum::Json;
use axum::extract::{Query, State};

use roomhub_core::error::AppError;
use roomhub_database::repositories::statistic::{RoomUsageCount, UserBookingCount};

use crate::dto::request::StatWindowQuery;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/statistic/user-booking-count
pub async fn user_booking_count(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<StatWindowQuery>,
) -> Result<Json<Vec<UserBookingCount>>, ApiError> {
    if !user.is_admin {
        return Err(AppError::forbidden("Administrator access required").into());
    }
    let counts = state
        .statistic_service
        .user_booking_counts(query.start, query.end)
        .await?;
    Ok(Json(counts))
}

/// GET /api/statistic/meeting-room-used-count
pub async fn meeting_room_used_count(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<StatWindowQuery>,
) -> Result<Json<Vec<RoomUsageCount>>, ApiError> {
    if !user.is_admin {
        return Err(AppError::forbidden("Administrator access required").into());
    }
    let counts = state
        .statistic_service
        .room_usage_counts(query.start, query.end)
        .await?;
    Ok(Json(counts))
}
