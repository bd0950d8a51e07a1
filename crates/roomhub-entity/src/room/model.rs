//! Meeting room entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A bookable meeting room.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MeetingRoom {
    /// Unique room identifier.
    pub id: Uuid,
    /// Room name, unique across all rooms.
    pub name: String,
    /// Seating capacity.
    pub capacity: i32,
    /// Physical location (building/floor).
    pub location: String,
    /// Installed equipment, free text.
    pub equipment: String,
    /// Free-text description.
    pub description: String,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a meeting room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoom {
    pub name: String,
    pub capacity: i32,
    pub location: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub description: String,
}

/// Partial update for a meeting room. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoom {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub location: Option<String>,
    pub equipment: Option<String>,
    pub description: Option<String>,
}
