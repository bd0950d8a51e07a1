//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user.
///
/// The admin flag partitions the login surface: ordinary users authenticate
/// against `/user/login`, administrators against `/user/admin/login`, and a
/// lookup never crosses the partition.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display nickname.
    pub nick_name: String,
    /// Email address.
    pub email: String,
    /// Avatar image path.
    pub head_pic: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Whether the account has been frozen by an administrator.
    pub is_frozen: bool,
    /// Whether this is an administrative account.
    pub is_admin: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display nickname.
    pub nick_name: String,
    /// Email address.
    pub email: String,
}

/// Data for updating a user's own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New nickname, if changing.
    pub nick_name: Option<String>,
    /// New avatar path, if changing.
    pub head_pic: Option<String>,
}
