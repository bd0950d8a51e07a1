//! Response bodies.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roomhub_core::traits::credentials::IdentityRecord;
use roomhub_service::urge::UrgeOutcome;

/// Identity summary returned alongside a token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

impl From<IdentityRecord> for UserInfo {
    fn from(identity: IdentityRecord) -> Self {
        Self {
            id: identity.user_id,
            username: identity.username,
            email: identity.email,
            is_admin: identity.is_admin,
            roles: identity.roles,
            permissions: identity.permissions,
        }
    }
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_info: UserInfo,
    pub access_token: String,
    pub refresh_token: String,
}

/// Successful token refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Outcome of an urge attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrgeResponse {
    pub status: String,
}

impl From<UrgeOutcome> for UrgeResponse {
    fn from(outcome: UrgeOutcome) -> Self {
        let status = match outcome {
            UrgeOutcome::Sent => "sent",
            UrgeOutcome::Throttled => "throttled",
        };
        Self {
            status: status.to_string(),
        }
    }
}

/// Generic acknowledgement for operations with no payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
