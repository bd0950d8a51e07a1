//! Credential store trait: the identity lookup seam between the auth layer
//! and user persistence.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::result::AppResult;

/// Snapshot of a user's identity as embedded into access-token claims.
///
/// `permissions` is already deduplicated across the user's roles: the
/// aggregation happens once at lookup time, not on every permission check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// The user's ID.
    pub user_id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Whether the account is an administrative account.
    pub is_admin: bool,
    /// Role names, in assignment order.
    pub roles: Vec<String>,
    /// Deduplicated permission codes across all roles.
    pub permissions: Vec<String>,
}

/// An identity together with what is needed to verify a login attempt.
#[derive(Debug, Clone)]
pub struct LoginCredential {
    /// The identity snapshot to embed into tokens on success.
    pub identity: IdentityRecord,
    /// Stored Argon2 hash of the user's password.
    pub password_hash: String,
    /// Whether the account has been frozen by an administrator.
    pub is_frozen: bool,
}

/// Trait for identity lookups against user persistence.
///
/// The admin flag is part of the lookup key: the ordinary and administrative
/// login surfaces are separate, so a refresh token minted on one side never
/// resolves against the other.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Resolve an identity by user ID and admin flag.
    async fn find_identity(&self, user_id: Uuid, is_admin: bool)
    -> AppResult<Option<IdentityRecord>>;

    /// Resolve the login credential for a username and admin flag.
    async fn find_login(
        &self,
        username: &str,
        is_admin: bool,
    ) -> AppResult<Option<LoginCredential>>;

    /// Resolve the first administrative user (notification target for urges).
    async fn first_admin(&self) -> AppResult<Option<IdentityRecord>>;
}
