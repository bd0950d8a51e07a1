//! JWT claims structures for access and refresh tokens.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roomhub_core::traits::credentials::IdentityRecord;

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived access token for API requests.
    Access,
    /// Long-lived refresh token for obtaining new token pairs.
    Refresh,
}

/// Claims payload embedded in every access token.
///
/// The permission set is deduplicated once when the identity is loaded, so
/// authorization checks are plain set lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject, the user ID.
    pub sub: Uuid,
    /// Username for convenience.
    pub username: String,
    /// Whether this token belongs to the administrative login surface.
    pub is_admin: bool,
    /// Role names at issuance time.
    pub roles: Vec<String>,
    /// Deduplicated permission codes at issuance time.
    pub permissions: BTreeSet<String>,
    /// Email address.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token type discriminator.
    pub token_type: TokenKind,
}

/// Claims payload embedded in every refresh token.
///
/// Deliberately minimal: the user is re-fetched from persistence on refresh,
/// so stale roles or permissions never survive a token rotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject, the user ID.
    pub sub: Uuid,
    /// Whether this token belongs to the administrative login surface.
    pub is_admin: bool,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token type discriminator.
    pub token_type: TokenKind,
}

impl AccessClaims {
    /// Build access claims from an identity snapshot.
    pub fn from_identity(identity: &IdentityRecord, iat: i64, exp: i64) -> Self {
        Self {
            sub: identity.user_id,
            username: identity.username.clone(),
            is_admin: identity.is_admin,
            roles: identity.roles.clone(),
            permissions: identity.permissions.iter().cloned().collect(),
            email: identity.email.clone(),
            iat,
            exp,
            token_type: TokenKind::Access,
        }
    }

    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Whether the claims carry the given permission code.
    pub fn has_permission(&self, code: &str) -> bool {
        self.permissions.contains(code)
    }
}
