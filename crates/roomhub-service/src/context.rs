//! Request context carrying the authenticated user and resolved permissions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roomhub_auth::AccessClaims;

/// Context for the current authenticated request.
///
/// Built once by the guard middleware from validated token claims and
/// attached to the request. It is immutable: nothing downstream mutates
/// request state, services only read from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The username (convenience field from token claims).
    pub username: String,
    /// Whether the token was issued on the administrative login surface.
    pub is_admin: bool,
    /// Role names at token issuance time.
    pub roles: Vec<String>,
    /// Deduplicated permission codes at token issuance time.
    pub permissions: BTreeSet<String>,
    /// Email address.
    pub email: String,
}

impl RequestContext {
    /// Whether the user holds the given permission code.
    pub fn has_permission(&self, code: &str) -> bool {
        self.permissions.contains(code)
    }
}

impl From<AccessClaims> for RequestContext {
    fn from(claims: AccessClaims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            is_admin: claims.is_admin,
            roles: claims.roles,
            permissions: claims.permissions,
            email: claims.email,
        }
    }
}
