//! Route policies and the authorization guard.
//!
//! Every route declares its requirements up front as a [`RoutePolicy`]
//! value attached at router construction time. A single guard evaluates the
//! policy against the bearer token; there is no per-handler metadata
//! reflection anywhere.

use roomhub_core::error::AppError;
use roomhub_core::result::AppResult;

use crate::jwt::claims::AccessClaims;
use crate::jwt::decoder::JwtDecoder;

/// Access requirements for a single route.
#[derive(Debug, Clone, Default)]
pub struct RoutePolicy {
    /// Whether a valid access token is required.
    pub require_login: bool,
    /// Permission codes the caller must hold, all of them.
    pub required_permissions: Vec<String>,
}

impl RoutePolicy {
    /// A route anyone may call.
    pub fn public() -> Self {
        Self::default()
    }

    /// A route that requires a valid access token but no specific permission.
    pub fn login_required() -> Self {
        Self {
            require_login: true,
            required_permissions: Vec::new(),
        }
    }

    /// A route that requires a valid access token carrying every one of the
    /// given permission codes.
    pub fn with_permissions<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            require_login: true,
            required_permissions: codes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Evaluates route policies against bearer tokens.
#[derive(Debug, Clone)]
pub struct AuthGuard {
    decoder: JwtDecoder,
}

impl AuthGuard {
    /// Create a new guard around a token decoder.
    pub fn new(decoder: JwtDecoder) -> Self {
        Self { decoder }
    }

    /// Evaluate a policy against an optional bearer token.
    ///
    /// Returns `Ok(None)` for public routes (the token, if any, is ignored)
    /// and `Ok(Some(claims))` for authenticated ones. A missing token on a
    /// protected route is an unauthenticated error, distinct from the
    /// expired and invalid token errors raised by the decoder.
    pub fn authorize(
        &self,
        policy: &RoutePolicy,
        bearer: Option<&str>,
    ) -> AppResult<Option<AccessClaims>> {
        if !policy.require_login {
            return Ok(None);
        }

        let token = bearer.ok_or_else(|| AppError::unauthenticated("User is not logged in"))?;
        let claims = self.decoder.decode_access_token(token)?;

        for code in &policy.required_permissions {
            if !claims.has_permission(code) {
                return Err(AppError::forbidden(format!(
                    "Missing required permission: {code}"
                )));
            }
        }

        Ok(Some(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use roomhub_core::config::AuthConfig;
    use roomhub_core::error::ErrorKind;
    use roomhub_core::traits::credentials::IdentityRecord;
    use uuid::Uuid;

    fn identity(permissions: &[&str]) -> IdentityRecord {
        IdentityRecord {
            user_id: Uuid::new_v4(),
            username: "zhangsan".to_string(),
            email: "zhangsan@example.com".to_string(),
            is_admin: false,
            roles: vec!["regular user".to_string()],
            permissions: permissions.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn guard() -> (AuthGuard, JwtEncoder) {
        let config = AuthConfig::default();
        (
            AuthGuard::new(JwtDecoder::new(&config)),
            JwtEncoder::new(&config),
        )
    }

    #[test]
    fn public_route_ignores_missing_token() {
        let (guard, _) = guard();
        let result = guard.authorize(&RoutePolicy::public(), None).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn protected_route_rejects_missing_token() {
        let (guard, _) = guard();
        let err = guard
            .authorize(&RoutePolicy::login_required(), None)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[test]
    fn protected_route_rejects_garbage_token() {
        let (guard, _) = guard();
        let err = guard
            .authorize(&RoutePolicy::login_required(), Some("not-a-jwt"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);
    }

    #[test]
    fn login_required_accepts_valid_token() {
        let (guard, encoder) = guard();
        let pair = encoder.issue_pair(&identity(&[])).unwrap();

        let claims = guard
            .authorize(&RoutePolicy::login_required(), Some(&pair.access_token))
            .unwrap()
            .unwrap();
        assert_eq!(claims.username, "zhangsan");
    }

    #[test]
    fn missing_permission_is_forbidden() {
        let (guard, encoder) = guard();
        let pair = encoder.issue_pair(&identity(&["ccc"])).unwrap();

        let err = guard
            .authorize(
                &RoutePolicy::with_permissions(["ddd"]),
                Some(&pair.access_token),
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn superset_of_permissions_passes() {
        let (guard, encoder) = guard();
        let pair = encoder.issue_pair(&identity(&["ccc", "ddd"])).unwrap();

        let claims = guard
            .authorize(
                &RoutePolicy::with_permissions(["ccc"]),
                Some(&pair.access_token),
            )
            .unwrap()
            .unwrap();
        assert!(claims.has_permission("ddd"));
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let (guard, encoder) = guard();
        let pair = encoder.issue_pair(&identity(&[])).unwrap();

        let err = guard
            .authorize(&RoutePolicy::login_required(), Some(&pair.refresh_token))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);
    }
}
