//! The single policy-enforcement middleware.
//!
//! Routes declare their requirements as a [`RoutePolicy`] extension attached
//! at router construction time. This middleware reads that policy, evaluates
//! it against the bearer token, and attaches an immutable
//! [`RequestContext`] for handlers. Nothing downstream mutates request
//! state, and there is no per-handler metadata lookup.

use axum::Extension;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use roomhub_auth::RoutePolicy;
use roomhub_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Evaluate the route's policy and attach the request context.
///
/// A route without an attached policy is treated as public.
pub async fn enforce_route_policy(
    State(state): State<AppState>,
    policy: Option<Extension<RoutePolicy>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let policy = policy.map(|Extension(p)| p).unwrap_or_default();
    let bearer = bearer_token(req.headers());

    if let Some(claims) = state.guard.authorize(&policy, bearer)? {
        req.extensions_mut().insert(RequestContext::from(claims));
    }

    Ok(next.run(req).await)
}

/// Pull the bearer token out of the Authorization header, if any.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_strips_the_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }

    #[test]
    fn non_bearer_schemes_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
