//! Extractor for the authenticated request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use roomhub_core::error::AppError;
use roomhub_service::RequestContext;

use crate::error::ApiError;

/// Extracts the [`RequestContext`] placed in request extensions by the
/// guard middleware.
///
/// Handlers that take a `CurrentUser` argument must sit behind a policy
/// with `require_login`; on a public route the context is absent and the
/// extractor rejects the request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub RequestContext);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::unauthenticated("User is not logged in").into())
    }
}

impl std::ops::Deref for CurrentUser {
    type Target = RequestContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
