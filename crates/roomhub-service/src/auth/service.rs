//! Login and token refresh.

use std::sync::Arc;

use tracing::info;

use roomhub_auth::password::PasswordHasher;
use roomhub_auth::{JwtDecoder, JwtEncoder, TokenPair};
use roomhub_core::error::AppError;
use roomhub_core::result::AppResult;
use roomhub_core::traits::credentials::{CredentialStore, IdentityRecord};

/// Handles login and token refresh for both login surfaces.
///
/// The admin flag always comes from the route, never from the client body:
/// `/user/login` passes `false`, `/user/admin/login` passes `true`, and the
/// same split applies to the refresh endpoints.
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            credentials,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Verify a username/password pair and mint a token pair on success.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        is_admin: bool,
    ) -> AppResult<(IdentityRecord, TokenPair)> {
        let credential = self
            .credentials
            .find_login(username, is_admin)
            .await?
            .ok_or_else(|| AppError::user_not_found("User does not exist"))?;

        if credential.is_frozen {
            return Err(AppError::forbidden("Account is frozen"));
        }

        let valid = self
            .hasher
            .verify_password(password, &credential.password_hash)?;
        if !valid {
            return Err(AppError::validation("Incorrect password"));
        }

        let pair = self.encoder.issue_pair(&credential.identity)?;
        info!(username, is_admin, "User logged in");
        Ok((credential.identity, pair))
    }

    /// Rotate a refresh token into a fresh token pair.
    ///
    /// The user is re-fetched from persistence so the new access token
    /// carries current roles and permissions, and a deleted account fails
    /// here rather than living on in stale claims.
    pub async fn refresh(
        &self,
        refresh_token: &str,
        is_admin: bool,
    ) -> AppResult<(IdentityRecord, TokenPair)> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        if claims.is_admin != is_admin {
            return Err(AppError::token_invalid(
                "Refresh token was issued on the other login surface",
            ));
        }

        let identity = self
            .credentials
            .find_identity(claims.sub, is_admin)
            .await?
            .ok_or_else(|| AppError::user_not_found("User no longer exists"))?;

        let pair = self.encoder.issue_pair(&identity)?;
        Ok((identity, pair))
    }
}
