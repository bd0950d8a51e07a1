//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::de::DeserializeOwned;

use roomhub_core::config::AuthConfig;
use roomhub_core::error::AppError;

use super::claims::{AccessClaims, RefreshClaims, TokenKind};

/// Validates JWT tokens.
///
/// Decoding is pure CPU work, so all methods are synchronous.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew
        // exp is the only claim we validate structurally.
        validation.required_spec_claims = ["exp".to_string()].into_iter().collect();

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<AccessClaims, AppError> {
        let claims: AccessClaims = self.decode_token(token)?;

        if claims.token_type != TokenKind::Access {
            return Err(AppError::token_invalid(
                "Invalid token type: expected access token",
            ));
        }

        Ok(claims)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims, AppError> {
        let claims: RefreshClaims = self.decode_token(token)?;

        if claims.token_type != TokenKind::Refresh {
            return Err(AppError::token_invalid(
                "Invalid token type: expected refresh token",
            ));
        }

        Ok(claims)
    }

    /// Internal decode without type checking.
    ///
    /// An expired signature maps to a distinct error kind so clients can
    /// silently refresh instead of forcing a re-login.
    fn decode_token<C: DeserializeOwned>(&self, token: &str) -> Result<C, AppError> {
        let token_data =
            decode::<C>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::token_expired("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::token_invalid("Invalid token signature")
                    }
                    _ => AppError::token_invalid(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}
