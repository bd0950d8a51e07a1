//! Token issuance and validation tests.

use std::collections::BTreeSet;

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use roomhub_auth::jwt::claims::{AccessClaims, TokenKind};
use roomhub_auth::{JwtDecoder, JwtEncoder};
use roomhub_core::config::AuthConfig;
use roomhub_core::error::ErrorKind;
use roomhub_core::traits::credentials::IdentityRecord;

fn config() -> AuthConfig {
    AuthConfig::default()
}

fn identity() -> IdentityRecord {
    IdentityRecord {
        user_id: Uuid::new_v4(),
        username: "lisi".to_string(),
        email: "lisi@example.com".to_string(),
        is_admin: true,
        roles: vec!["administrator".to_string()],
        permissions: vec![
            "meeting_room:manage".to_string(),
            "booking:approve".to_string(),
        ],
    }
}

#[test]
fn issued_access_token_decodes_to_same_identity() {
    let config = config();
    let encoder = JwtEncoder::new(&config);
    let decoder = JwtDecoder::new(&config);

    let identity = identity();
    let pair = encoder.issue_pair(&identity).unwrap();

    let claims = decoder.decode_access_token(&pair.access_token).unwrap();
    assert_eq!(claims.sub, identity.user_id);
    assert_eq!(claims.username, "lisi");
    assert!(claims.is_admin);
    assert_eq!(claims.roles, vec!["administrator".to_string()]);
    assert!(claims.has_permission("meeting_room:manage"));
    assert!(claims.has_permission("booking:approve"));
}

#[test]
fn refresh_token_carries_only_the_subject() {
    let config = config();
    let encoder = JwtEncoder::new(&config);
    let decoder = JwtDecoder::new(&config);

    let identity = identity();
    let pair = encoder.issue_pair(&identity).unwrap();

    let claims = decoder.decode_refresh_token(&pair.refresh_token).unwrap();
    assert_eq!(claims.sub, identity.user_id);
    assert!(claims.is_admin);
    assert_eq!(claims.token_type, TokenKind::Refresh);
}

#[test]
fn access_token_is_rejected_as_refresh_token() {
    let config = config();
    let encoder = JwtEncoder::new(&config);
    let decoder = JwtDecoder::new(&config);

    let pair = encoder.issue_pair(&identity()).unwrap();
    let err = decoder.decode_refresh_token(&pair.access_token).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TokenInvalid);
}

#[test]
fn expired_access_token_maps_to_token_expired() {
    let config = config();
    let decoder = JwtDecoder::new(&config);

    // Hand-roll a token whose expiry is well past the decoder's leeway.
    let now = Utc::now().timestamp();
    let claims = AccessClaims {
        sub: Uuid::new_v4(),
        username: "lisi".to_string(),
        is_admin: false,
        roles: vec![],
        permissions: BTreeSet::new(),
        email: "lisi@example.com".to_string(),
        iat: now - 3600,
        exp: now - 60,
        token_type: TokenKind::Access,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .unwrap();

    let err = decoder.decode_access_token(&token).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TokenExpired);
}

#[test]
fn token_signed_with_other_secret_is_invalid() {
    let config = config();
    let encoder = JwtEncoder::new(&config);

    let mut other = config.clone();
    other.jwt_secret = "a-completely-different-secret".to_string();
    let decoder = JwtDecoder::new(&other);

    let pair = encoder.issue_pair(&identity()).unwrap();
    let err = decoder.decode_access_token(&pair.access_token).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TokenInvalid);
}

#[test]
fn access_expiry_matches_configured_ttl() {
    let config = config();
    let encoder = JwtEncoder::new(&config);

    let before = Utc::now();
    let pair = encoder.issue_pair(&identity()).unwrap();

    let expected = before + chrono::Duration::minutes(config.jwt_access_ttl_minutes as i64);
    let delta = (pair.access_expires_at - expected).num_seconds().abs();
    assert!(delta <= 2, "access expiry drifted by {delta}s");
}
