//! # roomhub-auth
//!
//! Authentication primitives for RoomHub: JWT access/refresh tokens, the
//! route-policy authorization guard, Argon2id password hashing and numeric
//! captcha generation.

pub mod captcha;
pub mod guard;
pub mod jwt;
pub mod password;

pub use guard::{AuthGuard, RoutePolicy};
pub use jwt::claims::{AccessClaims, RefreshClaims, TokenKind};
pub use jwt::decoder::JwtDecoder;
pub use jwt::encoder::{JwtEncoder, TokenPair};
pub use password::hasher::PasswordHasher;
