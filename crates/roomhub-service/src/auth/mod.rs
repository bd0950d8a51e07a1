//! Login, token refresh and session claims.

pub mod service;

pub use service::AuthService;
