//! Collaborator traits shared across crates.

pub mod cache;
pub mod credentials;
pub mod mailer;

pub use cache::CacheProvider;
pub use credentials::{CredentialStore, IdentityRecord, LoginCredential};
pub use mailer::{Mailer, OutboundEmail};
