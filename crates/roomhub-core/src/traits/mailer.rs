//! Mailer trait: the outbound email transport seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A single outbound email message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundEmail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
}

/// Trait for email transports.
///
/// The actual SMTP relay is an external collaborator; implementations in this
/// repo stop at the transport boundary (a tracing-only mailer for development
/// and tests, plus whatever deployment-specific transport is wired in at the
/// edge).
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver a single message. Transport failures surface as `Mail` errors.
    async fn send(&self, mail: &OutboundEmail) -> AppResult<()>;
}
