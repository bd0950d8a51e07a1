//! Email transports.

use async_trait::async_trait;
use tracing::info;

use roomhub_core::result::AppResult;
use roomhub_core::traits::mailer::{Mailer, OutboundEmail};

/// Transport that logs outgoing mail instead of delivering it.
///
/// Used in development and tests, and as the default transport until a
/// deployment wires in a real relay.
#[derive(Debug, Clone, Default)]
pub struct TracingMailer;

impl TracingMailer {
    /// Create a new tracing-only mailer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for TracingMailer {
    async fn send(&self, mail: &OutboundEmail) -> AppResult<()> {
        info!(to = %mail.to, subject = %mail.subject, "Outbound email (not delivered)");
        Ok(())
    }
}
