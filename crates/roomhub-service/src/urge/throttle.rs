//! Urge notifications: a booker nudges the reviewing administrator, at most
//! once per booking per throttle window.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;
use uuid::Uuid;

use roomhub_cache::{CacheManager, keys};
use roomhub_core::result::AppResult;
use roomhub_core::traits::cache::CacheProvider;
use roomhub_core::traits::credentials::CredentialStore;
use roomhub_core::traits::mailer::OutboundEmail;
use roomhub_mailer::MailDispatcher;

/// How long a booking stays throttled after an urge.
const URGE_WINDOW: Duration = Duration::from_secs(30 * 60);

/// How long the admin notification address is cached.
const ADMIN_EMAIL_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Result of an urge attempt. Throttling is an expected outcome, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrgeOutcome {
    /// The notification was queued and the throttle window opened.
    Sent,
    /// A previous urge within the window suppressed this one.
    Throttled,
}

/// Throttled urge notifications.
#[derive(Clone)]
pub struct UrgeThrottle {
    cache: CacheManager,
    credentials: Arc<dyn CredentialStore>,
    mail: MailDispatcher,
}

impl UrgeThrottle {
    /// Creates a new urge throttle.
    pub fn new(
        cache: CacheManager,
        credentials: Arc<dyn CredentialStore>,
        mail: MailDispatcher,
    ) -> Self {
        Self {
            cache,
            credentials,
            mail,
        }
    }

    /// Attempt to urge the administrator about a booking.
    ///
    /// The throttle key is claimed atomically with `set_nx` before anything
    /// is sent, so concurrent urges for one booking produce one email. The
    /// claim stands even when the email cannot be queued; a delivery hiccup
    /// must not let a booker spam the admin by retrying.
    pub async fn try_notify(&self, booking_id: Uuid) -> AppResult<UrgeOutcome> {
        let throttle_key = keys::urge(booking_id);
        let claimed = self
            .cache
            .set_nx(&throttle_key, "1", Some(URGE_WINDOW))
            .await?;
        if !claimed {
            return Ok(UrgeOutcome::Throttled);
        }

        match self.admin_email().await? {
            Some(address) => {
                let mail = OutboundEmail {
                    to: address,
                    subject: "Booking approval requested".to_string(),
                    html_body: format!(
                        "<p>Booking {booking_id} is awaiting review. The booker has asked for a decision.</p>"
                    ),
                };
                if let Err(e) = self.mail.enqueue(mail) {
                    warn!(%booking_id, error = %e, "Failed to queue urge email");
                }
            }
            None => {
                warn!(%booking_id, "No administrator account to notify");
            }
        }

        Ok(UrgeOutcome::Sent)
    }

    /// The admin notification address, cached to avoid a user table lookup
    /// on every urge.
    async fn admin_email(&self) -> AppResult<Option<String>> {
        let key = keys::admin_email();
        if let Some(cached) = self.cache.get(&key).await? {
            return Ok(Some(cached));
        }

        let Some(admin) = self.credentials.first_admin().await? else {
            return Ok(None);
        };

        self.cache
            .set(&key, &admin.email, Some(ADMIN_EMAIL_TTL))
            .await?;
        Ok(Some(admin.email))
    }
}
