//! Bounded mail dispatch queue.
//!
//! Request handlers enqueue and move on; a single worker task owns the
//! transport and delivers with bounded retries. A message that exhausts its
//! attempts is logged and dropped, never retried forever.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use roomhub_core::config::MailConfig;
use roomhub_core::error::AppError;
use roomhub_core::result::AppResult;
use roomhub_core::traits::mailer::{Mailer, OutboundEmail};

/// Handle for enqueuing outbound mail.
#[derive(Debug, Clone)]
pub struct MailDispatcher {
    sender: mpsc::Sender<OutboundEmail>,
}

impl MailDispatcher {
    /// Spawn the delivery worker and return the dispatcher handle.
    ///
    /// The worker stops once every dispatcher handle is dropped and the
    /// queue has drained.
    pub fn spawn(config: &MailConfig, mailer: Arc<dyn Mailer>) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(config.queue_capacity);
        let worker = tokio::spawn(run_worker(
            receiver,
            mailer,
            config.max_attempts,
            Duration::from_millis(config.retry_delay_ms),
        ));
        (Self { sender }, worker)
    }

    /// Enqueue a message for delivery.
    ///
    /// Fails fast when the queue is full instead of backpressuring the
    /// request handler.
    pub fn enqueue(&self, mail: OutboundEmail) -> AppResult<()> {
        self.sender.try_send(mail).map_err(|e| match e {
            mpsc::error::TrySendError::Full(mail) => {
                warn!(to = %mail.to, "Mail queue full, dropping message");
                AppError::mail("Mail queue is full")
            }
            mpsc::error::TrySendError::Closed(_) => {
                AppError::mail("Mail dispatcher has shut down")
            }
        })
    }
}

async fn run_worker(
    mut receiver: mpsc::Receiver<OutboundEmail>,
    mailer: Arc<dyn Mailer>,
    max_attempts: u32,
    retry_delay: Duration,
) {
    while let Some(mail) = receiver.recv().await {
        deliver_with_retries(mailer.as_ref(), &mail, max_attempts, retry_delay).await;
    }
    debug!("Mail dispatcher worker stopped");
}

async fn deliver_with_retries(
    mailer: &dyn Mailer,
    mail: &OutboundEmail,
    max_attempts: u32,
    retry_delay: Duration,
) {
    for attempt in 1..=max_attempts {
        match mailer.send(mail).await {
            Ok(()) => {
                debug!(to = %mail.to, subject = %mail.subject, attempt, "Email delivered");
                return;
            }
            Err(e) if attempt < max_attempts => {
                warn!(to = %mail.to, attempt, error = %e, "Email delivery failed, retrying");
                tokio::time::sleep(retry_delay).await;
            }
            Err(e) => {
                error!(to = %mail.to, attempts = max_attempts, error = %e, "Giving up on email");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<OutboundEmail>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, mail: &OutboundEmail) -> AppResult<()> {
            self.sent.lock().unwrap().push(mail.clone());
            Ok(())
        }
    }

    /// Fails a fixed number of times before succeeding.
    #[derive(Debug)]
    struct FlakyMailer {
        failures_left: AtomicU32,
        attempts: AtomicU32,
    }

    #[async_trait]
    impl Mailer for FlakyMailer {
        async fn send(&self, _mail: &OutboundEmail) -> AppResult<()> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            if self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                Err(AppError::mail("SMTP relay unavailable"))
            } else {
                Ok(())
            }
        }
    }

    fn mail() -> OutboundEmail {
        OutboundEmail {
            to: "admin@example.com".to_string(),
            subject: "Booking urge".to_string(),
            html_body: "<p>please review</p>".to_string(),
        }
    }

    fn config() -> MailConfig {
        MailConfig {
            retry_delay_ms: 1,
            ..MailConfig::default()
        }
    }

    #[tokio::test]
    async fn enqueued_mail_is_delivered() {
        let mailer = Arc::new(RecordingMailer::default());
        let (dispatcher, worker) = MailDispatcher::spawn(&config(), mailer.clone());

        dispatcher.enqueue(mail()).unwrap();
        drop(dispatcher);
        worker.await.unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "admin@example.com");
    }

    #[tokio::test]
    async fn transient_failures_are_retried() {
        let mailer = Arc::new(FlakyMailer {
            failures_left: AtomicU32::new(2),
            attempts: AtomicU32::new(0),
        });
        let (dispatcher, worker) = MailDispatcher::spawn(&config(), mailer.clone());

        dispatcher.enqueue(mail()).unwrap();
        drop(dispatcher);
        worker.await.unwrap();

        assert_eq!(mailer.attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn worker_gives_up_after_max_attempts() {
        let mailer = Arc::new(FlakyMailer {
            failures_left: AtomicU32::new(u32::MAX),
            attempts: AtomicU32::new(0),
        });
        let (dispatcher, worker) = MailDispatcher::spawn(&config(), mailer.clone());

        dispatcher.enqueue(mail()).unwrap();
        drop(dispatcher);
        worker.await.unwrap();

        // max_attempts from the default config
        assert_eq!(mailer.attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn full_queue_rejects_without_blocking() {
        let mailer = Arc::new(RecordingMailer::default());
        let config = MailConfig {
            queue_capacity: 1,
            ..config()
        };
        // Never start the worker: the single slot stays occupied.
        let (sender, _receiver) = mpsc::channel(config.queue_capacity);
        let dispatcher = MailDispatcher { sender };

        dispatcher.enqueue(mail()).unwrap();
        let err = dispatcher.enqueue(mail()).unwrap_err();
        assert_eq!(err.kind, roomhub_core::error::ErrorKind::Mail);
        drop(mailer);
    }
}
