//! Urge throttle tests with a paused clock.

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use uuid::Uuid;

use common::{MemoryCredentials, RecordingMailer, make_identity};
use roomhub_auth::password::PasswordHasher;
use roomhub_cache::CacheManager;
use roomhub_cache::memory::MemoryCacheProvider;
use roomhub_core::config::MailConfig;
use roomhub_core::config::cache::MemoryCacheConfig;
use roomhub_core::traits::credentials::LoginCredential;
use roomhub_mailer::MailDispatcher;
use roomhub_service::urge::{UrgeOutcome, UrgeThrottle};
use tokio::task::JoinHandle;

fn admin_credential(username: &str) -> LoginCredential {
    LoginCredential {
        identity: make_identity(username, true),
        password_hash: PasswordHasher::new().hash_password("secret123").unwrap(),
        is_frozen: false,
    }
}

struct Harness {
    throttle: UrgeThrottle,
    credentials: Arc<MemoryCredentials>,
    mailer: Arc<RecordingMailer>,
    worker: JoinHandle<()>,
}

fn harness(credentials: MemoryCredentials) -> Harness {
    let cache = CacheManager::from_provider(Arc::new(MemoryCacheProvider::new(
        &MemoryCacheConfig::default(),
    )));
    let mailer = Arc::new(RecordingMailer::default());
    let (dispatcher, worker) = MailDispatcher::spawn(&MailConfig::default(), mailer.clone());
    let credentials = Arc::new(credentials);

    Harness {
        throttle: UrgeThrottle::new(cache, credentials.clone(), dispatcher),
        credentials,
        mailer,
        worker,
    }
}

#[tokio::test]
async fn first_urge_sends_second_is_throttled() {
    let h = harness(MemoryCredentials::with_users(vec![admin_credential("lisi")]));
    let booking_id = Uuid::new_v4();

    assert_eq!(
        h.throttle.try_notify(booking_id).await.unwrap(),
        UrgeOutcome::Sent
    );
    assert_eq!(
        h.throttle.try_notify(booking_id).await.unwrap(),
        UrgeOutcome::Throttled
    );
}

#[tokio::test]
async fn different_bookings_throttle_independently() {
    let h = harness(MemoryCredentials::with_users(vec![admin_credential("lisi")]));

    assert_eq!(
        h.throttle.try_notify(Uuid::new_v4()).await.unwrap(),
        UrgeOutcome::Sent
    );
    assert_eq!(
        h.throttle.try_notify(Uuid::new_v4()).await.unwrap(),
        UrgeOutcome::Sent
    );
}

#[tokio::test(start_paused = true)]
async fn throttle_expires_after_the_window() {
    let h = harness(MemoryCredentials::with_users(vec![admin_credential("lisi")]));
    let booking_id = Uuid::new_v4();

    assert_eq!(
        h.throttle.try_notify(booking_id).await.unwrap(),
        UrgeOutcome::Sent
    );
    assert_eq!(
        h.throttle.try_notify(booking_id).await.unwrap(),
        UrgeOutcome::Throttled
    );

    tokio::time::advance(Duration::from_secs(30 * 60 + 1)).await;

    assert_eq!(
        h.throttle.try_notify(booking_id).await.unwrap(),
        UrgeOutcome::Sent
    );
}

#[tokio::test]
async fn urge_email_goes_to_the_first_admin() {
    let h = harness(MemoryCredentials::with_users(vec![admin_credential("lisi")]));

    h.throttle.try_notify(Uuid::new_v4()).await.unwrap();

    drop(h.throttle);
    h.worker.await.unwrap();

    let sent = h.mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "lisi@example.com");
}

#[tokio::test]
async fn concurrent_urges_admit_exactly_one() {
    let h = harness(MemoryCredentials::with_users(vec![admin_credential("lisi")]));
    let booking_id = Uuid::new_v4();

    let (a, b) = tokio::join!(h.throttle.try_notify(booking_id), h.throttle.try_notify(booking_id));
    let outcomes = [a.unwrap(), b.unwrap()];

    assert_eq!(
        outcomes.iter().filter(|o| **o == UrgeOutcome::Sent).count(),
        1
    );

    drop(h.throttle);
    h.worker.await.unwrap();
    assert_eq!(h.mailer.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn admin_address_is_looked_up_once() {
    let h = harness(MemoryCredentials::with_users(vec![admin_credential("lisi")]));

    h.throttle.try_notify(Uuid::new_v4()).await.unwrap();
    h.throttle.try_notify(Uuid::new_v4()).await.unwrap();
    h.throttle.try_notify(Uuid::new_v4()).await.unwrap();

    assert_eq!(h.credentials.admin_lookups.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_admin_still_opens_the_throttle_window() {
    let h = harness(MemoryCredentials::default());
    let booking_id = Uuid::new_v4();

    assert_eq!(
        h.throttle.try_notify(booking_id).await.unwrap(),
        UrgeOutcome::Sent
    );
    assert_eq!(
        h.throttle.try_notify(booking_id).await.unwrap(),
        UrgeOutcome::Throttled
    );

    drop(h.throttle);
    h.worker.await.unwrap();
    assert!(h.mailer.sent.lock().unwrap().is_empty());
}
