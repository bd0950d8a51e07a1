//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use roomhub_auth::password::PasswordHasher;
use roomhub_auth::{AuthGuard, JwtDecoder, JwtEncoder};
use roomhub_cache::CacheManager;
use roomhub_core::config::AppConfig;
use roomhub_database::repositories::{
    BookingRepository, RoomRepository, StatisticRepository, UserRepository,
};
use roomhub_mailer::MailDispatcher;
use roomhub_service::auth::AuthService;
use roomhub_service::booking::{BookingService, SqlBookingStore};
use roomhub_service::room::RoomService;
use roomhub_service::statistic::StatisticService;
use roomhub_service::urge::UrgeThrottle;
use roomhub_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Cache manager (Redis or in-memory).
    pub cache: CacheManager,
    /// The route policy guard.
    pub guard: Arc<AuthGuard>,
    /// Login and token refresh.
    pub auth_service: Arc<AuthService>,
    /// Registration, profiles and user administration.
    pub user_service: Arc<UserService>,
    /// Meeting room management.
    pub room_service: Arc<RoomService>,
    /// The booking engine.
    pub booking_service: Arc<BookingService>,
    /// Urge notifications.
    pub urge_throttle: Arc<UrgeThrottle>,
    /// Aggregate statistics.
    pub statistic_service: Arc<StatisticService>,
}

impl AppState {
    /// Wire up repositories and services over the given infrastructure.
    pub fn build(
        config: Arc<AppConfig>,
        db_pool: PgPool,
        cache: CacheManager,
        mail: MailDispatcher,
    ) -> Self {
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let room_repo = Arc::new(RoomRepository::new(db_pool.clone()));
        let booking_repo = Arc::new(BookingRepository::new(db_pool.clone()));
        let statistic_repo = Arc::new(StatisticRepository::new(db_pool.clone()));

        let hasher = Arc::new(PasswordHasher::new());
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let decoder = Arc::new(JwtDecoder::new(&config.auth));
        let guard = Arc::new(AuthGuard::new(decoder.as_ref().clone()));

        let auth_service = Arc::new(AuthService::new(
            user_repo.clone(),
            hasher.clone(),
            encoder,
            decoder,
        ));
        let user_service = Arc::new(UserService::new(
            user_repo.clone(),
            hasher,
            cache.clone(),
            mail.clone(),
            config.auth.clone(),
        ));
        let room_service = Arc::new(RoomService::new(room_repo.clone()));
        let booking_service = Arc::new(BookingService::new(Arc::new(SqlBookingStore::new(
            booking_repo,
            room_repo,
        ))));
        let urge_throttle = Arc::new(UrgeThrottle::new(cache.clone(), user_repo, mail));
        let statistic_service = Arc::new(StatisticService::new(statistic_repo));

        Self {
            config,
            db_pool,
            cache,
            guard,
            auth_service,
            user_service,
            room_service,
            booking_service,
            urge_throttle,
            statistic_service,
        }
    }
}
