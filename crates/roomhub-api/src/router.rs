//! Route definitions for the RoomHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. Each route
//! group carries an explicit [`RoutePolicy`] extension plus the single guard
//! middleware; routes without a policy are public. Access rules live here,
//! next to the paths, not scattered across handlers.

use axum::{
    Extension, Router,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use roomhub_auth::RoutePolicy;

use crate::handlers;
use crate::middleware::guard::enforce_route_policy;
use crate::state::AppState;

/// Permission code gating meeting room mutations.
pub const PERM_ROOM_MANAGE: &str = "meeting_room:manage";
/// Permission code gating booking review decisions.
pub const PERM_BOOKING_APPROVE: &str = "booking:approve";

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(user_routes(state.clone()))
        .merge(room_routes(state.clone()))
        .merge(booking_routes(state.clone()))
        .merge(statistic_routes(state.clone()))
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Attach a policy and the guard middleware to a route group.
///
/// The `Extension` layer is added after the guard so it wraps it: the policy
/// is present in request extensions by the time the guard runs.
fn with_policy(
    routes: Router<AppState>,
    state: AppState,
    policy: RoutePolicy,
) -> Router<AppState> {
    routes
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            enforce_route_policy,
        ))
        .route_layer(Extension(policy))
}

/// Login surfaces, registration, captcha flows and user administration.
fn user_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/user/login", post(handlers::auth::login))
        .route("/user/admin/login", post(handlers::auth::admin_login))
        .route("/user/refresh", post(handlers::auth::refresh))
        .route("/user/admin/refresh", post(handlers::auth::admin_refresh))
        .route("/user/register", post(handlers::user::register))
        .route(
            "/user/register-captcha",
            get(handlers::user::register_captcha),
        );

    let authenticated = Router::new()
        .route("/user/info", get(handlers::user::info))
        .route(
            "/user/update_password/captcha",
            get(handlers::user::update_password_captcha),
        )
        .route(
            "/user/update_password",
            post(handlers::user::update_password),
        )
        .route(
            "/user/update/captcha",
            get(handlers::user::update_user_captcha),
        )
        .route("/user/update", post(handlers::user::update_profile))
        .route("/user/{id}/freeze", post(handlers::user::freeze))
        .route("/user/list", get(handlers::user::list));

    public.merge(with_policy(
        authenticated,
        state,
        RoutePolicy::login_required(),
    ))
}

/// Meeting room browsing and management.
fn room_routes(state: AppState) -> Router<AppState> {
    let browse = Router::new()
        .route("/meeting-room/list", get(handlers::room::list))
        .route("/meeting-room/{id}", get(handlers::room::get));

    let manage = Router::new()
        .route("/meeting-room/create", post(handlers::room::create))
        .route("/meeting-room/update/{id}", post(handlers::room::update))
        .route("/meeting-room/{id}", delete(handlers::room::delete));

    with_policy(browse, state.clone(), RoutePolicy::login_required()).merge(with_policy(
        manage,
        state,
        RoutePolicy::with_permissions([PERM_ROOM_MANAGE]),
    ))
}

/// Booking proposals, review decisions, release and urge.
fn booking_routes(state: AppState) -> Router<AppState> {
    let booker = Router::new()
        .route("/booking/list", get(handlers::booking::list))
        .route("/booking/add", post(handlers::booking::add))
        .route("/booking/{id}/release", post(handlers::booking::release))
        .route("/booking/{id}/urge", post(handlers::booking::urge));

    let reviewer = Router::new()
        .route("/booking/{id}/approve", post(handlers::booking::approve))
        .route("/booking/{id}/reject", post(handlers::booking::reject));

    with_policy(booker, state.clone(), RoutePolicy::login_required()).merge(with_policy(
        reviewer,
        state,
        RoutePolicy::with_permissions([PERM_BOOKING_APPROVE]),
    ))
}

/// Aggregate statistics for the admin dashboard.
fn statistic_routes(state: AppState) -> Router<AppState> {
    let routes = Router::new()
        .route(
            "/statistic/user-booking-count",
            get(handlers::statistic::user_booking_count),
        )
        .route(
            "/statistic/meeting-room-used-count",
            get(handlers::statistic::meeting_room_used_count),
        );

    with_policy(routes, state, RoutePolicy::login_required())
}

/// Health check endpoints (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use std::time::Duration;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(cors_config.max_age_seconds));

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}
