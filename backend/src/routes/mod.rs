//! Route definitions for the Fitness RPG API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod calculators;
mod health;
mod plans;
mod profile;
mod progression;
mod xp;

pub use calculators::calculator_routes;
pub use plans::plan_routes;
pub use profile::profile_routes;
pub use xp::xp_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config().server.request_timeout_secs);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Fitness RPG API v1" }))
        .nest("/calculators", calculators::calculator_routes())
        .nest("/xp", xp::xp_routes())
        .nest("/levels", progression::level_routes())
        .nest("/ranks", progression::rank_routes())
        .nest("/classes", progression::class_routes())
        .nest("/achievements", progression::achievement_routes())
        .nest("/profile", profile::profile_routes())
        .nest("/plans", plans::plan_routes())
}
