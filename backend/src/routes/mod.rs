//! Route definitions for the TerraGuard API

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/risk/assess", post(handlers::assess_risk))
        .route("/recommendations/generate", post(handlers::generate_recommendations))
        .route(
            "/recommendations/:recommendation_id/status",
            put(handlers::update_recommendation_status),
        )
        .nest("/locations", location_routes())
        .route("/ai/status", get(handlers::ai_status))
}

/// Per-location assessment routes
fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/:location_id/assessments", post(handlers::assess_location))
        .route("/:location_id/recommendations", get(handlers::list_recommendations))
}
