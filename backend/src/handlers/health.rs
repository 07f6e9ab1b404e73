//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub recommendation_strategy: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let strategy = if state.generator.is_ai_powered() {
        "generative"
    } else {
        "rule_based"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        recommendation_strategy: strategy.to_string(),
    })
}

#[derive(Serialize)]
pub struct AiStatusResponse {
    pub ai_powered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Report whether the generative strategy is active
pub async fn ai_status(State(state): State<AppState>) -> Json<AiStatusResponse> {
    Json(AiStatusResponse {
        ai_powered: state.generator.is_ai_powered(),
        model: state.generator.model().map(str::to_string),
    })
}
