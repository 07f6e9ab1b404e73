//! HTTP handlers for recommendation and assessment endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{
    calculate_risk, ClimateRecord, LandHealthSnapshot, LocationMeta, Recommendation,
    RecommendationRecord, RecommendationStatus, RiskAssessment,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::risk::{land_health_is_valid, location_is_valid};
use crate::services::{AssessRiskInput, AssessmentOutcome, AssessmentService, UpdateStatusInput};
use crate::AppState;

/// Input for ad-hoc recommendation generation
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRecommendationsInput {
    #[serde(default)]
    #[validate(custom = "location_is_valid")]
    pub location: LocationMeta,
    #[serde(default)]
    #[validate(custom = "land_health_is_valid")]
    pub land_health: LandHealthSnapshot,
    #[serde(default)]
    pub climate_forecast: Vec<ClimateRecord>,
    /// Computed from the other fields when absent
    pub risk_assessment: Option<RiskAssessment>,
}

#[derive(Debug, Serialize)]
pub struct GenerateRecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
    pub ai_powered: bool,
}

/// Generate recommendations without persisting them
pub async fn generate_recommendations(
    State(state): State<AppState>,
    Json(input): Json<GenerateRecommendationsInput>,
) -> AppResult<Json<GenerateRecommendationsResponse>> {
    input.validate()?;

    let risk = match input.risk_assessment {
        Some(risk) => risk,
        None => calculate_risk(&input.climate_forecast, &input.land_health, &input.location),
    };

    let recommendations = state
        .generator
        .generate_recommendations(
            &input.location,
            &risk,
            &input.land_health,
            &input.climate_forecast,
        )
        .await;

    Ok(Json(GenerateRecommendationsResponse {
        recommendations,
        ai_powered: state.generator.is_ai_powered(),
    }))
}

/// Run the full pipeline for a location
pub async fn assess_location(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
    Json(input): Json<AssessRiskInput>,
) -> AppResult<Json<AssessmentOutcome>> {
    let service = AssessmentService::new(state.generator.clone(), state.sink.clone());
    let outcome = service.assess(location_id, &input).await?;
    Ok(Json(outcome))
}

/// Query parameters for listing recommendations
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub status: Option<String>,
}

/// List stored recommendations for a location
pub async fn list_recommendations(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<RecommendationRecord>>> {
    let status = match query.status.as_deref() {
        Some(value) => Some(RecommendationStatus::parse(value).ok_or_else(|| {
            AppError::validation("status", format!("Unknown status '{}'", value))
        })?),
        None => None,
    };

    let service = AssessmentService::new(state.generator.clone(), state.sink.clone());
    let records = service.list_recommendations(location_id, status)?;
    Ok(Json(records))
}

/// Update the status of a stored recommendation
pub async fn update_recommendation_status(
    State(state): State<AppState>,
    Path(recommendation_id): Path<Uuid>,
    Json(input): Json<UpdateStatusInput>,
) -> AppResult<Json<RecommendationRecord>> {
    let status = input.parse()?;

    let service = AssessmentService::new(state.generator.clone(), state.sink.clone());
    let record = service.update_status(recommendation_id, status)?;
    Ok(Json(record))
}
