//! HTTP handlers for risk assessment endpoints

use axum::Json;
use shared::RiskAssessment;

use crate::error::AppResult;
use crate::services::{AssessRiskInput, RiskService};

/// Score observations for a single location
pub async fn assess_risk(Json(input): Json<AssessRiskInput>) -> AppResult<Json<RiskAssessment>> {
    let assessment = RiskService::new().assess(&input)?;
    Ok(Json(assessment))
}
