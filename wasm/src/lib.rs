//! WebAssembly module for the TerraGuard dashboard
//!
//! Provides client-side computation for:
//! - Degradation risk scoring
//! - Risk level classification and map colouring
//! - Offline rule-based recommendations
//! - Coordinate validation

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use shared::{
    calculate_risk, rule_based_recommendations, validate_coordinates, ClimateRecord,
    LandHealthSnapshot, LocationMeta, RiskAssessment, RiskLevel,
};

/// Observations posted from the dashboard
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RiskInput {
    climate: Vec<ClimateRecord>,
    land_health: LandHealthSnapshot,
    location: LocationMeta,
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("TerraGuard scoring module loaded"));
}

/// Calculate a degradation risk assessment; returns the assessment as JSON
#[wasm_bindgen]
pub fn calculate_degradation_risk(input_json: &str) -> Result<String, JsValue> {
    assess(input_json).map_err(|e| JsValue::from_str(&e))
}

/// Risk level name for a total score
#[wasm_bindgen]
pub fn classify_risk_level(score: f64) -> String {
    RiskLevel::from_score(score).to_string()
}

/// Hex colour for a risk score
#[wasm_bindgen]
pub fn risk_score_color(score: f64) -> String {
    shared::risk_color(score)
}

/// Rule-based recommendations for an assessment, as a JSON array
#[wasm_bindgen]
pub fn rule_based_recommendations_json(
    risk_json: &str,
    land_health_json: &str,
) -> Result<String, JsValue> {
    recommend(risk_json, land_health_json).map_err(|e| JsValue::from_str(&e))
}

/// Validate map coordinates
#[wasm_bindgen]
pub fn is_valid_coordinates(latitude: f64, longitude: f64) -> bool {
    validate_coordinates(latitude, longitude).is_ok()
}

/// Current time in milliseconds, for cache stamping on the dashboard
#[wasm_bindgen]
pub fn now_millis() -> f64 {
    js_sys::Date::now()
}

fn assess(input_json: &str) -> Result<String, String> {
    let input: RiskInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid input JSON: {}", e))?;

    let assessment = calculate_risk(&input.climate, &input.land_health, &input.location);
    serde_json::to_string(&assessment).map_err(|e| e.to_string())
}

fn recommend(risk_json: &str, land_health_json: &str) -> Result<String, String> {
    let risk: RiskAssessment =
        serde_json::from_str(risk_json).map_err(|e| format!("Invalid assessment JSON: {}", e))?;
    let land_health: LandHealthSnapshot = serde_json::from_str(land_health_json)
        .map_err(|e| format!("Invalid land health JSON: {}", e))?;

    let recommendations = rule_based_recommendations(&risk, &land_health);
    serde_json::to_string(&recommendations).map_err(|e| e.to_string())
}
