//! Prompt construction for generated recommendations

use crate::models::{ClimateRecord, ForecastSummary, LandHealthSnapshot, LocationMeta, RiskAssessment};

const OUTPUT_TEMPLATE: &str = r#"[
  {
    "priority": "high|medium|low",
    "category": "restoration|irrigation|soil_management|vegetation|monitoring",
    "action_title": "Brief title (max 50 chars)",
    "action_description": "Detailed action plan (max 200 chars)",
    "urgency_hours": 168,
    "expected_risk_reduction": 15.5,
    "expected_cost_usd": 250.0
  }
]"#;

/// Build the instruction prompt asking the model for a JSON array of 2-3 recommendations
pub fn build_recommendation_prompt(
    location: &LocationMeta,
    risk: &RiskAssessment,
    land_health: &LandHealthSnapshot,
    climate_forecast: &[ClimateRecord],
) -> String {
    let forecast = ForecastSummary::from_records(climate_forecast);
    let ndvi = land_health.ndvi.unwrap_or(0.0);
    let cover = land_health.vegetation_cover_pct.unwrap_or(0.0);

    format!(
        "You are an expert land management consultant specializing in land degradation \
prevention and restoration in Africa. Analyze the following data and provide 2-3 specific, \
actionable recommendations.

Location: {location}
Risk Level: {level} (Score: {score:.1}/100)
Vegetation Index (NDVI): {ndvi:.3}
Vegetation Cover: {cover:.1}%
Average Temperature (7-day): {avg_temp:.1}°C
Total Precipitation (7-day): {precip:.1}mm

Specific Risk Factors:
- Drought Risk: {drought:.1}
- Erosion Risk: {erosion:.1}
- Soil Degradation: {soil:.1}
- Vegetation Loss: {vegetation:.1}
- Temperature Stress: {temperature:.1}
- Water Scarcity: {water:.1}

Provide 2-3 recommendations in the following JSON format only, no other text:
{template}

Focus on practical, cost-effective actions suitable for African smallholder farmers.",
        location = location.display_name(),
        level = risk.risk_level,
        score = risk.total_risk_score,
        ndvi = ndvi,
        cover = cover,
        avg_temp = forecast.avg_temperature,
        precip = forecast.total_precipitation,
        drought = risk.drought_risk,
        erosion = risk.erosion_risk,
        soil = risk.soil_degradation_risk,
        vegetation = risk.vegetation_loss_risk,
        temperature = risk.temperature_stress_risk,
        water = risk.water_scarcity_risk,
        template = OUTPUT_TEMPLATE,
    )
}
