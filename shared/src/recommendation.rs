//! Recommendation rules and generated-response parsing
//!
//! The rule set is the deterministic strategy and the fallback for the
//! generative one: it always yields between one and three recommendations.

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::models::{
    LandHealthSnapshot, Priority, Recommendation, RecommendationCategory, RiskAssessment, RiskLevel,
    Species, DEFAULT_URGENCY_HOURS, MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS,
};

/// Most recommendations returned for one assessment
pub const MAX_RECOMMENDATIONS: usize = 3;

const DEFAULT_RISK_REDUCTION: f64 = 10.0;

// ============================================================================
// Rule-based recommendations
// ============================================================================

/// Evaluate the fixed rule set in order and keep the first three matches
pub fn rule_based_recommendations(
    risk: &RiskAssessment,
    land_health: &LandHealthSnapshot,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let risk_score = risk.total_risk_score;
    let ndvi = land_health.ndvi.unwrap_or(0.5);
    let cover = land_health.vegetation_cover_pct.unwrap_or(50.0);

    if risk_score >= 70.0 || risk.risk_level == RiskLevel::Critical {
        recommendations.push(Recommendation {
            priority: Priority::High,
            category: RecommendationCategory::Restoration,
            action_title: "Urgent: Implement soil conservation measures".to_string(),
            action_description: "High degradation risk detected. Immediately establish contour \
                bunds, plant cover crops, and restrict grazing to prevent further degradation."
                .to_string(),
            urgency_hours: 72,
            expected_risk_reduction: 25.0,
            expected_cost_usd: 500.0,
            recommended_species: None,
        });
    }

    if ndvi < 0.3 || cover < 30.0 {
        recommendations.push(Recommendation {
            priority: Priority::High,
            category: RecommendationCategory::Vegetation,
            action_title: "Restore vegetation cover".to_string(),
            action_description: format!(
                "Low vegetation detected (NDVI: {:.2}). Plant native grass species and \
                 fast-growing trees. Consider agroforestry with Acacia or Moringa species.",
                ndvi
            ),
            urgency_hours: 168,
            expected_risk_reduction: 20.0,
            expected_cost_usd: 300.0,
            recommended_species: Some(vec![
                Species::new("Acacia senegal", "tree"),
                Species::new("Vetiver grass", "grass"),
            ]),
        });
    }

    if risk.drought_risk > 5.0 {
        recommendations.push(Recommendation {
            priority: Priority::High,
            category: RecommendationCategory::Irrigation,
            action_title: "Implement water conservation techniques".to_string(),
            action_description: "High drought risk detected. Install rainwater harvesting \
                systems, apply mulching, and consider drip irrigation for critical crops."
                .to_string(),
            urgency_hours: 120,
            expected_risk_reduction: 18.0,
            expected_cost_usd: 400.0,
            recommended_species: None,
        });
    }

    if risk.erosion_risk > 5.0 {
        recommendations.push(Recommendation {
            priority: Priority::High,
            category: RecommendationCategory::SoilManagement,
            action_title: "Prevent soil erosion".to_string(),
            action_description: "High erosion risk detected. Establish terracing on slopes, \
                plant windbreaks, and use cover crops to protect soil. Avoid bare soil during \
                rainy season."
                .to_string(),
            urgency_hours: 96,
            expected_risk_reduction: 22.0,
            expected_cost_usd: 450.0,
            recommended_species: Some(vec![
                Species::new("Leucaena leucocephala", "tree"),
                Species::new("Napier grass", "grass"),
            ]),
        });
    }

    if (40.0..70.0).contains(&risk_score) {
        recommendations.push(Recommendation {
            priority: Priority::Medium,
            category: RecommendationCategory::Monitoring,
            action_title: "Establish regular monitoring routine".to_string(),
            action_description: "Moderate risk level detected. Set up monthly soil and \
                vegetation monitoring. Track rainfall and adjust management practices \
                accordingly."
                .to_string(),
            urgency_hours: 168,
            expected_risk_reduction: 15.0,
            expected_cost_usd: 100.0,
            recommended_species: None,
        });
    }

    if risk_score < 40.0 {
        recommendations.push(Recommendation {
            priority: Priority::Low,
            category: RecommendationCategory::Monitoring,
            action_title: "Maintain current good practices".to_string(),
            action_description: "Land is in relatively good condition. Continue current \
                management practices and monitor for any changes. Consider introducing \
                nitrogen-fixing plants to improve soil fertility."
                .to_string(),
            urgency_hours: 336,
            expected_risk_reduction: 10.0,
            expected_cost_usd: 50.0,
            recommended_species: Some(vec![
                Species::new("Sesbania sesban", "tree"),
                Species::new("Cowpea", "crop"),
            ]),
        });
    }

    if recommendations.is_empty() {
        recommendations.push(general_assessment());
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

fn general_assessment() -> Recommendation {
    Recommendation {
        priority: Priority::Medium,
        category: RecommendationCategory::General,
        action_title: "Conduct comprehensive land assessment".to_string(),
        action_description: "Perform detailed soil testing, vegetation survey, and water \
            availability assessment to develop targeted management plan."
            .to_string(),
        urgency_hours: DEFAULT_URGENCY_HOURS,
        expected_risk_reduction: 12.0,
        expected_cost_usd: 200.0,
        recommended_species: None,
    }
}

// ============================================================================
// Generated-response parsing
// ============================================================================

/// Extract and clean recommendations from raw model output.
///
/// The JSON array is taken from the first `[` to the last `]`. Elements that
/// are not objects, or that lack a title or description, are dropped. An
/// empty result is `Ok(vec![])`; the caller decides whether to fall back.
pub fn parse_generated_recommendations(text: &str) -> Result<Vec<Recommendation>, ParseError> {
    let start = text.find('[').ok_or(ParseError::NoJsonArray)?;
    let end = text.rfind(']').ok_or(ParseError::NoJsonArray)?;
    if end < start {
        return Err(ParseError::NoJsonArray);
    }

    let items = match serde_json::from_str::<Value>(&text[start..=end])? {
        Value::Array(items) => items,
        _ => return Err(ParseError::NoJsonArray),
    };

    let mut cleaned = Vec::new();
    for item in &items {
        let Value::Object(fields) = item else {
            continue;
        };
        if let Some(recommendation) = clean_generated(fields)? {
            cleaned.push(recommendation);
        }
    }

    cleaned.truncate(MAX_RECOMMENDATIONS);
    Ok(cleaned)
}

fn clean_generated(fields: &Map<String, Value>) -> Result<Option<Recommendation>, ParseError> {
    let text = |key: &str| fields.get(key).and_then(Value::as_str).unwrap_or("");

    let action_title = truncate_chars(text("action_title").trim(), MAX_TITLE_CHARS);
    let action_description =
        truncate_chars(text("action_description").trim(), MAX_DESCRIPTION_CHARS);
    if action_title.is_empty() || action_description.is_empty() {
        return Ok(None);
    }

    let urgency_hours = match coerce_int(fields.get("urgency_hours"), "urgency_hours")? {
        Some(hours) if hours > 0 => hours,
        _ => DEFAULT_URGENCY_HOURS,
    };
    let expected_risk_reduction =
        coerce_float(fields.get("expected_risk_reduction"), "expected_risk_reduction")?
            .unwrap_or(DEFAULT_RISK_REDUCTION)
            .max(0.0);
    let expected_cost_usd = coerce_float(fields.get("expected_cost_usd"), "expected_cost_usd")?
        .unwrap_or(0.0)
        .max(0.0);

    let recommended_species = fields
        .get("recommended_species")
        .filter(|v| v.is_array())
        .and_then(|v| serde_json::from_value::<Vec<Species>>(v.clone()).ok());

    Ok(Some(Recommendation {
        priority: Priority::parse(text("priority")).unwrap_or_default(),
        category: RecommendationCategory::parse(text("category")).unwrap_or_default(),
        action_title,
        action_description,
        urgency_hours,
        expected_risk_reduction,
        expected_cost_usd,
        recommended_species,
    }))
}

fn coerce_int(value: Option<&Value>, field: &'static str) -> Result<Option<i64>, ParseError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Ok(Some(i)),
            None => finite(n.as_f64(), field, value).map(|f| Some(f.trunc() as i64)),
        },
        Some(Value::String(s)) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                Ok(Some(i))
            } else {
                finite(s.parse::<f64>().ok(), field, value).map(|f| Some(f.trunc() as i64))
            }
        }
        Some(other) => Err(invalid_number(field, other)),
    }
}

fn coerce_float(value: Option<&Value>, field: &'static str) -> Result<Option<f64>, ParseError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => finite(n.as_f64(), field, value).map(Some),
        Some(Value::String(s)) => finite(s.trim().parse::<f64>().ok(), field, value).map(Some),
        Some(other) => Err(invalid_number(field, other)),
    }
}

fn finite(
    parsed: Option<f64>,
    field: &'static str,
    raw: Option<&Value>,
) -> Result<f64, ParseError> {
    match parsed {
        Some(f) if f.is_finite() => Ok(f),
        _ => Err(invalid_number(field, raw.unwrap_or(&Value::Null))),
    }
}

fn invalid_number(field: &'static str, value: &Value) -> ParseError {
    ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    }
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RiskFactor, RiskFactorSummary, RiskTrend};
    use chrono::NaiveDate;

    fn assessment(total: f64, level: RiskLevel, drought: f64, erosion: f64) -> RiskAssessment {
        RiskAssessment {
            total_risk_score: total,
            risk_level: level,
            drought_risk: drought,
            erosion_risk: erosion,
            soil_degradation_risk: 0.0,
            vegetation_loss_risk: 0.0,
            temperature_stress_risk: 0.0,
            water_scarcity_risk: 0.0,
            risk_factors: RiskFactorSummary {
                critical_factors: vec![],
                primary_threat: RiskFactor::Drought,
                trend: RiskTrend::Stable,
            },
            assessment_date: NaiveDate::from_ymd_opt(2025, 10, 13).unwrap(),
        }
    }

    fn land(ndvi: f64, cover: f64) -> LandHealthSnapshot {
        LandHealthSnapshot {
            ndvi: Some(ndvi),
            vegetation_cover_pct: Some(cover),
            ..Default::default()
        }
    }

    #[test]
    fn test_critical_risk_leads_with_restoration() {
        let recs = rule_based_recommendations(
            &assessment(75.0, RiskLevel::Critical, 2.0, 2.0),
            &land(0.5, 60.0),
        );

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].category, RecommendationCategory::Restoration);
        assert_eq!(recs[0].urgency_hours, 72);
    }

    #[test]
    fn test_low_risk_maintenance() {
        let recs = rule_based_recommendations(
            &assessment(20.0, RiskLevel::Low, 1.0, 1.0),
            &land(0.6, 70.0),
        );

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Low);
        assert_eq!(recs[0].category, RecommendationCategory::Monitoring);
        assert_eq!(recs[0].recommended_species.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_truncated_to_first_three_in_rule_order() {
        let recs = rule_based_recommendations(
            &assessment(85.0, RiskLevel::Critical, 90.0, 80.0),
            &land(0.1, 10.0),
        );

        let categories: Vec<_> = recs.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                RecommendationCategory::Restoration,
                RecommendationCategory::Vegetation,
                RecommendationCategory::Irrigation,
            ]
        );
    }

    #[test]
    fn test_vegetation_description_interpolates_ndvi() {
        let recs = rule_based_recommendations(
            &assessment(50.0, RiskLevel::Moderate, 0.0, 0.0),
            &land(0.234, 50.0),
        );

        assert_eq!(recs[0].category, RecommendationCategory::Vegetation);
        assert!(recs[0].action_description.contains("NDVI: 0.23"));
        assert_eq!(recs[1].priority, Priority::Medium);
        assert_eq!(recs[1].category, RecommendationCategory::Monitoring);
    }

    #[test]
    fn test_missing_land_health_uses_defaults() {
        let recs = rule_based_recommendations(
            &assessment(45.0, RiskLevel::Moderate, 0.0, 0.0),
            &LandHealthSnapshot::default(),
        );

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].action_title, "Establish regular monitoring routine");
    }

    #[test]
    fn test_nan_score_falls_through_to_general() {
        let recs = rule_based_recommendations(
            &assessment(f64::NAN, RiskLevel::Low, 0.0, 0.0),
            &land(0.6, 70.0),
        );

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, RecommendationCategory::General);
    }

    #[test]
    fn test_parse_embedded_array() {
        let text = r#"Here are my recommendations:
[
  {"priority": "HIGH", "category": "irrigation", "action_title": "Dig zai pits",
   "action_description": "Dig planting pits to capture runoff before the short rains.",
   "urgency_hours": "96", "expected_risk_reduction": 12.5},
  {"priority": "unknown", "action_title": "Mulch fields", "action_description": "Spread crop residue.",
   "urgency_hours": 48.9, "expected_cost_usd": "75",
   "recommended_species": [{"name": "Pigeon pea", "type": "crop"}]}
]
Let me know if you need more."#;

        let recs = parse_generated_recommendations(text).unwrap();
        assert_eq!(recs.len(), 2);

        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].category, RecommendationCategory::Irrigation);
        assert_eq!(recs[0].urgency_hours, 96);
        assert_eq!(recs[0].expected_risk_reduction, 12.5);
        assert_eq!(recs[0].expected_cost_usd, 0.0);
        assert!(recs[0].recommended_species.is_none());

        assert_eq!(recs[1].priority, Priority::Medium);
        assert_eq!(recs[1].category, RecommendationCategory::General);
        assert_eq!(recs[1].urgency_hours, 48);
        assert_eq!(recs[1].expected_risk_reduction, 10.0);
        assert_eq!(recs[1].expected_cost_usd, 75.0);
        assert_eq!(
            recs[1].recommended_species,
            Some(vec![Species::new("Pigeon pea", "crop")])
        );
    }

    #[test]
    fn test_parse_drops_incomplete_elements() {
        let text = r#"[
            {"action_title": "No description"},
            "not an object",
            {"action_title": "", "action_description": "No title"},
            {"action_title": "Plant trees", "action_description": "Plant Grevillea on boundaries."}
        ]"#;

        let recs = parse_generated_recommendations(text).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].action_title, "Plant trees");
        assert_eq!(recs[0].urgency_hours, DEFAULT_URGENCY_HOURS);
    }

    #[test]
    fn test_parse_truncates_text_fields() {
        let long_title = "T".repeat(150);
        let long_description = "é".repeat(700);
        let text = format!(
            r#"[{{"action_title": "{}", "action_description": "{}"}}]"#,
            long_title, long_description
        );

        let recs = parse_generated_recommendations(&text).unwrap();
        assert_eq!(recs[0].action_title.chars().count(), MAX_TITLE_CHARS);
        assert_eq!(recs[0].action_description.chars().count(), MAX_DESCRIPTION_CHARS);
    }

    #[test]
    fn test_parse_clamps_out_of_range_numbers() {
        let text = r#"[{"action_title": "A", "action_description": "B",
            "urgency_hours": -5, "expected_risk_reduction": -3, "expected_cost_usd": -100}]"#;

        let recs = parse_generated_recommendations(text).unwrap();
        assert_eq!(recs[0].urgency_hours, DEFAULT_URGENCY_HOURS);
        assert_eq!(recs[0].expected_risk_reduction, 0.0);
        assert_eq!(recs[0].expected_cost_usd, 0.0);
    }

    #[test]
    fn test_parse_limits_to_three() {
        let item = r#"{"action_title": "A", "action_description": "B"}"#;
        let text = format!("[{}]", vec![item; 5].join(","));

        assert_eq!(parse_generated_recommendations(&text).unwrap().len(), 3);
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!(
            parse_generated_recommendations("I cannot help with that."),
            Err(ParseError::NoJsonArray)
        ));
        assert!(matches!(
            parse_generated_recommendations("] backwards ["),
            Err(ParseError::NoJsonArray)
        ));
        assert!(matches!(
            parse_generated_recommendations("[{\"action_title\": }]"),
            Err(ParseError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_generated_recommendations(
                r#"[{"action_title": "A", "action_description": "B", "urgency_hours": "soon"}]"#
            ),
            Err(ParseError::InvalidNumber { field: "urgency_hours", .. })
        ));
    }

    #[test]
    fn test_parse_empty_array_is_ok() {
        assert!(parse_generated_recommendations("[]").unwrap().is_empty());
    }
}
