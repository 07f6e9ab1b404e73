//! Recommendation rule set and model-output parsing tests
//!
//! Tests for:
//! - Rule evaluation order and truncation
//! - Parsing of free-form model output into recommendations
//! - Record lifecycle (action window, completion)

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use shared::{
    calculate_risk_on, parse_generated_recommendations, rule_based_recommendations,
    ClimateRecord, LandHealthSnapshot, LocationMeta, ParseError, Priority, Recommendation,
    RecommendationCategory, RecommendationRecord, RecommendationStatus, RiskAssessment,
    RiskFactor, RiskFactorSummary, RiskLevel, RiskTrend, MAX_DESCRIPTION_CHARS,
    MAX_RECOMMENDATIONS, MAX_TITLE_CHARS,
};
use uuid::Uuid;

/// Assessment with explicit scores; sub-scores not given are zero
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
        assessment_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    }
}

fn land(ndvi: f64, cover: f64) -> LandHealthSnapshot {
    LandHealthSnapshot {
        ndvi: Some(ndvi),
        vegetation_cover_pct: Some(cover),
        ..Default::default()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Critical plot: restoration comes first
    #[test]
    fn test_critical_plot_starts_with_restoration() {
        let risk = assessment(75.0, RiskLevel::Critical, 2.0, 2.0);
        let recs = rule_based_recommendations(&risk, &land(0.5, 60.0));

        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].category, RecommendationCategory::Restoration);
        assert_eq!(recs[0].urgency_hours, 72);
    }

    /// Healthy plot: a single maintenance recommendation
    #[test]
    fn test_healthy_plot_single_recommendation() {
        let risk = assessment(20.0, RiskLevel::Low, 1.0, 1.0);
        let recs = rule_based_recommendations(&risk, &land(0.6, 70.0));

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Low);
        assert_eq!(recs[0].category, RecommendationCategory::Monitoring);
        assert_eq!(recs[0].recommended_species.as_ref().map(Vec::len), Some(2));
    }

    /// Moderate plot with drought and erosion: evaluation order is kept
    #[test]
    fn test_rule_order_and_truncation() {
        let risk = assessment(55.0, RiskLevel::Moderate, 60.0, 40.0);
        let recs = rule_based_recommendations(&risk, &land(0.2, 20.0));

        let categories: Vec<_> = recs.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                RecommendationCategory::Vegetation,
                RecommendationCategory::Irrigation,
                RecommendationCategory::SoilManagement,
            ]
        );
    }

    /// Vegetation description carries the NDVI to two decimals
    #[test]
    fn test_vegetation_description_mentions_ndvi() {
        let risk = assessment(30.0, RiskLevel::Low, 0.0, 0.0);
        let recs = rule_based_recommendations(&risk, &land(0.123, 80.0));

        assert_eq!(recs[0].category, RecommendationCategory::Vegetation);
        assert!(recs[0].action_description.contains("0.12"));
    }

    /// A NaN total matches no bucket and yields the general fallback
    #[test]
    fn test_nan_total_yields_general() {
        let risk = assessment(f64::NAN, RiskLevel::Low, 0.0, 0.0);
        let recs = rule_based_recommendations(&risk, &land(0.6, 70.0));

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, RecommendationCategory::General);
        assert_eq!(recs[0].priority, Priority::Medium);
    }

    /// Non-JSON model output is a parse failure
    #[test]
    fn test_parse_rejects_prose() {
        let result = parse_generated_recommendations("Sorry, the model is overloaded.");
        assert!(matches!(result, Err(ParseError::NoJsonArray)));
    }

    /// Surrounding prose is ignored and fields are cleaned
    #[test]
    fn test_parse_extracts_array() {
        let long_title = "T".repeat(150);
        let text = format!(
            r#"Sure! Here are my recommendations:
[{{"priority": "High", "category": "SOIL_MANAGEMENT", "action_title": "{}",
   "action_description": "Build stone bunds along contours.", "urgency_hours": -5,
   "expected_risk_reduction": -3, "expected_cost_usd": "250.5",
   "recommended_species": [{{"name": "Vetiver grass", "type": "grass"}}]}},
  "not an object",
  {{"action_title": "Mulch", "action_description": "Cover bare soil."}}]
Let me know if you need more."#,
            long_title
        );

        let recs = parse_generated_recommendations(&text).unwrap();
        assert_eq!(recs.len(), 2);

        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].category, RecommendationCategory::SoilManagement);
        assert_eq!(recs[0].action_title.chars().count(), MAX_TITLE_CHARS);
        assert_eq!(recs[0].urgency_hours, 168);
        assert_eq!(recs[0].expected_risk_reduction, 0.0);
        assert_eq!(recs[0].expected_cost_usd, 250.5);
        assert_eq!(recs[0].recommended_species.as_ref().map(Vec::len), Some(1));

        assert_eq!(recs[1].priority, Priority::Medium);
        assert_eq!(recs[1].category, RecommendationCategory::General);
        assert_eq!(recs[1].expected_risk_reduction, 10.0);
        assert_eq!(recs[1].expected_cost_usd, 0.0);
    }

    /// Uncoercible numbers fail the whole parse
    #[test]
    fn test_parse_rejects_bad_number() {
        let text = r#"[{"action_title": "Terrace", "action_description": "Cut terraces.",
                       "urgency_hours": "soon"}]"#;
        assert!(matches!(
            parse_generated_recommendations(text),
            Err(ParseError::InvalidNumber { field: "urgency_hours", .. })
        ));
    }

    /// Record action window spans the urgency
    #[test]
    fn test_record_window_and_completion() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap();
        let risk = assessment(75.0, RiskLevel::Critical, 2.0, 2.0);
        let rec = rule_based_recommendations(&risk, &land(0.5, 60.0)).remove(0);

        let mut record = RecommendationRecord::new(Uuid::new_v4(), rec, now);
        assert_eq!(record.status, RecommendationStatus::Pending);
        assert_eq!(record.recommended_start_date, now.date_naive());
        assert_eq!(
            record.recommended_end_date,
            (now + Duration::hours(72)).date_naive()
        );

        let later = now + Duration::days(2);
        record.set_status(RecommendationStatus::Completed, later);
        assert_eq!(record.completed_at, Some(later));
    }

    /// Records serialize with the recommendation fields inline
    #[test]
    fn test_record_json_is_flat() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let risk = assessment(20.0, RiskLevel::Low, 1.0, 1.0);
        let rec = rule_based_recommendations(&risk, &land(0.6, 70.0)).remove(0);
        let record = RecommendationRecord::new(Uuid::new_v4(), rec, now);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["priority"], "low");
        assert_eq!(json["recommended_species"][0]["type"], "tree");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn level_strategy() -> impl Strategy<Value = RiskLevel> {
        prop_oneof![
            Just(RiskLevel::Low),
            Just(RiskLevel::Moderate),
            Just(RiskLevel::High),
            Just(RiskLevel::Critical),
        ]
    }

    fn assessment_strategy() -> impl Strategy<Value = RiskAssessment> {
        (0.0..=100.0f64, level_strategy(), 0.0..=100.0f64, 0.0..=100.0f64)
            .prop_map(|(total, level, drought, erosion)| assessment(total, level, drought, erosion))
    }

    fn land_strategy() -> impl Strategy<Value = LandHealthSnapshot> {
        (
            prop::option::of(-1.0..=1.0f64),
            prop::option::of(0.0..=100.0f64),
        )
            .prop_map(|(ndvi, cover)| LandHealthSnapshot {
                ndvi,
                vegetation_cover_pct: cover,
                ..Default::default()
            })
    }

    fn is_complete(rec: &Recommendation) -> bool {
        !rec.action_title.is_empty()
            && !rec.action_description.is_empty()
            && rec.urgency_hours > 0
            && rec.expected_risk_reduction >= 0.0
            && rec.expected_cost_usd >= 0.0
    }

    proptest! {
        /// The rule set always yields between one and three recommendations
        #[test]
        fn prop_rule_count_bounded(risk in assessment_strategy(), land in land_strategy()) {
            let recs = rule_based_recommendations(&risk, &land);
            prop_assert!(!recs.is_empty());
            prop_assert!(recs.len() <= MAX_RECOMMENDATIONS);
            prop_assert!(recs.iter().all(is_complete));
        }

        /// Rules are a pure function of their inputs
        #[test]
        fn prop_rules_deterministic(risk in assessment_strategy(), land in land_strategy()) {
            prop_assert_eq!(
                rule_based_recommendations(&risk, &land),
                rule_based_recommendations(&risk, &land)
            );
        }

        /// Calculated assessments feed the rules without surprises
        #[test]
        fn prop_rules_on_calculated_risk(
            rain in prop::collection::vec(0.0..80.0f64, 0..30),
            ndvi in -1.0..=1.0f64,
            cover in 0.0..=100.0f64,
        ) {
            let climate: Vec<ClimateRecord> = rain
                .iter()
                .map(|mm| ClimateRecord::forecast(30.0, *mm))
                .collect();
            let land = land(ndvi, cover);
            let risk = calculate_risk_on(
                &climate,
                &land,
                &LocationMeta::default(),
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            );

            let recs = rule_based_recommendations(&risk, &land);
            prop_assert!((1..=MAX_RECOMMENDATIONS).contains(&recs.len()));
        }

        /// Parsing arbitrary text never panics and never exceeds the limits
        #[test]
        fn prop_parse_arbitrary_text(text in ".{0,400}") {
            if let Ok(recs) = parse_generated_recommendations(&text) {
                prop_assert!(recs.len() <= MAX_RECOMMENDATIONS);
                prop_assert!(recs.iter().all(is_complete));
            }
        }

        /// Titles and descriptions are truncated by character, not byte
        #[test]
        fn prop_parse_truncates_text(title in "[a-zé ]{1,300}", description in "[a-zü ]{1,900}") {
            prop_assume!(!title.trim().is_empty() && !description.trim().is_empty());
            let text = serde_json::json!([{
                "action_title": title,
                "action_description": description,
            }])
            .to_string();

            let recs = parse_generated_recommendations(&text).unwrap();
            prop_assert_eq!(recs.len(), 1);
            prop_assert!(recs[0].action_title.chars().count() <= MAX_TITLE_CHARS);
            prop_assert!(recs[0].action_description.chars().count() <= MAX_DESCRIPTION_CHARS);
        }

        /// Model output longer than three entries is cut to three
        #[test]
        fn prop_parse_caps_count(count in 1usize..10) {
            let items: Vec<_> = (0..count)
                .map(|i| serde_json::json!({
                    "action_title": format!("Action {}", i),
                    "action_description": "Do the thing.",
                }))
                .collect();
            let text = serde_json::Value::Array(items).to_string();

            let recs = parse_generated_recommendations(&text).unwrap();
            prop_assert_eq!(recs.len(), count.min(MAX_RECOMMENDATIONS));
            prop_assert_eq!(&recs[0].action_title, "Action 0");
        }
    }
}
