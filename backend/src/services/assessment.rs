//! Assessment pipeline: score a location, recommend actions, persist them
//!
//! Records go to a [`RecommendationSink`]. Saves are independent of each
//! other; a partial failure is reported, a total failure is an error.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    calculate_risk, forecast_records, ClimateRecord, RecommendationRecord, RecommendationStatus,
    RiskAssessment,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::TextGenerationBackend;
use crate::services::recommendation::RecommendationGenerator;
use crate::services::risk::AssessRiskInput;

/// Storage for generated recommendation records
pub trait RecommendationSink: Send + Sync {
    fn save(&self, record: RecommendationRecord) -> AppResult<()>;

    /// Records for a location in insertion order, optionally filtered by status
    fn list_for_location(
        &self,
        location_id: Uuid,
        status: Option<RecommendationStatus>,
    ) -> AppResult<Vec<RecommendationRecord>>;

    fn update_status(
        &self,
        id: Uuid,
        status: RecommendationStatus,
        now: DateTime<Utc>,
    ) -> AppResult<RecommendationRecord>;
}

/// Process-local sink
#[derive(Default)]
pub struct InMemorySink {
    records: RwLock<Vec<RecommendationRecord>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Persistence("Recommendation store lock poisoned".to_string())
}

impl RecommendationSink for InMemorySink {
    fn save(&self, record: RecommendationRecord) -> AppResult<()> {
        self.records.write().map_err(poisoned)?.push(record);
        Ok(())
    }

    fn list_for_location(
        &self,
        location_id: Uuid,
        status: Option<RecommendationStatus>,
    ) -> AppResult<Vec<RecommendationRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records
            .iter()
            .filter(|r| r.location_id == location_id)
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect())
    }

    fn update_status(
        &self,
        id: Uuid,
        status: RecommendationStatus,
        now: DateTime<Utc>,
    ) -> AppResult<RecommendationRecord> {
        let mut records = self.records.write().map_err(poisoned)?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound("Recommendation".to_string()))?;

        record.set_status(status, now);
        Ok(record.clone())
    }
}

/// Result of a full location assessment
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentOutcome {
    pub risk_assessment: RiskAssessment,
    pub saved: Vec<RecommendationRecord>,
    pub failed_saves: usize,
}

/// Status change request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusInput {
    #[validate(length(min = 1, max = 32, message = "Status must be 1-32 characters"))]
    pub status: String,
}

impl UpdateStatusInput {
    pub fn parse(&self) -> AppResult<RecommendationStatus> {
        self.validate()?;
        RecommendationStatus::parse(&self.status).ok_or_else(|| {
            AppError::validation(
                "status",
                format!(
                    "Unknown status '{}' (expected pending, in_progress, completed or dismissed)",
                    self.status
                ),
            )
        })
    }
}

/// Forecast-flagged records, in input order
pub fn climate_forecast(records: &[ClimateRecord]) -> Vec<ClimateRecord> {
    forecast_records(records).cloned().collect()
}

/// Assessment pipeline service
#[derive(Clone)]
pub struct AssessmentService<G> {
    generator: RecommendationGenerator<G>,
    sink: Arc<dyn RecommendationSink>,
}

impl<G: TextGenerationBackend> AssessmentService<G> {
    pub fn new(generator: RecommendationGenerator<G>, sink: Arc<dyn RecommendationSink>) -> Self {
        Self { generator, sink }
    }

    /// Score the location, generate recommendations and persist them
    pub async fn assess(
        &self,
        location_id: Uuid,
        input: &AssessRiskInput,
    ) -> AppResult<AssessmentOutcome> {
        input.validate()?;

        let risk_assessment = calculate_risk(&input.climate, &input.land_health, &input.location);
        let forecast = climate_forecast(&input.climate);

        let recommendations = self
            .generator
            .generate_recommendations(
                &input.location,
                &risk_assessment,
                &input.land_health,
                &forecast,
            )
            .await;

        let now = Utc::now();
        let mut saved = Vec::with_capacity(recommendations.len());
        let mut failed_saves = 0;

        for recommendation in recommendations {
            let record = RecommendationRecord::new(location_id, recommendation, now);
            match self.sink.save(record.clone()) {
                Ok(()) => saved.push(record),
                Err(e) => {
                    tracing::warn!("Failed to save recommendation for {}: {}", location_id, e);
                    failed_saves += 1;
                }
            }
        }

        if saved.is_empty() {
            return Err(AppError::Persistence(format!(
                "No recommendations could be saved for location {}",
                location_id
            )));
        }

        tracing::info!(
            "Assessed location {}: risk {:.2} ({}), {} recommendations saved, {} failed",
            location_id,
            risk_assessment.total_risk_score,
            risk_assessment.risk_level,
            saved.len(),
            failed_saves
        );

        Ok(AssessmentOutcome {
            risk_assessment,
            saved,
            failed_saves,
        })
    }

    pub fn list_recommendations(
        &self,
        location_id: Uuid,
        status: Option<RecommendationStatus>,
    ) -> AppResult<Vec<RecommendationRecord>> {
        self.sink.list_for_location(location_id, status)
    }

    pub fn update_status(
        &self,
        id: Uuid,
        status: RecommendationStatus,
    ) -> AppResult<RecommendationRecord> {
        let record = self.sink.update_status(id, status, Utc::now())?;
        tracing::info!("Recommendation {} is now {:?}", id, record.status);
        Ok(record)
    }
}
