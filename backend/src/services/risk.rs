//! Risk assessment service

use serde::Deserialize;
use shared::{
    calculate_risk, is_valid_ndvi, validate_location, ClimateRecord, LandHealthSnapshot,
    LocationMeta, RiskAssessment,
};
use validator::{Validate, ValidationError};

use crate::error::AppResult;

/// Observations for one location
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AssessRiskInput {
    #[serde(default)]
    pub climate: Vec<ClimateRecord>,
    #[serde(default)]
    #[validate(custom = "land_health_is_valid")]
    pub land_health: LandHealthSnapshot,
    #[serde(default)]
    #[validate(custom = "location_is_valid")]
    pub location: LocationMeta,
}

pub(crate) fn location_is_valid(location: &LocationMeta) -> Result<(), ValidationError> {
    validate_location(location).map_err(|message| {
        let mut error = ValidationError::new("location");
        error.message = Some(message.into());
        error
    })
}

pub(crate) fn land_health_is_valid(
    land_health: &LandHealthSnapshot,
) -> Result<(), ValidationError> {
    match land_health.ndvi {
        Some(ndvi) if !is_valid_ndvi(ndvi) => {
            let mut error = ValidationError::new("ndvi");
            error.message = Some("NDVI must be between -1 and 1".into());
            Err(error)
        }
        _ => Ok(()),
    }
}

/// Stateless wrapper around the calculator
#[derive(Clone, Default)]
pub struct RiskService;

impl RiskService {
    pub fn new() -> Self {
        Self
    }

    /// Validate the observations and score them
    pub fn assess(&self, input: &AssessRiskInput) -> AppResult<RiskAssessment> {
        input.validate()?;

        let assessment = calculate_risk(&input.climate, &input.land_health, &input.location);

        tracing::info!(
            "Risk for {}: {:.2} ({}), primary threat {}",
            input.location.display_name(),
            assessment.total_risk_score,
            assessment.risk_level,
            assessment.risk_factors.primary_threat
        );

        Ok(assessment)
    }
}
