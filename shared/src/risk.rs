//! Degradation risk calculator
//!
//! Six independent sub-scores, each clamped to 0-100, are combined with fixed
//! weights into a total score. Missing inputs fall back to per-factor
//! defaults, so the calculator always produces a complete assessment.

use chrono::{NaiveDate, Utc};

use crate::models::{
    forecast_records, ClimateRecord, LandHealthSnapshot, LocationMeta, RiskAssessment, RiskFactor,
    RiskFactorSummary, RiskLevel, RiskTrend,
};

/// Sub-score at or above which a factor is reported as critical
pub const CRITICAL_FACTOR_THRESHOLD: f64 = 70.0;

const DROUGHT_WINDOW: usize = 30;
const SHORT_WINDOW: usize = 7;

const DEFAULT_NDVI: f64 = 0.5;
const DEFAULT_VEGETATION_COVER: f64 = 50.0;
const DEFAULT_SOIL_MOISTURE: f64 = 20.0;
const DEFAULT_BARE_SOIL: f64 = 30.0;
const DEFAULT_SLOPE: f64 = 5.0;

/// Calculate degradation risk dated today (UTC)
pub fn calculate_risk(
    climate: &[ClimateRecord],
    land_health: &LandHealthSnapshot,
    location: &LocationMeta,
) -> RiskAssessment {
    calculate_risk_on(climate, land_health, location, Utc::now().date_naive())
}

/// Calculate degradation risk for a fixed assessment date
pub fn calculate_risk_on(
    climate: &[ClimateRecord],
    land_health: &LandHealthSnapshot,
    location: &LocationMeta,
    assessment_date: NaiveDate,
) -> RiskAssessment {
    let scores = SubScores::calculate(climate, land_health, location).rounded();

    // Total, level and factors all come from the emitted (rounded) scores
    let total = round2(
        RiskFactor::ALL
            .iter()
            .map(|f| scores.get(*f) * f.weight())
            .sum(),
    );

    let critical_factors = RiskFactor::ALL
        .iter()
        .copied()
        .filter(|f| scores.get(*f) >= CRITICAL_FACTOR_THRESHOLD)
        .collect();

    RiskAssessment {
        total_risk_score: total,
        risk_level: RiskLevel::from_score(total),
        drought_risk: scores.drought,
        erosion_risk: scores.erosion,
        soil_degradation_risk: scores.soil_degradation,
        vegetation_loss_risk: scores.vegetation_loss,
        temperature_stress_risk: scores.temperature_stress,
        water_scarcity_risk: scores.water_scarcity,
        risk_factors: RiskFactorSummary {
            critical_factors,
            primary_threat: scores.primary_threat(),
            trend: RiskTrend::from_ndvi_trend(land_health.ndvi_trend.unwrap_or(0.0)),
        },
        assessment_date,
    }
}

/// The six sub-scores of one assessment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub drought: f64,
    pub erosion: f64,
    pub soil_degradation: f64,
    pub vegetation_loss: f64,
    pub temperature_stress: f64,
    pub water_scarcity: f64,
}

impl SubScores {
    pub fn calculate(
        climate: &[ClimateRecord],
        land_health: &LandHealthSnapshot,
        location: &LocationMeta,
    ) -> Self {
        Self {
            drought: drought_risk(climate),
            erosion: erosion_risk(climate, land_health, location),
            soil_degradation: soil_degradation_risk(climate, land_health),
            vegetation_loss: vegetation_loss_risk(climate, land_health),
            temperature_stress: temperature_stress_risk(climate),
            water_scarcity: water_scarcity_risk(climate, land_health),
        }
    }

    /// Each score rounded to 2 decimals, as emitted in an assessment
    pub fn rounded(&self) -> Self {
        Self {
            drought: round2(self.drought),
            erosion: round2(self.erosion),
            soil_degradation: round2(self.soil_degradation),
            vegetation_loss: round2(self.vegetation_loss),
            temperature_stress: round2(self.temperature_stress),
            water_scarcity: round2(self.water_scarcity),
        }
    }

    pub fn get(&self, factor: RiskFactor) -> f64 {
        match factor {
            RiskFactor::Drought => self.drought,
            RiskFactor::Erosion => self.erosion,
            RiskFactor::SoilDegradation => self.soil_degradation,
            RiskFactor::VegetationLoss => self.vegetation_loss,
            RiskFactor::TemperatureStress => self.temperature_stress,
            RiskFactor::WaterScarcity => self.water_scarcity,
        }
    }

    /// Highest-scoring factor; ties resolve to the earlier factor
    pub fn primary_threat(&self) -> RiskFactor {
        let mut primary = RiskFactor::Drought;
        for factor in RiskFactor::ALL.iter().skip(1) {
            if self.get(*factor) > self.get(primary) {
                primary = *factor;
            }
        }
        primary
    }
}

/// Drought risk from forecast rainfall over the next 30 forecast days
pub fn drought_risk(climate: &[ClimateRecord]) -> f64 {
    let forecast: Vec<&ClimateRecord> = forecast_records(climate).take(DROUGHT_WINDOW).collect();
    if forecast.is_empty() {
        return 50.0;
    }

    let total_rainfall: f64 = forecast.iter().map(|r| r.precipitation.unwrap_or(0.0)).sum();

    let risk = if total_rainfall < 20.0 {
        100.0
    } else if total_rainfall < 50.0 {
        80.0
    } else if total_rainfall < 100.0 {
        60.0
    } else if total_rainfall < 150.0 {
        30.0
    } else {
        10.0
    };

    clamp_score(risk)
}

/// Erosion risk from heavy rain, ground cover, slope and the observed erosion score
pub fn erosion_risk(
    climate: &[ClimateRecord],
    land_health: &LandHealthSnapshot,
    location: &LocationMeta,
) -> f64 {
    let mut risk = 0.0;

    let max_daily_rain = forecast_records(climate)
        .take(SHORT_WINDOW)
        .map(|r| r.precipitation.unwrap_or(0.0))
        .fold(None, max_of)
        .unwrap_or(0.0);

    if max_daily_rain > 50.0 {
        risk += 40.0;
    } else if max_daily_rain > 30.0 {
        risk += 25.0;
    } else if max_daily_rain > 15.0 {
        risk += 10.0;
    }

    let cover = land_health.vegetation_cover_pct.unwrap_or(DEFAULT_VEGETATION_COVER);
    if cover < 20.0 {
        risk += 30.0;
    } else if cover < 40.0 {
        risk += 20.0;
    } else if cover < 60.0 {
        risk += 10.0;
    }

    let slope = land_health
        .slope_degrees
        .or(location.slope)
        .unwrap_or(DEFAULT_SLOPE);
    if slope > 20.0 {
        risk += 20.0;
    } else if slope > 10.0 {
        risk += 10.0;
    } else if slope > 5.0 {
        risk += 5.0;
    }

    risk += land_health.erosion_risk_score.unwrap_or(0.0) * 0.1;

    clamp_score(risk)
}

/// Soil degradation risk from vegetation health, moisture, heat and bare ground
pub fn soil_degradation_risk(climate: &[ClimateRecord], land_health: &LandHealthSnapshot) -> f64 {
    let mut risk = 0.0;

    let ndvi = land_health.ndvi.unwrap_or(DEFAULT_NDVI);
    if ndvi < 0.2 {
        risk += 40.0;
    } else if ndvi < 0.4 {
        risk += 25.0;
    } else if ndvi < 0.6 {
        risk += 10.0;
    }

    let moisture = land_health.soil_moisture.unwrap_or(DEFAULT_SOIL_MOISTURE);
    if moisture < 10.0 {
        risk += 30.0;
    } else if moisture < 15.0 {
        risk += 20.0;
    } else if moisture < 20.0 {
        risk += 10.0;
    }

    let max_temp = forecast_records(climate)
        .take(SHORT_WINDOW)
        .map(|r| r.temp_max.unwrap_or(25.0))
        .fold(None, max_of)
        .unwrap_or(25.0);
    if max_temp > 35.0 {
        risk += 20.0;
    } else if max_temp > 30.0 {
        risk += 10.0;
    }

    risk += land_health.bare_soil_pct.unwrap_or(DEFAULT_BARE_SOIL) * 0.2;

    clamp_score(risk)
}

/// Vegetation loss risk from NDVI level, NDVI trend and drought
pub fn vegetation_loss_risk(climate: &[ClimateRecord], land_health: &LandHealthSnapshot) -> f64 {
    let mut risk = 0.0;

    let ndvi = land_health.ndvi.unwrap_or(DEFAULT_NDVI);
    if ndvi < 0.3 {
        risk += 50.0;
    } else if ndvi < 0.5 {
        risk += 30.0;
    }

    let trend = land_health.ndvi_trend.unwrap_or(0.0);
    if trend < -10.0 {
        risk += 30.0;
    } else if trend < -5.0 {
        risk += 20.0;
    } else if trend < 0.0 {
        risk += 10.0;
    }

    risk += drought_risk(climate) * 0.2;

    clamp_score(risk)
}

/// Temperature stress from hot days in the coming week
pub fn temperature_stress_risk(climate: &[ClimateRecord]) -> f64 {
    let forecast: Vec<&ClimateRecord> = forecast_records(climate).take(SHORT_WINDOW).collect();
    if forecast.is_empty() {
        return 20.0;
    }

    let temp_max = |r: &&ClimateRecord| r.temp_max.unwrap_or(0.0);
    let days_above_32 = forecast.iter().filter(|r| temp_max(r) > 32.0).count();
    let days_above_35 = forecast.iter().filter(|r| temp_max(r) > 35.0).count();

    clamp_score((days_above_32 * 10 + days_above_35 * 15) as f64)
}

/// Water scarcity from drought outlook and soil moisture deficit
pub fn water_scarcity_risk(climate: &[ClimateRecord], land_health: &LandHealthSnapshot) -> f64 {
    let moisture = land_health.soil_moisture.unwrap_or(DEFAULT_SOIL_MOISTURE);
    let moisture_deficit = if moisture < 30.0 {
        (30.0 - moisture) * 3.0
    } else {
        0.0
    };

    clamp_score(drought_risk(climate) * 0.6 + moisture_deficit * 0.4)
}

/// Clamp to 0-100; NaN becomes 0
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

fn max_of(acc: Option<f64>, value: f64) -> Option<f64> {
    Some(match acc {
        Some(current) if current >= value => current,
        _ => value,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
