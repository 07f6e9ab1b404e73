//! Degradation risk assessment models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Overall degradation risk level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    /// Classify a total risk score (0-100)
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            RiskLevel::Critical
        } else if score >= 60.0 {
            RiskLevel::High
        } else if score >= 40.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six degradation risk factors, in aggregation order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Drought,
    Erosion,
    SoilDegradation,
    VegetationLoss,
    TemperatureStress,
    WaterScarcity,
}

impl RiskFactor {
    /// Fixed factor order; also the tie-break order for the primary threat
    pub const ALL: [RiskFactor; 6] = [
        RiskFactor::Drought,
        RiskFactor::Erosion,
        RiskFactor::SoilDegradation,
        RiskFactor::VegetationLoss,
        RiskFactor::TemperatureStress,
        RiskFactor::WaterScarcity,
    ];

    /// Contribution of this factor to the total score. Weights sum to 1.0.
    pub fn weight(&self) -> f64 {
        match self {
            RiskFactor::Drought => 0.25,
            RiskFactor::Erosion => 0.20,
            RiskFactor::SoilDegradation => 0.20,
            RiskFactor::VegetationLoss => 0.15,
            RiskFactor::TemperatureStress => 0.10,
            RiskFactor::WaterScarcity => 0.10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFactor::Drought => "drought",
            RiskFactor::Erosion => "erosion",
            RiskFactor::SoilDegradation => "soil_degradation",
            RiskFactor::VegetationLoss => "vegetation_loss",
            RiskFactor::TemperatureStress => "temperature_stress",
            RiskFactor::WaterScarcity => "water_scarcity",
        }
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of vegetation health
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskTrend {
    Improving,
    Worsening,
    Stable,
}

impl RiskTrend {
    pub fn from_ndvi_trend(ndvi_trend: f64) -> Self {
        if ndvi_trend > 5.0 {
            RiskTrend::Improving
        } else if ndvi_trend < -5.0 {
            RiskTrend::Worsening
        } else {
            RiskTrend::Stable
        }
    }
}

/// Factor breakdown attached to an assessment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskFactorSummary {
    /// Factors scoring 70 or above
    pub critical_factors: Vec<RiskFactor>,
    pub primary_threat: RiskFactor,
    pub trend: RiskTrend,
}

/// Full degradation risk assessment for a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    pub total_risk_score: f64,
    pub risk_level: RiskLevel,
    pub drought_risk: f64,
    pub erosion_risk: f64,
    pub soil_degradation_risk: f64,
    pub vegetation_loss_risk: f64,
    pub temperature_stress_risk: f64,
    pub water_scarcity_risk: f64,
    pub risk_factors: RiskFactorSummary,
    pub assessment_date: NaiveDate,
}

impl RiskAssessment {
    /// Sub-score for a single factor
    pub fn score(&self, factor: RiskFactor) -> f64 {
        match factor {
            RiskFactor::Drought => self.drought_risk,
            RiskFactor::Erosion => self.erosion_risk,
            RiskFactor::SoilDegradation => self.soil_degradation_risk,
            RiskFactor::VegetationLoss => self.vegetation_loss_risk,
            RiskFactor::TemperatureStress => self.temperature_stress_risk,
            RiskFactor::WaterScarcity => self.water_scarcity_risk,
        }
    }

    /// Weighted sum of the six sub-scores as stored
    pub fn weighted_sum(&self) -> f64 {
        RiskFactor::ALL
            .iter()
            .map(|f| self.score(*f) * f.weight())
            .sum()
    }
}

/// Dashboard colour for a risk score: green (0) through yellow (50) to red (100)
pub fn risk_color(score: f64) -> String {
    let normalized = if score.is_nan() {
        0.0
    } else {
        (score / 100.0).clamp(0.0, 1.0)
    };

    let (r, g) = if normalized < 0.5 {
        ((255.0 * normalized * 2.0) as u8, 255u8)
    } else {
        (255u8, (255.0 * (2.0 - normalized * 2.0)) as u8)
    };

    format!("#{:02x}{:02x}00", r, g)
}
