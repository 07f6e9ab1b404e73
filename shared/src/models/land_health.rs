//! Land health observation models

use serde::{Deserialize, Serialize};

/// Most recent land-health observation for a location.
///
/// Every field is optional; each risk factor substitutes its own default
/// when a value is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandHealthSnapshot {
    /// Normalized Difference Vegetation Index, 0-1
    #[serde(default)]
    pub ndvi: Option<f64>,
    /// Vegetation cover, 0-100 %
    #[serde(default, alias = "vegetation_cover")]
    pub vegetation_cover_pct: Option<f64>,
    #[serde(default)]
    pub soil_moisture: Option<f64>,
    #[serde(default)]
    pub bare_soil_pct: Option<f64>,
    #[serde(default)]
    pub erosion_risk_score: Option<f64>,
    /// Change in NDVI over the observation window
    #[serde(default)]
    pub ndvi_trend: Option<f64>,
    #[serde(default)]
    pub slope_degrees: Option<f64>,
}
