//! Climate data models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A daily climate reading, observed or forecast
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimateRecord {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, alias = "temperature")]
    pub temp_avg: Option<f64>,
    #[serde(default)]
    pub temp_max: Option<f64>,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default, alias = "rainfall")]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub is_forecast: bool,
}

impl ClimateRecord {
    /// Forecast record with the fields the risk factors look at
    pub fn forecast(temp_max: f64, precipitation: f64) -> Self {
        Self {
            temp_max: Some(temp_max),
            precipitation: Some(precipitation),
            is_forecast: true,
            ..Default::default()
        }
    }
}

/// Forecast-flagged records in input order
pub fn forecast_records(records: &[ClimateRecord]) -> impl Iterator<Item = &ClimateRecord> {
    records.iter().filter(|r| r.is_forecast)
}

/// Summary of a forecast window used in prompts
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ForecastSummary {
    pub avg_temperature: f64,
    pub total_precipitation: f64,
}

impl ForecastSummary {
    /// Average temperature and summed precipitation across all supplied records.
    /// Missing values count as zero.
    pub fn from_records(records: &[ClimateRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let temp_sum: f64 = records.iter().map(|r| r.temp_avg.unwrap_or(0.0)).sum();
        let total_precipitation = records.iter().map(|r| r.precipitation.unwrap_or(0.0)).sum();

        Self {
            avg_temperature: temp_sum / records.len() as f64,
            total_precipitation,
        }
    }
}
