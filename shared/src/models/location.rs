//! Monitored location models

use serde::{Deserialize, Serialize};

/// Location metadata consumed by the scoring engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Terrain slope in degrees, used when land health carries none
    #[serde(default)]
    pub slope: Option<f64>,
}

impl LocationMeta {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: Some(name.into()),
            latitude: Some(latitude),
            longitude: Some(longitude),
            slope: None,
        }
    }

    /// Display name, falling back to a placeholder
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Unknown Location")
    }
}
