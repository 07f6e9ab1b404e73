//! Land management recommendation models

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const DEFAULT_URGENCY_HOURS: i64 = 168;

/// Recommendation priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Parse a priority name case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// Kind of intervention
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Restoration,
    Irrigation,
    SoilManagement,
    Vegetation,
    Monitoring,
    #[default]
    General,
}

impl RecommendationCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "restoration" => Some(Self::Restoration),
            "irrigation" => Some(Self::Irrigation),
            "soil_management" => Some(Self::SoilManagement),
            "vegetation" => Some(Self::Vegetation),
            "monitoring" => Some(Self::Monitoring),
            "general" => Some(Self::General),
            _ => None,
        }
    }
}

/// Suggested species for planting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Species {
    pub name: String,
    #[serde(rename = "type")]
    pub species_type: String,
}

impl Species {
    pub fn new(name: &str, species_type: &str) -> Self {
        Self {
            name: name.to_string(),
            species_type: species_type.to_string(),
        }
    }
}

/// A prioritized land management action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: RecommendationCategory,
    pub action_title: String,
    pub action_description: String,
    pub urgency_hours: i64,
    pub expected_risk_reduction: f64,
    pub expected_cost_usd: f64,
    pub recommended_species: Option<Vec<Species>>,
}

/// Lifecycle status of a stored recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Dismissed,
}

impl RecommendationStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "dismissed" => Some(Self::Dismissed),
            _ => None,
        }
    }
}

/// Recommendation as handed to the persistence sink
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRecord {
    pub id: Uuid,
    pub location_id: Uuid,
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub status: RecommendationStatus,
    pub recommended_start_date: NaiveDate,
    pub recommended_end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl RecommendationRecord {
    /// Build a pending record; the action window spans `urgency_hours` from `now`
    pub fn new(location_id: Uuid, recommendation: Recommendation, now: DateTime<Utc>) -> Self {
        let end = now + Duration::hours(recommendation.urgency_hours);

        Self {
            id: Uuid::new_v4(),
            location_id,
            status: RecommendationStatus::Pending,
            recommended_start_date: now.date_naive(),
            recommended_end_date: end.date_naive(),
            created_at: now,
            completed_at: None,
            recommendation,
        }
    }

    /// Apply a status update; completing stamps `completed_at`
    pub fn set_status(&mut self, status: RecommendationStatus, now: DateTime<Utc>) {
        self.status = status;
        if status == RecommendationStatus::Completed {
            self.completed_at = Some(now);
        }
    }
}
