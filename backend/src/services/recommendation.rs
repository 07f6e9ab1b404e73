//! Recommendation generation service
//!
//! Produces 1-3 land management recommendations for an assessed location,
//! using a text-generation model when one is configured and the fixed
//! rule set otherwise or whenever the model output is unusable.

use shared::{
    build_recommendation_prompt, parse_generated_recommendations, rule_based_recommendations,
    ClimateRecord, LandHealthSnapshot, LocationMeta, Recommendation, RiskAssessment,
};

use crate::config::AiConfig;
use crate::error::AppResult;
use crate::external::{HuggingFaceClient, TextGenerationBackend};

/// How recommendations are produced
#[derive(Clone)]
pub enum RecommendationStrategy<G> {
    /// Ask a text-generation backend, falling back to rules on any failure
    Generative(G),
    /// Rules only
    RuleBased,
}

/// Recommendation generator with an injected strategy
#[derive(Clone)]
pub struct RecommendationGenerator<G = HuggingFaceClient> {
    strategy: RecommendationStrategy<G>,
}

impl RecommendationGenerator<HuggingFaceClient> {
    /// Generative when an API token is configured, rule-based otherwise
    pub fn from_config(config: &AiConfig) -> AppResult<Self> {
        match config.token() {
            Some(token) => {
                let client = HuggingFaceClient::new(config, token.to_string())?;
                tracing::info!("AI recommendations enabled (model: {})", config.model);
                Ok(Self::new(RecommendationStrategy::Generative(client)))
            }
            None => {
                tracing::warn!(
                    "No inference API token configured, using rule-based recommendations"
                );
                Ok(Self::new(RecommendationStrategy::RuleBased))
            }
        }
    }
}

impl<G: TextGenerationBackend> RecommendationGenerator<G> {
    pub fn new(strategy: RecommendationStrategy<G>) -> Self {
        Self { strategy }
    }

    pub fn rule_based() -> Self {
        Self::new(RecommendationStrategy::RuleBased)
    }

    /// Whether a generative backend is in use
    pub fn is_ai_powered(&self) -> bool {
        matches!(self.strategy, RecommendationStrategy::Generative(_))
    }

    /// Model identifier of the generative backend, if any
    pub fn model(&self) -> Option<&str> {
        match &self.strategy {
            RecommendationStrategy::Generative(backend) => Some(backend.model()),
            RecommendationStrategy::RuleBased => None,
        }
    }

    /// Generate recommendations. Never fails; every fault ends in the rule set.
    pub async fn generate_recommendations(
        &self,
        location: &LocationMeta,
        risk: &RiskAssessment,
        land_health: &LandHealthSnapshot,
        climate_forecast: &[ClimateRecord],
    ) -> Vec<Recommendation> {
        let backend = match &self.strategy {
            RecommendationStrategy::Generative(backend) => backend,
            RecommendationStrategy::RuleBased => {
                return rule_based_recommendations(risk, land_health);
            }
        };

        let prompt = build_recommendation_prompt(location, risk, land_health, climate_forecast);

        let text = match backend.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Text generation failed for {}: {}", location.display_name(), e);
                return rule_based_recommendations(risk, land_health);
            }
        };

        match parse_generated_recommendations(&text) {
            Ok(recommendations) if !recommendations.is_empty() => {
                tracing::debug!(
                    "Generated {} AI recommendations for {}",
                    recommendations.len(),
                    location.display_name()
                );
                recommendations
            }
            Ok(_) => {
                tracing::warn!("Model returned no usable recommendations, using rules");
                rule_based_recommendations(risk, land_health)
            }
            Err(e) => {
                tracing::warn!("Could not parse model output: {}", e);
                rule_based_recommendations(risk, land_health)
            }
        }
    }
}
