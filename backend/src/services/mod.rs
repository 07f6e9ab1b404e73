//! Business logic services for the TerraGuard platform

pub mod assessment;
pub mod recommendation;
pub mod risk;

pub use assessment::{
    AssessmentOutcome, AssessmentService, InMemorySink, RecommendationSink, UpdateStatusInput,
};
pub use recommendation::RecommendationGenerator;
pub use risk::{AssessRiskInput, RiskService};
