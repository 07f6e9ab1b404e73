//! Shared types and scoring engine for the TerraGuard land-degradation platform
//!
//! This crate contains the domain models, the degradation-risk calculator and
//! the recommendation rules shared between the backend, the dashboard (via
//! WASM), and other components of the system. Nothing in here performs I/O.

pub mod error;
pub mod models;
pub mod prompt;
pub mod recommendation;
pub mod risk;
pub mod validation;

pub use error::*;
pub use models::*;
pub use prompt::*;
pub use recommendation::*;
pub use risk::*;
pub use validation::*;
