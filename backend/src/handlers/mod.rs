//! HTTP handlers for the TerraGuard API

pub mod health;
pub mod recommendation;
pub mod risk;

pub use health::*;
pub use recommendation::*;
pub use risk::*;
