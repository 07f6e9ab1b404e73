//! Domain models for the TerraGuard platform

mod climate;
mod land_health;
mod location;
mod recommendation;
mod risk;

pub use climate::*;
pub use land_health::*;
pub use location::*;
pub use recommendation::*;
pub use risk::*;
