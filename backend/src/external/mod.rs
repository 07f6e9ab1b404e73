//! External API integrations

pub mod huggingface;

pub use huggingface::{HuggingFaceClient, TextGenerationBackend};
