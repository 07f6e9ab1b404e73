//! Errors raised while reading generated recommendation text

use thiserror::Error;

/// Failure to turn model output into recommendations
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("No JSON array found in generated text")]
    NoJsonArray,

    #[error("Generated text is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Field {field} has a non-numeric value: {value}")]
    InvalidNumber { field: &'static str, value: String },
}
