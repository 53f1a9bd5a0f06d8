// Typed errors with thiserror. Surface meaningful messages to JS.

use thiserror::Error;

/// Engine error types.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        EngineError::Dataset(err.to_string())
    }
}
