//! Error types for Haven

use thiserror::Error;

/// Application-level Haven error type
///
/// Domain and repository errors live next to the types that raise them
/// (`domain::StoreError`, `services::ServiceError`); this taxonomy covers
/// the plumbing around them.
#[derive(Debug, Error)]
pub enum HavenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, HavenError>;
