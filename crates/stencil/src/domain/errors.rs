//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// `prompt` absent, empty, or not a string
    #[error("Missing prompt")]
    MissingPrompt,

    #[error("Rate limited by model provider")]
    RateLimited,

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl DomainError {
    pub fn external<T: std::fmt::Display>(err: T) -> Self {
        Self::ExternalService(err.to_string())
    }
}
