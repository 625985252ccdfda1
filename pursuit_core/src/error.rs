//! Error types for the pursuit controller

use thiserror::Error;

/// Result alias used throughout the crate
pub type PursuitResult<T> = Result<T, PursuitError>;

/// Errors surfaced by the pursuit controller
///
/// The pursuit law itself is infallible; these errors cover configuration
/// rejection and communication setup, all of which happen before the control
/// loop starts ticking.
#[derive(Debug, Error)]
pub enum PursuitError {
    /// Invalid configuration value, rejected before startup
    #[error("Configuration error: {0}")]
    Config(String),

    /// A topic was opened with a message type that differs from the type it
    /// was first registered with
    #[error("Topic '{topic}' is already registered with a different message type")]
    TopicTypeMismatch { topic: String },

    /// Communication setup or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Unexpected internal failure
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl PursuitError {
    /// Convenience constructor for configuration errors
    pub fn config(msg: impl Into<String>) -> Self {
        PursuitError::Config(msg.into())
    }
}
