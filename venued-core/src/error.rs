//! Error types for the venued ecosystem.

use thiserror::Error;

/// Errors that can occur in venued operations.
#[derive(Error, Debug)]
pub enum VenuedError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Venue not found: {0}")]
    VenueNotFound(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider '{0}' not found in PATH")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for venued operations.
pub type VenuedResult<T> = Result<T, VenuedError>;
