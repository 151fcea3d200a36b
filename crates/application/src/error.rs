//! Application-level errors

use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The address book rejected the configured credentials
    #[error("Invalid authentication")]
    InvalidAuth,

    /// The address book could not be reached or answered unexpectedly
    #[error("Cannot connect: {0}")]
    CannotConnect(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}
