// --- File: crates/pixrelay_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all PixRelay errors.
///
/// This enum provides a common set of error variants that can be used across all crates.
/// Each crate can extend this by implementing From<SpecificError> for PixRelayError.
#[derive(Error, Debug)]
pub enum PixRelayError {
    /// Error occurred during an HTTP request to an upstream service
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Upstream service answered with a non-success transport status
    #[error("Upstream error ({status}): {message}")]
    UpstreamError { status: u16, message: String },

    /// Upstream service answered 200 but reported a failure of its own
    #[error("{0}")]
    ProviderDeclined(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("{0}")]
    ValidationError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for PixRelayError {
    fn status_code(&self) -> u16 {
        match self {
            PixRelayError::HttpError(_) => 500,
            PixRelayError::UpstreamError { .. } => 500,
            PixRelayError::ProviderDeclined(_) => 400,
            PixRelayError::ParseError(_) => 500,
            PixRelayError::ConfigError(_) => 500,
            PixRelayError::AuthError(_) => 401,
            PixRelayError::ValidationError(_) => 400,
            PixRelayError::InternalError(_) => 500,
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> PixRelayError {
    PixRelayError::ConfigError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> PixRelayError {
    PixRelayError::InternalError(message.to_string())
}
