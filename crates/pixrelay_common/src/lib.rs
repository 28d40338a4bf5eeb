// --- File: crates/pixrelay_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared wire models

// Re-export error types and utilities for easier access
pub use error::{config_error, internal_error, HttpStatusCode, PixRelayError};

// Re-export HTTP utilities for easier access
pub use http::{client::HTTP_CLIENT, IntoHttpResponse};

// Re-export the shared error envelope
pub use models::ErrorResponse;
