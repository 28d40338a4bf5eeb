// --- File: crates/pixrelay_sacapay/src/error.rs ---
use pixrelay_common::{HttpStatusCode, PixRelayError};
use thiserror::Error;

/// Sacapay-specific error types.
#[derive(Error, Debug)]
pub enum SacapayError {
    /// A required top-level field was absent from the inbound request
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A required client sub-field was absent from the inbound request
    #[error("Missing required client field: {0}")]
    MissingClientField(&'static str),

    /// Error occurred during a Sacapay API request
    #[error("Sacapay API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Sacapay answered 200 but reported `success: false`
    #[error("{0}")]
    ApiError(String),

    /// Sacapay answered with a non-success transport status
    #[error("Sacapay returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Error parsing a Sacapay API response
    #[error("Failed to parse Sacapay API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or incomplete Sacapay configuration
    #[error("Sacapay configuration missing or incomplete")]
    ConfigError,

    /// Webhook signature verification failed
    #[error("Sacapay webhook signature verification failed: {0}")]
    WebhookSignatureError(String),

    /// Internal processing error
    #[error("Internal processing error: {0}")]
    InternalError(String),
}

/// Convert SacapayError to PixRelayError
impl From<SacapayError> for PixRelayError {
    fn from(err: SacapayError) -> Self {
        match err {
            SacapayError::MissingField(_) | SacapayError::MissingClientField(_) => {
                PixRelayError::ValidationError(err.to_string())
            }
            SacapayError::RequestError(e) => PixRelayError::HttpError(e.to_string()),
            SacapayError::ApiError(message) => PixRelayError::ProviderDeclined(message),
            SacapayError::UpstreamStatus { status, body } => PixRelayError::UpstreamError {
                status,
                message: body,
            },
            SacapayError::ParseError(e) => PixRelayError::ParseError(e.to_string()),
            SacapayError::ConfigError => {
                PixRelayError::ConfigError("Sacapay configuration missing or incomplete".to_string())
            }
            SacapayError::WebhookSignatureError(msg) => PixRelayError::AuthError(msg),
            SacapayError::InternalError(msg) => PixRelayError::InternalError(msg),
        }
    }
}

/// Implement HttpStatusCode for SacapayError to provide a consistent way to
/// convert SacapayError to HTTP status codes.
impl HttpStatusCode for SacapayError {
    fn status_code(&self) -> u16 {
        match self {
            SacapayError::MissingField(_) => 400,
            SacapayError::MissingClientField(_) => 400,
            SacapayError::RequestError(_) => 500,
            SacapayError::ApiError(_) => 400,
            SacapayError::UpstreamStatus { .. } => 500,
            SacapayError::ParseError(_) => 500,
            SacapayError::ConfigError => 500,
            SacapayError::WebhookSignatureError(_) => 401,
            SacapayError::InternalError(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        assert_eq!(SacapayError::MissingField("amount").status_code(), 400);
        assert_eq!(SacapayError::MissingClientField("email").status_code(), 400);
        assert_eq!(SacapayError::ApiError("declined".into()).status_code(), 400);
    }

    #[test]
    fn upstream_errors_map_to_500() {
        let err = SacapayError::UpstreamStatus {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.status_code(), 500);
        assert_eq!(SacapayError::ConfigError.status_code(), 500);
    }

    #[test]
    fn missing_field_message_names_the_field() {
        assert_eq!(
            SacapayError::MissingField("amount").to_string(),
            "Missing required field: amount"
        );
        assert_eq!(
            SacapayError::MissingClientField("taxNumber").to_string(),
            "Missing required client field: taxNumber"
        );
    }

    #[test]
    fn conversion_preserves_status_semantics() {
        use pixrelay_common::PixRelayError;

        let err: PixRelayError = SacapayError::MissingField("client").into();
        assert_eq!(err.status_code(), 400);

        let err: PixRelayError = SacapayError::ApiError("insufficient data".into()).into();
        assert_eq!(err.status_code(), 400);

        let err: PixRelayError = SacapayError::UpstreamStatus {
            status: 503,
            body: "unavailable".into(),
        }
        .into();
        assert_eq!(err.status_code(), 500);

        let err: PixRelayError =
            SacapayError::WebhookSignatureError("signature mismatch".into()).into();
        assert_eq!(err.status_code(), 401);
    }
}
