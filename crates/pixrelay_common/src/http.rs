// --- File: crates/pixrelay_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{HttpStatusCode, PixRelayError};
use crate::models::ErrorResponse;

// Include the client module
pub mod client;

/// Extension trait for PixRelayError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for PixRelayError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Every error leaves the service as the same JSON envelope
        let body = Json(ErrorResponse::new(self.to_string()));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for PixRelayError to make it easier to use in Axum handlers.
impl IntoResponse for PixRelayError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
