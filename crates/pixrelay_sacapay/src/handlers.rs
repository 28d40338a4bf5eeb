// --- File: crates/pixrelay_sacapay/src/handlers.rs ---
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use pixrelay_common::{config_error, internal_error, PixRelayError};
use pixrelay_config::{AppConfig, SacapayConfig};
use std::sync::Arc;
use tracing::{error, warn};

use crate::ledger::LedgerService;
use crate::logic::{
    create_pix_order, get_order_status, process_webhook, verify_webhook_signature,
    CreatePixPaymentRequest, CreatePixPaymentResponse, PaymentStatusResponse,
    SacapayWebhookPayload, WebhookAck, WEBHOOK_SIGNATURE_HEADER,
};

// --- State for Sacapay Handlers ---
#[derive(Clone)]
pub struct SacapayState {
    pub config: Arc<AppConfig>,
    pub ledger: Arc<dyn LedgerService>,
    /// Shared webhook signing secret, resolved once at router construction.
    /// `None` disables signature verification (development posture).
    pub webhook_secret: Option<String>,
}

fn sacapay_config(state: &SacapayState) -> Result<&SacapayConfig, PixRelayError> {
    if !state.config.use_sacapay {
        return Err(config_error("Sacapay service is disabled."));
    }
    state
        .config
        .sacapay
        .as_ref()
        .ok_or_else(|| config_error("Sacapay configuration not loaded."))
}

/// Axum handler to create a PIX payment via Sacapay.
#[axum::debug_handler]
pub async fn create_pix_payment_handler(
    State(state): State<Arc<SacapayState>>,
    payload: Result<Json<CreatePixPaymentRequest>, JsonRejection>,
) -> Result<Json<CreatePixPaymentResponse>, PixRelayError> {
    let config = sacapay_config(&state)?;

    // A body that does not deserialize at all is an internal failure of the
    // caller's making, not a named-field validation error.
    let Json(request) =
        payload.map_err(|e| internal_error(format!("Invalid request body: {}", e)))?;

    let response = create_pix_order(config, request).await?;
    Ok(Json(response))
}

/// Axum handler to check the status of a PIX payment.
#[axum::debug_handler]
pub async fn check_payment_status_handler(
    State(state): State<Arc<SacapayState>>,
    Path(order_id): Path<String>,
) -> Result<Json<PaymentStatusResponse>, PixRelayError> {
    let config = sacapay_config(&state)?;
    let response = get_order_status(config, &order_id).await?;
    Ok(Json(response))
}

/// Axum handler for Sacapay webhook notifications.
///
/// Verifies the body signature when a webhook secret is configured; without
/// a secret the webhook is accepted with a warning. Acknowledges with
/// `{"success": true}` in every non-error case so the provider stops retrying.
#[axum::debug_handler]
pub async fn sacapay_webhook_handler(
    State(state): State<Arc<SacapayState>>,
    headers: HeaderMap,
    body: String, // Raw body for signature verification
) -> Response {
    match state.webhook_secret.as_deref() {
        Some(secret) => {
            let signature = headers
                .get(WEBHOOK_SIGNATURE_HEADER)
                .and_then(|h| h.to_str().ok());
            if let Err(e) = verify_webhook_signature(body.as_bytes(), signature, secret) {
                warn!("Rejected Sacapay webhook: {}", e);
                return PixRelayError::from(e).into_response();
            }
        }
        None => {
            warn!("SACAPAY_WEBHOOK_SECRET not set; accepting webhook without verification");
        }
    }

    let payload: SacapayWebhookPayload = match serde_json::from_str(&body) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to deserialize Sacapay webhook payload: {}", e);
            return internal_error(format!("Invalid webhook payload: {}", e)).into_response();
        }
    };

    match process_webhook(payload, state.ledger.as_ref()).await {
        Ok(()) => (StatusCode::OK, Json(WebhookAck { success: true })).into_response(),
        Err(e) => {
            error!("Error processing Sacapay webhook: {}", e);
            PixRelayError::from(e).into_response()
        }
    }
}
