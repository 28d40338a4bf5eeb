// --- File: crates/pixrelay_sacapay/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use pixrelay_config::AppConfig;
use std::sync::Arc;

use crate::handlers::{
    check_payment_status_handler, create_pix_payment_handler, sacapay_webhook_handler,
    SacapayState,
};
use crate::ledger::{LedgerService, NoopLedger};

/// Creates a router containing all routes for the Sacapay feature, with the
/// default no-op ledger.
pub fn routes(config: Arc<AppConfig>) -> Router {
    routes_with_ledger(config, Arc::new(NoopLedger))
}

/// Creates the Sacapay router with an explicit ledger collaborator.
/// Used by deployments that credit balances on approval.
///
/// The webhook signing secret is resolved from `SACAPAY_WEBHOOK_SECRET` once
/// here, at router construction.
pub fn routes_with_ledger(config: Arc<AppConfig>, ledger: Arc<dyn LedgerService>) -> Router {
    let webhook_secret = std::env::var("SACAPAY_WEBHOOK_SECRET")
        .ok()
        .filter(|s| !s.is_empty());
    router_with_state(Arc::new(SacapayState {
        config,
        ledger,
        webhook_secret,
    }))
}

/// Builds the Sacapay router from fully assembled state.
/// Lets tests inject a webhook secret without touching process environment.
pub fn router_with_state(sacapay_state: Arc<SacapayState>) -> Router {
    Router::new()
        // API endpoint called by our frontend to create the PIX payment
        .route("/create-pix-payment", post(create_pix_payment_handler))
        // Polling endpoint for payment status
        .route(
            "/check-payment-status/{order_id}",
            get(check_payment_status_handler),
        )
        // Endpoint called by the Sacapay SERVER for webhook notifications
        .route("/webhook/sacapay", post(sacapay_webhook_handler))
        .with_state(sacapay_state)
}
