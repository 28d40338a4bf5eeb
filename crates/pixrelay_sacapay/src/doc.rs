// File: crates/pixrelay_sacapay/src/doc.rs
#![allow(dead_code)] // Allow dead code for doc functions

#[cfg(feature = "openapi")]
use crate::logic::{
    ClientInfo, CreatePixPaymentRequest, CreatePixPaymentResponse, PaymentStatusResponse,
    WebhookAck,
};
#[cfg(feature = "openapi")]
use utoipa::OpenApi;

// Dummy functions carrying the handler attributes for utoipa

#[cfg(feature = "openapi")]
#[utoipa::path(
    post,
    path = "/api/create-pix-payment",
    request_body = CreatePixPaymentRequest,
    responses(
        (status = 200, description = "PIX payment created", body = CreatePixPaymentResponse),
        (status = 400, description = "Missing required field, or payment declined by Sacapay"),
        (status = 500, description = "Internal server error or Sacapay transport error")
    ),
    tag = "Sacapay"
)]
fn doc_create_pix_payment_handler() {}

#[cfg(feature = "openapi")]
#[utoipa::path(
    get,
    path = "/api/check-payment-status/{order_id}",
    params(("order_id" = String, Path, description = "Sacapay order identifier")),
    responses(
        (status = 200, description = "Current payment status", body = PaymentStatusResponse),
        (status = 500, description = "Internal server error or Sacapay transport error")
    ),
    tag = "Sacapay"
)]
fn doc_check_payment_status_handler() {}

#[cfg(feature = "openapi")]
#[utoipa::path(
    post,
    path = "/api/webhook/sacapay",
    responses(
        (status = 200, description = "Webhook acknowledged", body = WebhookAck),
        (status = 401, description = "Webhook signature verification failed"),
        (status = 500, description = "Internal server error processing webhook")
    ),
    tag = "Sacapay Webhooks"
)]
fn doc_sacapay_webhook_handler() {}

#[cfg(feature = "openapi")]
#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_pix_payment_handler,
        doc_check_payment_status_handler,
        doc_sacapay_webhook_handler
    ),
    components(schemas(
        CreatePixPaymentRequest,
        ClientInfo,
        CreatePixPaymentResponse,
        PaymentStatusResponse,
        WebhookAck
    )),
    tags(
        (name = "Sacapay", description = "Sacapay PIX Payment API")
    )
)]
pub struct SacapayApiDoc;
