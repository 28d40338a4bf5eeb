// --- File: crates/pixrelay_sacapay/src/logic.rs ---

use hmac::{Hmac, Mac};
use pixrelay_common::HTTP_CLIENT;
use pixrelay_config::SacapayConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::collections::HashMap;
use tracing::{error, info, warn};

use crate::error::SacapayError;
use crate::ledger::LedgerService;
use crate::qr;

// Conditionally import ToSchema if openapi feature is enabled
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Provider constants ---

/// Header carrying the private API token on every outbound Sacapay call.
pub const PRIVATE_TOKEN_HEADER: &str = "x-token-private";
/// Header carrying the HMAC-SHA256 signature of inbound webhook bodies.
pub const WEBHOOK_SIGNATURE_HEADER: &str = "x-sacapay-signature";

const DEFAULT_PRODUCT_NAME: &str = "Depósito PIX";
const DEFAULT_SELL_URL: &str = "https://pixrelay.app";

fn private_token() -> Result<String, SacapayError> {
    std::env::var("SACAPAY_PRIVATE_TOKEN").map_err(|_| SacapayError::ConfigError)
}

// --- Data Structures ---

/// Represents a request received by our backend to create a PIX payment.
///
/// Required fields are modeled as `Option` so that validation can name the
/// missing field in the error instead of failing opaquely at deserialization.
#[derive(Deserialize, Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreatePixPaymentRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>, example = 25.0))]
    pub amount: Option<Decimal>,
    #[serde(rename = "productName")]
    pub product_name: Option<String>,
    #[serde(rename = "sellUrl")]
    pub sell_url: Option<String>,
    pub client: Option<ClientInfo>,
    #[serde(rename = "postBackUrl")]
    pub post_back_url: Option<String>,
}

/// Payer identification. All four fields are required by validation.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ClientInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "taxNumber")]
    pub tax_number: Option<String>,
    pub phone: Option<String>,
}

// --- Structures for the Sacapay API payload ---

#[derive(Serialize, Debug)]
struct SacapayOrderPayload<'a> {
    amount: Decimal,
    #[serde(rename = "productName")]
    product_name: &'a str,
    #[serde(rename = "sellUrl")]
    sell_url: &'a str,
    #[serde(rename = "paymentType")]
    payment_type: &'a str,
    client: OrderClient,
    #[serde(rename = "postBackUrl", skip_serializing_if = "Option::is_none")]
    post_back_url: Option<&'a str>,
}

#[derive(Serialize, Debug)]
struct OrderClient {
    name: String,
    email: String,
    #[serde(rename = "taxNumber")]
    tax_number: String,
    phone: String,
}

// --- Structures for the Sacapay API response (order creation) ---

#[derive(Deserialize, Debug)]
struct SacapayApiResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    // Sacapay wraps the order fields in an `object` envelope
    #[serde(default)]
    object: Option<SacapayOrder>,
}

#[derive(Deserialize, Debug, Default)]
struct SacapayOrder {
    #[serde(rename = "orderId")]
    order_id: Option<String>,
    pix: Option<String>,
    // Undocumented formats upstream; forwarded verbatim
    expire: Option<serde_json::Value>,
    value: Option<serde_json::Value>,
    status: Option<String>,
}

// --- Structures for responses to our callers ---

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreatePixPaymentResponse {
    pub success: bool,
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
    /// Base64-encoded PNG of the PIX QR code, or null if rendering failed
    #[serde(rename = "qrCode")]
    pub qr_code: Option<String>,
    /// The raw PIX code for copy/paste
    #[serde(rename = "pixKey")]
    pub pix_key: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub expire: Option<serde_json::Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub value: Option<serde_json::Value>,
    pub status: Option<String>,
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PaymentStatusResponse {
    pub success: bool,
    #[serde(rename = "orderId")]
    pub order_id: String,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub status: Option<serde_json::Value>,
    /// The provider's full status payload, passed through untouched
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub data: serde_json::Value,
}

/// Acknowledgement body returned to Sacapay for every accepted webhook.
#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct WebhookAck {
    pub success: bool,
}

// --- Webhook payload ---

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SacapayWebhookPayload {
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

// --- Validation ---

fn validate_request(
    request: &CreatePixPaymentRequest,
) -> Result<(Decimal, OrderClient), SacapayError> {
    let amount = request.amount.ok_or(SacapayError::MissingField("amount"))?;
    let client = request
        .client
        .as_ref()
        .ok_or(SacapayError::MissingField("client"))?;

    let name = client
        .name
        .clone()
        .ok_or(SacapayError::MissingClientField("name"))?;
    let email = client
        .email
        .clone()
        .ok_or(SacapayError::MissingClientField("email"))?;
    let tax_number = client
        .tax_number
        .clone()
        .ok_or(SacapayError::MissingClientField("taxNumber"))?;
    let phone = client
        .phone
        .clone()
        .ok_or(SacapayError::MissingClientField("phone"))?;

    Ok((
        amount,
        OrderClient {
            name,
            email,
            tax_number,
            phone,
        },
    ))
}

// --- Core Logic Functions ---

/// Creates a PIX order with Sacapay and renders its payment code as a QR image.
///
/// QR rendering failure is non-fatal: the response is still returned with
/// `qr_code: None`.
pub async fn create_pix_order(
    config: &SacapayConfig,
    request: CreatePixPaymentRequest,
) -> Result<CreatePixPaymentResponse, SacapayError> {
    let (amount, client) = validate_request(&request)?;

    let product_name = request
        .product_name
        .as_deref()
        .or(config.product_name.as_deref())
        .unwrap_or(DEFAULT_PRODUCT_NAME);
    let sell_url = request
        .sell_url
        .as_deref()
        .or(config.sell_url.as_deref())
        .unwrap_or(DEFAULT_SELL_URL);

    let payload = SacapayOrderPayload {
        amount,
        product_name,
        sell_url,
        payment_type: "Pix",
        client,
        post_back_url: request.post_back_url.as_deref(),
    };

    let token = private_token()?;
    let api_url = format!(
        "{}/api/Order/External/Create",
        config.base_url.trim_end_matches('/')
    );
    info!("Creating Sacapay PIX order via {}", api_url);

    let response = HTTP_CLIENT
        .post(&api_url)
        .header(PRIVATE_TOKEN_HEADER, token)
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    let body_text = response.text().await?;

    if !status.is_success() {
        error!(
            "Sacapay order creation failed with HTTP {}: {}",
            status, body_text
        );
        return Err(SacapayError::UpstreamStatus {
            status: status.as_u16(),
            body: body_text,
        });
    }

    let api_response: SacapayApiResponse = serde_json::from_str(&body_text)?;

    if !api_response.success {
        let message = api_response
            .message
            .unwrap_or_else(|| "Unknown Sacapay API error".to_string());
        warn!("Sacapay declined order creation: {}", message);
        return Err(SacapayError::ApiError(message));
    }

    let order = api_response.object.unwrap_or_default();
    let qr_code = order.pix.as_deref().and_then(qr::render_base64_png);

    info!(
        "Sacapay PIX order created: orderId={:?}, status={:?}",
        order.order_id, order.status
    );

    Ok(CreatePixPaymentResponse {
        success: true,
        order_id: order.order_id,
        qr_code,
        pix_key: order.pix,
        expire: order.expire,
        value: order.value,
        status: order.status,
        message: api_response.message,
    })
}

/// Queries Sacapay for the status of an order and passes the payload through.
pub async fn get_order_status(
    config: &SacapayConfig,
    order_id: &str,
) -> Result<PaymentStatusResponse, SacapayError> {
    let token = private_token()?;
    let api_url = format!(
        "{}/api/Order/External/GetOrderStatusById/{}",
        config.base_url.trim_end_matches('/'),
        order_id
    );

    let response = HTTP_CLIENT
        .get(&api_url)
        .header(PRIVATE_TOKEN_HEADER, token)
        .send()
        .await?;

    let status = response.status();
    let body_text = response.text().await?;

    if !status.is_success() {
        error!(
            "Sacapay status query for {} failed with HTTP {}: {}",
            order_id, status, body_text
        );
        return Err(SacapayError::UpstreamStatus {
            status: status.as_u16(),
            body: body_text,
        });
    }

    let data: serde_json::Value = serde_json::from_str(&body_text)?;

    Ok(PaymentStatusResponse {
        success: true,
        order_id: order_id.to_string(),
        status: data.get("status").cloned(),
        data,
    })
}

// --- Webhook Processing Logic ---

/// Verifies the HMAC-SHA256 signature of an incoming Sacapay webhook request.
///
/// The signature is the hex-encoded HMAC of the raw request body, keyed with
/// the shared webhook secret.
pub fn verify_webhook_signature(
    payload_bytes: &[u8],
    signature_header: Option<&str>,
    secret: &str,
) -> Result<(), SacapayError> {
    let provided = signature_header.ok_or_else(|| {
        SacapayError::WebhookSignatureError(format!(
            "Missing {} header",
            WEBHOOK_SIGNATURE_HEADER
        ))
    })?;

    type HmacSha256 = Hmac<Sha256>;
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| {
        SacapayError::WebhookSignatureError("Invalid webhook secret format for HMAC".to_string())
    })?;
    mac.update(payload_bytes);
    let calculated = hex::encode(mac.finalize().into_bytes());

    if constant_time_eq(calculated.as_bytes(), provided.as_bytes()) {
        Ok(())
    } else {
        Err(SacapayError::WebhookSignatureError(
            "Signature mismatch".to_string(),
        ))
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Processes a Sacapay webhook notification.
///
/// `"Paid"` and `"Approved"` both mark an approval and trigger the ledger
/// collaborator; every other status is only logged.
pub async fn process_webhook(
    payload: SacapayWebhookPayload,
    ledger: &dyn LedgerService,
) -> Result<(), SacapayError> {
    info!(
        "Processing Sacapay webhook: orderId={:?}, status={:?}",
        payload.order_id, payload.status
    );

    match payload.status.as_deref() {
        Some("Paid") | Some("Approved") => {
            let order_id = payload.order_id.as_deref().unwrap_or("<unknown>");
            info!("Payment {} approved", order_id);
            ledger
                .credit_on_approval(order_id, webhook_amount(&payload))
                .await
                .map_err(|e| SacapayError::InternalError(e.to_string()))?;
        }
        Some(other) => {
            info!("Unhandled Sacapay webhook status: {}", other);
        }
        None => {
            warn!("Sacapay webhook received without a status field");
        }
    }

    Ok(())
}

fn webhook_amount(payload: &SacapayWebhookPayload) -> Option<Decimal> {
    payload
        .extra
        .get("value")
        .or_else(|| payload.extra.get("amount"))
        .and_then(|v| serde_json::from_value::<Decimal>(v.clone()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{BoxFuture, LedgerError};
    use std::sync::Mutex;

    fn request_with(amount: Option<Decimal>, client: Option<ClientInfo>) -> CreatePixPaymentRequest {
        CreatePixPaymentRequest {
            amount,
            product_name: None,
            sell_url: None,
            client,
            post_back_url: None,
        }
    }

    fn full_client() -> ClientInfo {
        ClientInfo {
            name: Some("Maria Silva".into()),
            email: Some("maria@example.com".into()),
            tax_number: Some("12345678900".into()),
            phone: Some("+5511999990000".into()),
        }
    }

    #[test]
    fn validation_rejects_missing_amount() {
        let err = validate_request(&request_with(None, Some(full_client()))).unwrap_err();
        assert!(matches!(err, SacapayError::MissingField("amount")));
    }

    #[test]
    fn validation_rejects_missing_client() {
        let err = validate_request(&request_with(Some(Decimal::new(100, 0)), None)).unwrap_err();
        assert!(matches!(err, SacapayError::MissingField("client")));
    }

    #[test]
    fn validation_names_the_missing_client_field() {
        for (field, strip) in [
            ("name", 0usize),
            ("email", 1),
            ("taxNumber", 2),
            ("phone", 3),
        ] {
            let mut client = full_client();
            match strip {
                0 => client.name = None,
                1 => client.email = None,
                2 => client.tax_number = None,
                _ => client.phone = None,
            }
            let err =
                validate_request(&request_with(Some(Decimal::new(100, 0)), Some(client)))
                    .unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Missing required client field: {}", field)
            );
        }
    }

    #[test]
    fn post_back_url_is_omitted_when_absent() {
        let payload = SacapayOrderPayload {
            amount: Decimal::new(2500, 2),
            product_name: DEFAULT_PRODUCT_NAME,
            sell_url: DEFAULT_SELL_URL,
            payment_type: "Pix",
            client: OrderClient {
                name: "Maria Silva".into(),
                email: "maria@example.com".into(),
                tax_number: "12345678900".into(),
                phone: "+5511999990000".into(),
            },
            post_back_url: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("postBackUrl").is_none());
        assert_eq!(json["paymentType"], "Pix");
        assert_eq!(json["client"]["taxNumber"], "12345678900");
    }

    // --- Webhook signature ---

    fn sign(body: &[u8], secret: &str) -> String {
        type HmacSha256 = Hmac<Sha256>;
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn valid_signature_is_accepted() {
        let body = br#"{"orderId":"abc","status":"Paid"}"#;
        let signature = sign(body, "test-secret");
        assert!(verify_webhook_signature(body, Some(&signature), "test-secret").is_ok());
    }

    #[test]
    fn tampered_body_is_rejected() {
        let body = br#"{"orderId":"abc","status":"Paid"}"#;
        let signature = sign(body, "test-secret");
        let tampered = br#"{"orderId":"xyz","status":"Paid"}"#;
        let err = verify_webhook_signature(tampered, Some(&signature), "test-secret").unwrap_err();
        assert!(matches!(err, SacapayError::WebhookSignatureError(_)));
    }

    #[test]
    fn missing_signature_header_is_rejected() {
        let err = verify_webhook_signature(b"{}", None, "test-secret").unwrap_err();
        assert!(err.to_string().contains(WEBHOOK_SIGNATURE_HEADER));
    }

    // --- Webhook processing ---

    struct RecordingLedger {
        credited: Mutex<Vec<(String, Option<Decimal>)>>,
    }

    impl RecordingLedger {
        fn new() -> Self {
            RecordingLedger {
                credited: Mutex::new(Vec::new()),
            }
        }
    }

    impl LedgerService for RecordingLedger {
        fn credit_on_approval(
            &self,
            order_id: &str,
            amount: Option<Decimal>,
        ) -> BoxFuture<'_, (), LedgerError> {
            let order_id = order_id.to_string();
            Box::pin(async move {
                self.credited.lock().unwrap().push((order_id, amount));
                Ok(())
            })
        }
    }

    fn webhook(status: Option<&str>, extra: &[(&str, serde_json::Value)]) -> SacapayWebhookPayload {
        SacapayWebhookPayload {
            order_id: Some("order-1".into()),
            status: status.map(Into::into),
            extra: extra
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[tokio::test]
    async fn paid_status_triggers_the_ledger() {
        let ledger = RecordingLedger::new();
        process_webhook(
            webhook(Some("Paid"), &[("value", serde_json::json!(42.5))]),
            &ledger,
        )
        .await
        .unwrap();

        let credited = ledger.credited.lock().unwrap();
        assert_eq!(credited.len(), 1);
        assert_eq!(credited[0].0, "order-1");
        assert_eq!(credited[0].1, Some(Decimal::new(425, 1)));
    }

    #[tokio::test]
    async fn approved_status_triggers_the_ledger() {
        let ledger = RecordingLedger::new();
        process_webhook(webhook(Some("Approved"), &[]), &ledger)
            .await
            .unwrap();
        assert_eq!(ledger.credited.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn other_statuses_do_not_touch_the_ledger() {
        let ledger = RecordingLedger::new();
        process_webhook(webhook(Some("Pending"), &[]), &ledger)
            .await
            .unwrap();
        process_webhook(webhook(None, &[]), &ledger).await.unwrap();
        assert!(ledger.credited.lock().unwrap().is_empty());
    }
}
