// --- File: crates/pixrelay_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Sacapay Config ---
// Holds non-secret Sacapay config. Tokens loaded directly from env vars.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SacapayConfig {
    pub base_url: String, // Mandatory, e.g. https://api.sacapay.com.br
    pub product_name: Option<String>,
    pub sell_url: Option<String>,
    // Secrets loaded directly from env vars:
    // SACAPAY_PRIVATE_TOKEN
    // SACAPAY_WEBHOOK_SECRET (optional; webhook verification skipped if unset)
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_sacapay: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub sacapay: Option<SacapayConfig>,
}
