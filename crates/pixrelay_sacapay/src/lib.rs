// --- File: crates/pixrelay_sacapay/src/lib.rs ---

// Declare modules within this crate
pub mod doc; // OpenAPI documentation (openapi feature)
pub mod error; // Error handling
pub mod handlers; // HTTP request handlers
pub mod ledger; // Pluggable crediting collaborator
pub mod logic; // Core pass-through logic
pub mod qr; // PIX code -> QR image rendering
pub mod routes; // Route definitions

// Re-export the routes functions to be used by the main backend service
pub use routes::{router_with_state, routes, routes_with_ledger};

pub use error::SacapayError;
pub use ledger::{LedgerService, NoopLedger};
