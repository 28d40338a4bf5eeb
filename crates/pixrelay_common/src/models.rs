// --- File: crates/pixrelay_common/src/models.rs ---
use serde::{Deserialize, Serialize};

/// The uniform JSON error envelope returned by every handler.
///
/// `success` is always `false` here; the field exists so that clients can
/// branch on one flag for both success and failure payloads.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            success: false,
            error: error.into(),
        }
    }
}
