// --- File: crates/pixrelay_sacapay/src/ledger.rs ---
//! Pluggable collaborator for crediting a user balance when a payment is
//! approved. The webhook handler always calls through this trait; the
//! default implementation is an explicit no-op that only leaves an audit
//! record, because this service holds no state of its own.

use rust_decimal::Decimal;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tracing::info;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Ledger operation failed: {0}")]
    Operation(String),
}

/// A trait for ledger operations triggered by payment events.
///
/// Implementations are expected to be idempotent per order: the provider may
/// deliver the same approval notification more than once.
pub trait LedgerService: Send + Sync {
    /// Credit the balance associated with an approved order.
    fn credit_on_approval(
        &self,
        order_id: &str,
        amount: Option<Decimal>,
    ) -> BoxFuture<'_, (), LedgerError>;
}

/// The no-op ledger: acknowledges approvals without crediting anything.
pub struct NoopLedger;

impl LedgerService for NoopLedger {
    fn credit_on_approval(
        &self,
        order_id: &str,
        amount: Option<Decimal>,
    ) -> BoxFuture<'_, (), LedgerError> {
        let order_id = order_id.to_string();
        Box::pin(async move {
            info!(
                "Ledger no-op: approval for order {} (amount: {:?}) acknowledged without crediting",
                order_id, amount
            );
            Ok(())
        })
    }
}
