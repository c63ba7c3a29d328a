use async_trait::async_trait;
use uuid::Uuid;

use crate::db::entity::deposit;
use crate::error::Result;

/// Capability to move funds out of a deposit address. The withdraw job only
/// marks an intent completed after this returns a transaction hash.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn send_withdrawal(
        &self,
        deposit: &deposit::Model,
        amount: f64,
        to_address: &str
    ) -> Result<String>;
}

/// Bookkeeping-only stand-in: no transaction is constructed, signed or
/// broadcast, it just hands back a synthetic hash so the ledger side of the
/// withdraw job can run. A production deployment must replace this with an
/// implementation that reaches the chain and confirms.
pub struct LedgerOnlyBroadcaster;

#[async_trait]
impl Broadcaster for LedgerOnlyBroadcaster {
    async fn send_withdrawal(
        &self,
        deposit: &deposit::Model,
        amount: f64,
        to_address: &str
    ) -> Result<String> {
        tracing::warn!(
            deposit = %deposit.uuid,
            amount,
            to_address,
            "ledger-only withdrawal: no on-chain transfer was performed"
        );
        Ok(format!("ledger-only:{}", Uuid::new_v4()))
    }
}
