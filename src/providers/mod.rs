use async_trait::async_trait;

use crate::error::Result;

/// Read-only view of on-chain state, injected into the engine so jobs can
/// be exercised against a test double.
#[async_trait]
pub trait BalanceOracle: Send + Sync {
    /// Native balance of an address at the latest confirmed block, as a
    /// decimal amount of whole coins. Errors propagate; callers isolate
    /// failures per entity.
    async fn get_balance(&self, address: &str, chain_id: i64) -> Result<f64>;

    /// Best-effort USD quote for a native asset symbol. Returns 0.0 on any
    /// failure; never used for completion decisions.
    async fn usd_price(&self, symbol: &str) -> f64;
}
