use std::sync::Arc;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio::time::{ interval, Duration };

use crate::broadcaster::Broadcaster;
use crate::chains::evm::wallet;
use crate::config::Config;
use crate::db::{
    AcceptedTokenRepository,
    ConfigRepository,
    DepositHistoryRepository,
    DepositRepository,
    StatusRepository,
    TransactionRepository,
    WithdrawIntentRepository,
};
use crate::enums::{ AddressNamespace, IntentStatus, TxStatus };
use crate::error::Result;
use crate::providers::BalanceOracle;
use crate::status;

/// Drives the per-tick reconciliation jobs against the ledger. Jobs run
/// sequentially within a tick; ordering matters, since fail-stale re-derives
/// current status after promote-funded has committed its inserts.
pub struct ReconciliationEngine {
    config: Arc<Config>,
    oracle: Arc<dyn BalanceOracle>,
    broadcaster: Arc<dyn Broadcaster>,
    transactions: TransactionRepository,
    statuses: StatusRepository,
    deposits: DepositRepository,
    history: DepositHistoryRepository,
    intents: WithdrawIntentRepository,
    tunables: ConfigRepository,
    tokens: AcceptedTokenRepository,
}

impl ReconciliationEngine {
    pub fn new(
        db: DatabaseConnection,
        config: Arc<Config>,
        oracle: Arc<dyn BalanceOracle>,
        broadcaster: Arc<dyn Broadcaster>
    ) -> Self {
        Self {
            config,
            oracle,
            broadcaster,
            transactions: TransactionRepository::new(db.clone()),
            statuses: StatusRepository::new(db.clone()),
            deposits: DepositRepository::new(db.clone()),
            history: DepositHistoryRepository::new(db.clone()),
            intents: WithdrawIntentRepository::new(db.clone()),
            tunables: ConfigRepository::new(db.clone()),
            tokens: AcceptedTokenRepository::new(db),
        }
    }

    /// Run ticks forever on a fixed interval. Ticks never overlap: each one
    /// is awaited to completion before the next interval fires.
    pub async fn start(self) {
        let mut interval = interval(Duration::from_secs(self.config.tick_interval_secs));

        loop {
            interval.tick().await;

            if let Err(e) = self.run_tick().await {
                tracing::error!("Reconciliation tick failed: {}", e);
            }
        }
    }

    /// One full pass: fill addresses, promote funded, fail stale, refresh
    /// deposit balances, process withdraw intents.
    pub async fn run_tick(&self) -> Result<()> {
        self.fill_addresses().await?;
        self.promote_funded().await?;
        self.fail_stale().await?;
        self.refresh_deposits().await?;
        self.process_withdraw_intents().await?;
        Ok(())
    }

    /// Assign a derived receiving address to every transaction and deposit
    /// that does not have one yet. Transactions also get their initial
    /// PENDING event; deposits are reusable wallets and do not. A derivation
    /// failure is fatal only for that single entity.
    async fn fill_addresses(&self) -> Result<()> {
        for tx in self.transactions.find_unassigned().await? {
            let address = match
                wallet::derive_address(&self.config.mnemonic, AddressNamespace::Escrow, &tx.uuid)
            {
                Ok(address) => address,
                Err(e) => {
                    tracing::warn!(transaction = %tx.uuid, "Address derivation failed: {}", e);
                    continue;
                }
            };

            self.transactions.assign_address(tx.uuid, &address).await?;
            self.statuses
                .append(tx.uuid, 0.0, TxStatus::Pending, "Escrow address created").await?;

            tracing::info!(transaction = %tx.uuid, address = %address, "Escrow address assigned");
        }

        for deposit in self.deposits.find_unassigned().await? {
            let address = match
                wallet::derive_address(
                    &self.config.mnemonic,
                    AddressNamespace::Deposit,
                    &deposit.uuid
                )
            {
                Ok(address) => address,
                Err(e) => {
                    tracing::warn!(deposit = %deposit.uuid, "Address derivation failed: {}", e);
                    continue;
                }
            };

            self.deposits.assign_address(deposit.uuid, &address).await?;
            tracing::info!(deposit = %deposit.uuid, address = %address, "Deposit address assigned");
        }

        Ok(())
    }

    /// Poll the escrow balance of every PENDING transaction and append a
    /// COMPLETED event once funding reaches the required amount minus the
    /// tolerance. A failed balance query skips the transaction this tick;
    /// the next tick retries naturally.
    async fn promote_funded(&self) -> Result<()> {
        let tolerance = self.config.tolerance;

        for tx in self.transactions.find_assigned().await? {
            if tx.required_amount <= 0.0 {
                continue;
            }

            if self.statuses.current_status_of(tx.uuid).await? != Some(TxStatus::Pending) {
                continue;
            }

            let address = match tx.escrow_address.as_deref() {
                Some(address) if !address.is_empty() => address,
                _ => {
                    continue;
                }
            };

            let balance = match self.oracle.get_balance(address, tx.chain_id).await {
                Ok(balance) => balance,
                Err(e) => {
                    tracing::warn!(
                        transaction = %tx.uuid,
                        "Balance query failed, skipping this tick: {}", e
                    );
                    continue;
                }
            };

            if balance >= tx.required_amount * (1.0 - tolerance) {
                self.statuses
                    .append(tx.uuid, balance, TxStatus::Completed, "Transaction funded").await?;

                let usd = self.oracle.usd_price("ETH").await;
                tracing::info!(
                    transaction = %tx.uuid,
                    balance,
                    usd_value = balance * usd,
                    "Transaction funded"
                );
            }
        }

        Ok(())
    }

    /// Fail every transaction still PENDING that was created longer ago than
    /// `pending_duration`. The cutoff compares against the transaction's own
    /// created_at, matching the deployed behavior, not the timestamp of its
    /// PENDING event.
    async fn fail_stale(&self) -> Result<()> {
        let configured = self.tunables.get("pending_duration").await?.unwrap_or_default();
        let cutoff = Utc::now().naive_utc() - status::parse_duration(&configured);

        for tx in self.transactions.find_assigned().await? {
            if self.statuses.current_status_of(tx.uuid).await? != Some(TxStatus::Pending) {
                continue;
            }

            if tx.created_at < cutoff {
                self.statuses.append(tx.uuid, 0.0, TxStatus::Failed, "Pending timeout").await?;
                tracing::info!(transaction = %tx.uuid, "Transaction failed on pending timeout");
            }
        }

        Ok(())
    }

    /// Overwrite each live deposit's balance snapshot with the current
    /// on-chain balance. Deposits with an unregistered symbol are skipped,
    /// as is any deposit whose balance query fails.
    async fn refresh_deposits(&self) -> Result<()> {
        for deposit in self.deposits.find_active_with_address().await? {
            let Some(chain_id) = self.tokens.chain_for_symbol(&deposit.crypto).await? else {
                tracing::debug!(
                    deposit = %deposit.uuid,
                    symbol = %deposit.crypto,
                    "Symbol not in accepted tokens, skipping"
                );
                continue;
            };

            let address = match deposit.address.as_deref() {
                Some(address) if !address.is_empty() => address,
                _ => {
                    continue;
                }
            };

            match self.oracle.get_balance(address, chain_id).await {
                Ok(balance) => {
                    self.deposits.set_crypto_value(deposit.uuid, balance).await?;
                }
                Err(e) => {
                    tracing::warn!(deposit = %deposit.uuid, "Balance query failed: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Settle pending withdraw intents. An intent against a missing or empty
    /// deposit fails; otherwise the broadcaster is invoked, the withdrawal
    /// is recorded as a negative delta in the history, the snapshot is
    /// zeroed and the intent completes. A broadcaster error leaves the
    /// intent pending for the next tick.
    async fn process_withdraw_intents(&self) -> Result<()> {
        for intent in self.intents.find_pending().await? {
            let deposit = match self.deposits.find_by_uuid(intent.deposit_uuid).await? {
                Some(deposit) => deposit,
                None => {
                    tracing::warn!(intent = intent.id, "Deposit missing, failing intent");
                    self.intents.mark(intent.id, IntentStatus::Failed).await?;
                    continue;
                }
            };

            if deposit.crypto_value <= 0.0 {
                self.intents.mark(intent.id, IntentStatus::Failed).await?;
                continue;
            }

            let amount = deposit.crypto_value;
            match self.broadcaster.send_withdrawal(&deposit, amount, &intent.to_address).await {
                Ok(tx_hash) => {
                    self.history.append(deposit.uuid, "withdraw", -amount).await?;
                    self.deposits.set_crypto_value(deposit.uuid, 0.0).await?;
                    self.intents.mark(intent.id, IntentStatus::Completed).await?;

                    tracing::info!(
                        intent = intent.id,
                        deposit = %deposit.uuid,
                        amount,
                        tx_hash = %tx_hash,
                        "Withdraw intent completed"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        intent = intent.id,
                        "Withdrawal broadcast failed, retrying next tick: {}", e
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::Duration as ChronoDuration;
    use sea_orm::{ ActiveModelTrait, Database, EntityTrait, NotSet, Set };
    use sea_orm_migration::MigratorTrait;
    use uuid::Uuid;

    use crate::broadcaster::LedgerOnlyBroadcaster;
    use crate::db::entity::{ accepted_token, app_config, deposit, evm_transaction,
        withdraw_intent };
    use crate::error::AppError;

    const TEST_MNEMONIC: &str =
        "test test test test test test test test test test test junk";

    struct MockOracle {
        balances: HashMap<String, f64>,
    }

    impl MockOracle {
        fn empty() -> Self {
            Self { balances: HashMap::new() }
        }

        fn with(address: &str, balance: f64) -> Self {
            let mut balances = HashMap::new();
            balances.insert(address.to_string(), balance);
            Self { balances }
        }
    }

    #[async_trait]
    impl BalanceOracle for MockOracle {
        async fn get_balance(&self, address: &str, _chain_id: i64) -> Result<f64> {
            self.balances
                .get(address)
                .copied()
                .ok_or_else(|| AppError::Rpc(format!("no balance for {}", address)))
        }

        async fn usd_price(&self, _symbol: &str) -> f64 {
            0.0
        }
    }

    async fn setup_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    fn test_config() -> Arc<Config> {
        Arc::new(Config {
            mnemonic: TEST_MNEMONIC.to_string(),
            database_url: "sqlite::memory:".to_string(),
            alchemy_api_key: "test".to_string(),
            network: "mainnet".to_string(),
            tolerance: 0.05,
            tick_interval_secs: 60,
        })
    }

    fn engine_with(db: &DatabaseConnection, oracle: MockOracle) -> ReconciliationEngine {
        ReconciliationEngine::new(
            db.clone(),
            test_config(),
            Arc::new(oracle),
            Arc::new(LedgerOnlyBroadcaster)
        )
    }

    async fn insert_transaction(
        db: &DatabaseConnection,
        required_amount: f64,
        age: ChronoDuration
    ) -> Uuid {
        let uuid = Uuid::new_v4();
        evm_transaction::ActiveModel {
            uuid: Set(uuid),
            escrow_address: Set(None),
            required_amount: Set(required_amount),
            chain_id: Set(1),
            created_at: Set(Utc::now().naive_utc() - age),
            updated_at: Set(None),
        }
            .insert(db).await
            .unwrap();
        uuid
    }

    async fn insert_deposit(db: &DatabaseConnection, crypto: &str, value: f64) -> Uuid {
        let uuid = Uuid::new_v4();
        deposit::ActiveModel {
            uuid: Set(uuid),
            crypto: Set(crypto.to_string()),
            address: Set(None),
            crypto_value: Set(value),
            created_at: Set(Utc::now().naive_utc()),
            updated_at: Set(None),
            deleted_at: Set(None),
        }
            .insert(db).await
            .unwrap();
        uuid
    }

    async fn register_token(db: &DatabaseConnection, symbol: &str, chain_id: i64) {
        accepted_token::ActiveModel {
            id: NotSet,
            chain_id: Set(chain_id),
            symbol: Set(symbol.to_string()),
            contract_address: Set(None),
            created_at: Set(Utc::now().naive_utc()),
        }
            .insert(db).await
            .unwrap();
    }

    async fn insert_intent(db: &DatabaseConnection, deposit_uuid: Uuid) -> i64 {
        let now = Utc::now().naive_utc();
        let intent = withdraw_intent::ActiveModel {
            id: NotSet,
            deposit_uuid: Set(deposit_uuid),
            to_address: Set("0x1111111111111111111111111111111111111111".to_string()),
            status: Set("pending".to_string()),
            requested_at: Set(now),
            requested_by: Set("owner".to_string()),
            created_at: Set(now),
        }
            .insert(db).await
            .unwrap();
        intent.id
    }

    async fn escrow_address_of(db: &DatabaseConnection, uuid: Uuid) -> Option<String> {
        evm_transaction::Entity
            ::find_by_id(uuid)
            .one(db).await
            .unwrap()
            .unwrap().escrow_address
    }

    #[tokio::test]
    async fn test_fill_addresses_assigns_and_seeds_pending() {
        let db = setup_db().await;
        let engine = engine_with(&db, MockOracle::empty());

        let tx_uuid = insert_transaction(&db, 1.0, ChronoDuration::zero()).await;
        let dep_uuid = insert_deposit(&db, "ETH", 0.0).await;

        engine.fill_addresses().await.unwrap();

        let address = escrow_address_of(&db, tx_uuid).await.unwrap();
        assert!(address.starts_with("0x"));
        assert_eq!(engine.statuses.current_status_of(tx_uuid).await.unwrap(),
            Some(TxStatus::Pending));

        // Deposits get an address but no status event
        let dep = deposit::Entity::find_by_id(dep_uuid).one(&db).await.unwrap().unwrap();
        assert!(dep.address.unwrap().starts_with("0x"));
    }

    #[tokio::test]
    async fn test_fill_addresses_is_idempotent() {
        let db = setup_db().await;
        let engine = engine_with(&db, MockOracle::empty());

        let tx_uuid = insert_transaction(&db, 1.0, ChronoDuration::zero()).await;

        engine.fill_addresses().await.unwrap();
        let first = escrow_address_of(&db, tx_uuid).await;
        engine.fill_addresses().await.unwrap();

        assert_eq!(escrow_address_of(&db, tx_uuid).await, first);
        assert_eq!(engine.statuses.events_for(tx_uuid).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_promote_funded_within_tolerance() {
        let db = setup_db().await;
        let tx_uuid = insert_transaction(&db, 1.0, ChronoDuration::zero()).await;

        let probe = engine_with(&db, MockOracle::empty());
        probe.fill_addresses().await.unwrap();
        let address = escrow_address_of(&db, tx_uuid).await.unwrap();

        let engine = engine_with(&db, MockOracle::with(&address, 0.951));
        engine.promote_funded().await.unwrap();

        let events = engine.statuses.events_for(tx_uuid).await.unwrap();
        assert_eq!(engine.statuses.current_status_of(tx_uuid).await.unwrap(),
            Some(TxStatus::Completed));
        assert_eq!(events.last().unwrap().amount, 0.951);
    }

    #[tokio::test]
    async fn test_promote_funded_below_tolerance_stays_pending() {
        let db = setup_db().await;
        let tx_uuid = insert_transaction(&db, 1.0, ChronoDuration::zero()).await;

        let probe = engine_with(&db, MockOracle::empty());
        probe.fill_addresses().await.unwrap();
        let address = escrow_address_of(&db, tx_uuid).await.unwrap();

        let engine = engine_with(&db, MockOracle::with(&address, 0.949));
        engine.promote_funded().await.unwrap();

        assert_eq!(engine.statuses.current_status_of(tx_uuid).await.unwrap(),
            Some(TxStatus::Pending));
    }

    #[tokio::test]
    async fn test_promote_funded_skips_on_oracle_failure() {
        let db = setup_db().await;
        let funded = insert_transaction(&db, 1.0, ChronoDuration::zero()).await;
        let unreachable = insert_transaction(&db, 1.0, ChronoDuration::zero()).await;

        let probe = engine_with(&db, MockOracle::empty());
        probe.fill_addresses().await.unwrap();
        let funded_address = escrow_address_of(&db, funded).await.unwrap();

        // Only one address resolves; the other errors and must not abort the run
        let engine = engine_with(&db, MockOracle::with(&funded_address, 2.0));
        engine.promote_funded().await.unwrap();

        assert_eq!(engine.statuses.current_status_of(funded).await.unwrap(),
            Some(TxStatus::Completed));
        assert_eq!(engine.statuses.current_status_of(unreachable).await.unwrap(),
            Some(TxStatus::Pending));
    }

    #[tokio::test]
    async fn test_fail_stale_uses_default_24h_cutoff() {
        let db = setup_db().await;
        let stale = insert_transaction(&db, 1.0, ChronoDuration::hours(25)).await;
        let fresh = insert_transaction(&db, 1.0, ChronoDuration::hours(23)).await;

        let engine = engine_with(&db, MockOracle::empty());
        engine.fill_addresses().await.unwrap();
        engine.fail_stale().await.unwrap();

        assert_eq!(engine.statuses.current_status_of(stale).await.unwrap(),
            Some(TxStatus::Failed));
        assert_eq!(engine.statuses.current_status_of(fresh).await.unwrap(),
            Some(TxStatus::Pending));
    }

    #[tokio::test]
    async fn test_fail_stale_honors_configured_duration() {
        let db = setup_db().await;
        app_config::ActiveModel {
            key: Set("pending_duration".to_string()),
            value: Set("7d".to_string()),
        }
            .insert(&db).await
            .unwrap();

        let tx_uuid = insert_transaction(&db, 1.0, ChronoDuration::hours(48)).await;

        let engine = engine_with(&db, MockOracle::empty());
        engine.fill_addresses().await.unwrap();
        engine.fail_stale().await.unwrap();

        assert_eq!(engine.statuses.current_status_of(tx_uuid).await.unwrap(),
            Some(TxStatus::Pending));
    }

    #[tokio::test]
    async fn test_tick_promotes_before_failing_stale() {
        let db = setup_db().await;
        let tx_uuid = insert_transaction(&db, 1.0, ChronoDuration::hours(25)).await;

        let probe = engine_with(&db, MockOracle::empty());
        probe.fill_addresses().await.unwrap();
        let address = escrow_address_of(&db, tx_uuid).await.unwrap();

        // Old but funded: job order within the tick must complete it, not fail it
        let engine = engine_with(&db, MockOracle::with(&address, 1.0));
        engine.run_tick().await.unwrap();

        assert_eq!(engine.statuses.current_status_of(tx_uuid).await.unwrap(),
            Some(TxStatus::Completed));
    }

    #[tokio::test]
    async fn test_refresh_deposits_overwrites_snapshot() {
        let db = setup_db().await;
        register_token(&db, "ETH", 1).await;
        let dep_uuid = insert_deposit(&db, "ETH", 9.9).await;

        let probe = engine_with(&db, MockOracle::empty());
        probe.fill_addresses().await.unwrap();
        let dep = deposit::Entity::find_by_id(dep_uuid).one(&db).await.unwrap().unwrap();
        let address = dep.address.unwrap();

        let engine = engine_with(&db, MockOracle::with(&address, 1.25));
        engine.refresh_deposits().await.unwrap();

        let dep = deposit::Entity::find_by_id(dep_uuid).one(&db).await.unwrap().unwrap();
        assert_eq!(dep.crypto_value, 1.25);
    }

    #[tokio::test]
    async fn test_refresh_deposits_skips_unregistered_symbol() {
        let db = setup_db().await;
        let dep_uuid = insert_deposit(&db, "DOGE", 3.0).await;

        let engine = engine_with(&db, MockOracle::empty());
        engine.fill_addresses().await.unwrap();
        engine.refresh_deposits().await.unwrap();

        let dep = deposit::Entity::find_by_id(dep_uuid).one(&db).await.unwrap().unwrap();
        assert_eq!(dep.crypto_value, 3.0);
    }

    #[tokio::test]
    async fn test_withdraw_intent_with_empty_deposit_fails() {
        let db = setup_db().await;
        let dep_uuid = insert_deposit(&db, "ETH", 0.0).await;
        let intent_id = insert_intent(&db, dep_uuid).await;

        let engine = engine_with(&db, MockOracle::empty());
        engine.process_withdraw_intents().await.unwrap();

        let intent = withdraw_intent::Entity
            ::find_by_id(intent_id)
            .one(&db).await
            .unwrap()
            .unwrap();
        assert_eq!(intent.status, "failed");
        assert!(engine.history.entries_for(dep_uuid).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_withdraw_intent_records_delta_and_completes() {
        let db = setup_db().await;
        let dep_uuid = insert_deposit(&db, "ETH", 2.5).await;
        let intent_id = insert_intent(&db, dep_uuid).await;

        let engine = engine_with(&db, MockOracle::empty());
        engine.process_withdraw_intents().await.unwrap();

        let intent = withdraw_intent::Entity
            ::find_by_id(intent_id)
            .one(&db).await
            .unwrap()
            .unwrap();
        assert_eq!(intent.status, "completed");

        let dep = deposit::Entity::find_by_id(dep_uuid).one(&db).await.unwrap().unwrap();
        assert_eq!(dep.crypto_value, 0.0);

        let entries = engine.history.entries_for(dep_uuid).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, -2.5);
        assert_eq!(entries[0].action, "withdraw");
    }

    #[tokio::test]
    async fn test_terminal_intent_is_not_revisited() {
        let db = setup_db().await;
        let dep_uuid = insert_deposit(&db, "ETH", 2.5).await;
        insert_intent(&db, dep_uuid).await;

        let engine = engine_with(&db, MockOracle::empty());
        engine.process_withdraw_intents().await.unwrap();
        engine.process_withdraw_intents().await.unwrap();

        // A second pass finds no pending intents and appends nothing
        assert_eq!(engine.history.entries_for(dep_uuid).await.unwrap().len(), 1);
    }
}
