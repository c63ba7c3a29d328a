use sea_orm::{ entity::prelude::*, Condition, DatabaseConnection, Set };
use uuid::Uuid;

use crate::error::Result;

pub mod entity;
pub use entity::*;

mod status_repository;
pub use status_repository::StatusRepository;

mod deposit_repository;
pub use deposit_repository::DepositRepository;

mod withdraw_repository;
pub use withdraw_repository::{ DepositHistoryRepository, WithdrawIntentRepository };

mod config_repository;
pub use config_repository::{ AcceptedTokenRepository, ConfigRepository };

pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Transactions still waiting for an escrow address.
    pub async fn find_unassigned(&self) -> Result<Vec<entity::evm_transaction::Model>> {
        let txs = entity::evm_transaction::Entity
            ::find()
            .filter(
                Condition::any()
                    .add(entity::evm_transaction::Column::EscrowAddress.is_null())
                    .add(entity::evm_transaction::Column::EscrowAddress.eq(""))
            )
            .all(&self.db).await?;

        Ok(txs)
    }

    /// Transactions with an escrow address assigned.
    pub async fn find_assigned(&self) -> Result<Vec<entity::evm_transaction::Model>> {
        let txs = entity::evm_transaction::Entity
            ::find()
            .filter(entity::evm_transaction::Column::EscrowAddress.is_not_null())
            .filter(entity::evm_transaction::Column::EscrowAddress.ne(""))
            .all(&self.db).await?;

        Ok(txs)
    }

    /// Assign the escrow address once. A transaction that already carries a
    /// non-empty address is left untouched.
    pub async fn assign_address(&self, uuid: Uuid, address: &str) -> Result<()> {
        let tx = entity::evm_transaction::Entity
            ::find_by_id(uuid)
            .one(&self.db).await?
            .ok_or_else(|| crate::error::AppError::NotFound(format!("Transaction {}", uuid)))?;

        if tx.escrow_address.as_deref().is_some_and(|a| !a.is_empty()) {
            return Ok(());
        }

        let mut model: entity::evm_transaction::ActiveModel = tx.into();
        model.escrow_address = Set(Some(address.to_string()));
        model.updated_at = Set(Some(chrono::Utc::now().naive_utc()));
        model.update(&self.db).await?;

        Ok(())
    }
}
