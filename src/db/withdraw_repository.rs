use sea_orm::{ ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set };
use uuid::Uuid;

use crate::db::entity::{ deposit_history, withdraw_intent };
use crate::enums::IntentStatus;
use crate::error::{ AppError, Result };

pub struct WithdrawIntentRepository {
    db: DatabaseConnection,
}

impl WithdrawIntentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Pending intents in request order.
    pub async fn find_pending(&self) -> Result<Vec<withdraw_intent::Model>> {
        let intents = withdraw_intent::Entity
            ::find()
            .filter(withdraw_intent::Column::Status.eq(IntentStatus::Pending.as_str()))
            .order_by_asc(withdraw_intent::Column::Id)
            .all(&self.db).await?;

        Ok(intents)
    }

    /// Move a pending intent to its terminal status. An intent that is
    /// already terminal is never touched again.
    pub async fn mark(&self, id: i64, status: IntentStatus) -> Result<()> {
        let intent = withdraw_intent::Entity
            ::find_by_id(id)
            .one(&self.db).await?
            .ok_or_else(|| AppError::NotFound(format!("Withdraw intent {}", id)))?;

        if intent.status != IntentStatus::Pending.as_str() {
            return Err(AppError::InvalidInput(
                format!("Withdraw intent {} is already {}", id, intent.status)
            ));
        }

        let mut model: withdraw_intent::ActiveModel = intent.into();
        model.status = Set(status.to_string());
        model.update(&self.db).await?;

        Ok(())
    }
}

/// Append-only writer for the deposit audit trail.
pub struct DepositHistoryRepository {
    db: DatabaseConnection,
}

impl DepositHistoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn append(
        &self,
        deposit_uuid: Uuid,
        action: &str,
        value: f64
    ) -> Result<deposit_history::Model> {
        let entry = deposit_history::ActiveModel {
            uuid: Set(Uuid::new_v4()),
            deposit_uuid: Set(deposit_uuid),
            action: Set(action.to_string()),
            value: Set(value),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };

        let entry = entry.insert(&self.db).await?;
        Ok(entry)
    }

    pub async fn entries_for(&self, deposit_uuid: Uuid) -> Result<Vec<deposit_history::Model>> {
        let entries = deposit_history::Entity
            ::find()
            .filter(deposit_history::Column::DepositUuid.eq(deposit_uuid))
            .order_by_asc(deposit_history::Column::CreatedAt)
            .all(&self.db).await?;

        Ok(entries)
    }
}
