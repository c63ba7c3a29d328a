use sea_orm::{ ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set };
use uuid::Uuid;

use crate::db::entity::transaction_status;
use crate::enums::TxStatus;
use crate::error::Result;
use crate::status;

/// Append-and-read surface over the status log. There is deliberately no
/// update or delete here; immutability of the log is enforced by this
/// interface rather than checked at runtime.
pub struct StatusRepository {
    db: DatabaseConnection,
}

impl StatusRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn append(
        &self,
        transaction_uuid: Uuid,
        amount: f64,
        status: TxStatus,
        comment: &str
    ) -> Result<transaction_status::Model> {
        let now = chrono::Utc::now().naive_utc();

        let event = transaction_status::ActiveModel {
            id: NotSet,
            transaction_uuid: Set(transaction_uuid),
            time: Set(now),
            amount: Set(amount),
            status: Set(status.to_string()),
            comment: Set(comment.to_string()),
            created_at: Set(now),
        };

        let event = event.insert(&self.db).await?;
        Ok(event)
    }

    /// All events for a transaction in insertion order.
    pub async fn events_for(&self, transaction_uuid: Uuid) -> Result<Vec<transaction_status::Model>> {
        let events = transaction_status::Entity
            ::find()
            .filter(transaction_status::Column::TransactionUuid.eq(transaction_uuid))
            .order_by_asc(transaction_status::Column::CreatedAt)
            .order_by_asc(transaction_status::Column::Id)
            .all(&self.db).await?;

        Ok(events)
    }

    /// Current status projected from the log; None for a transaction with
    /// no events yet.
    pub async fn current_status_of(&self, transaction_uuid: Uuid) -> Result<Option<TxStatus>> {
        let events = self.events_for(transaction_uuid).await?;
        Ok(status::current_status(&events))
    }
}
