use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

/// One row of the append-only status log. Rows are inserted and never
/// touched again; id order breaks ties between equal timestamps.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction_statuses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub transaction_uuid: Uuid,
    pub time: DateTime,
    pub amount: f64,
    pub status: String,
    pub comment: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evm_transaction::Entity",
        from = "Column::TransactionUuid",
        to = "super::evm_transaction::Column::Uuid"
    )]
    EvmTransaction,
}

impl Related<super::evm_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvmTransaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
