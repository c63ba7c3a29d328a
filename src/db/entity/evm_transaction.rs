use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

/// Escrow payment expected on-chain. `escrow_address` is empty at creation
/// and assigned exactly once by the fill job; it is never reassigned.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "evm_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,
    pub escrow_address: Option<String>,
    pub required_amount: f64,
    pub chain_id: i64,
    pub created_at: DateTime,
    pub updated_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transaction_status::Entity")]
    TransactionStatus,
}

impl Related<super::transaction_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionStatus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
