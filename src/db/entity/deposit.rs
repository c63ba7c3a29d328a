use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

/// Reusable deposit wallet. `crypto_value` is the last observed on-chain
/// balance snapshot, not a running total; `deposit_history` holds the audit
/// trail.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deposits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,
    pub crypto: String,
    pub address: Option<String>,
    pub crypto_value: f64,
    pub created_at: DateTime,
    pub updated_at: Option<DateTime>,
    pub deleted_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::deposit_history::Entity")]
    DepositHistory,
    #[sea_orm(has_many = "super::withdraw_intent::Entity")]
    WithdrawIntent,
}

impl Related<super::deposit_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DepositHistory.def()
    }
}

impl Related<super::withdraw_intent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WithdrawIntent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
