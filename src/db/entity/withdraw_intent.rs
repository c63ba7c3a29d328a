use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

/// Request to move a deposit balance to its withdraw address. `status` is
/// mutable but makes a single pending -> completed/failed transition and is
/// never revisited once terminal.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deposit_withdraw_intents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub deposit_uuid: Uuid,
    pub to_address: String,
    pub status: String,
    pub requested_at: DateTime,
    pub requested_by: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::deposit::Entity",
        from = "Column::DepositUuid",
        to = "super::deposit::Column::Uuid"
    )]
    Deposit,
}

impl Related<super::deposit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deposit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
