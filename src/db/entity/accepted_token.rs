use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

/// Registry of accepted assets, mapping a symbol to the chain its balances
/// are queried on. Deposits with an unregistered symbol are skipped.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accepted_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub chain_id: i64,
    pub symbol: String,
    pub contract_address: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
