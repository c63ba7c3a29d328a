use sea_orm::{ ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter };

use crate::db::entity::{ accepted_token, app_config };
use crate::error::Result;

/// Read access to the key/value tunables table.
pub struct ConfigRepository {
    db: DatabaseConnection,
}

impl ConfigRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = app_config::Entity::find_by_id(key.to_string()).one(&self.db).await?;
        Ok(row.map(|r| r.value))
    }
}

/// Read access to the accepted-token registry.
pub struct AcceptedTokenRepository {
    db: DatabaseConnection,
}

impl AcceptedTokenRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Chain a symbol's balances live on; None for unregistered symbols.
    pub async fn chain_for_symbol(&self, symbol: &str) -> Result<Option<i64>> {
        let token = accepted_token::Entity
            ::find()
            .filter(accepted_token::Column::Symbol.eq(symbol))
            .one(&self.db).await?;

        Ok(token.map(|t| t.chain_id))
    }
}
