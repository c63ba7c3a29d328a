use sea_orm::{ ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, Set };
use uuid::Uuid;

use crate::db::entity::deposit;
use crate::error::{ AppError, Result };

pub struct DepositRepository {
    db: DatabaseConnection,
}

impl DepositRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<deposit::Model>> {
        let dep = deposit::Entity::find_by_id(uuid).one(&self.db).await?;
        Ok(dep)
    }

    /// Live deposits still waiting for a receiving address.
    pub async fn find_unassigned(&self) -> Result<Vec<deposit::Model>> {
        let deps = deposit::Entity
            ::find()
            .filter(deposit::Column::DeletedAt.is_null())
            .filter(
                Condition::any()
                    .add(deposit::Column::Address.is_null())
                    .add(deposit::Column::Address.eq(""))
            )
            .all(&self.db).await?;

        Ok(deps)
    }

    /// Live deposits with an address, eligible for a balance refresh.
    pub async fn find_active_with_address(&self) -> Result<Vec<deposit::Model>> {
        let deps = deposit::Entity
            ::find()
            .filter(deposit::Column::DeletedAt.is_null())
            .filter(deposit::Column::Address.is_not_null())
            .filter(deposit::Column::Address.ne(""))
            .all(&self.db).await?;

        Ok(deps)
    }

    /// Assign the receiving address once; a non-empty address is permanent.
    pub async fn assign_address(&self, uuid: Uuid, address: &str) -> Result<()> {
        let dep = self
            .find_by_uuid(uuid).await?
            .ok_or_else(|| AppError::NotFound(format!("Deposit {}", uuid)))?;

        if dep.address.as_deref().is_some_and(|a| !a.is_empty()) {
            return Ok(());
        }

        let mut model: deposit::ActiveModel = dep.into();
        model.address = Set(Some(address.to_string()));
        model.updated_at = Set(Some(chrono::Utc::now().naive_utc()));
        model.update(&self.db).await?;

        Ok(())
    }

    /// Overwrite the balance snapshot with the latest observed value.
    pub async fn set_crypto_value(&self, uuid: Uuid, value: f64) -> Result<()> {
        let dep = self
            .find_by_uuid(uuid).await?
            .ok_or_else(|| AppError::NotFound(format!("Deposit {}", uuid)))?;

        let mut model: deposit::ActiveModel = dep.into();
        model.crypto_value = Set(value);
        model.updated_at = Set(Some(chrono::Utc::now().naive_utc()));
        model.update(&self.db).await?;

        Ok(())
    }
}
