use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only audit trail of balance-affecting events. A withdrawal
        // records a negative value; the current balance lives on the deposit.
        manager.create_table(
            Table::create()
                .table(DepositHistory::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(DepositHistory::Uuid)
                        .uuid()
                        .not_null()
                        .primary_key()
                )
                .col(ColumnDef::new(DepositHistory::DepositUuid).uuid().not_null())
                .col(ColumnDef::new(DepositHistory::Action).string_len(50).not_null())
                .col(ColumnDef::new(DepositHistory::Value).double().not_null())
                .col(ColumnDef::new(DepositHistory::CreatedAt).timestamp().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_deposit_history_deposit")
                        .from(DepositHistory::Table, DepositHistory::DepositUuid)
                        .to(Deposit::Table, Deposit::Uuid)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_deposit_history_deposit_uuid")
                .table(DepositHistory::Table)
                .col(DepositHistory::DepositUuid)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(DepositHistory::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum DepositHistory {
    #[sea_orm(iden = "deposit_history")]
    Table,
    Uuid,
    DepositUuid,
    Action,
    Value,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Deposit {
    #[sea_orm(iden = "deposits")]
    Table,
    Uuid,
}
