use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only status log. No update/delete is ever issued against it;
        // the current status of a transaction is the latest row for its uuid.
        manager.create_table(
            Table::create()
                .table(TransactionStatus::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(TransactionStatus::Id)
                        .big_integer()
                        .not_null()
                        .auto_increment()
                        .primary_key()
                )
                .col(ColumnDef::new(TransactionStatus::TransactionUuid).uuid().not_null())
                .col(ColumnDef::new(TransactionStatus::Time).timestamp().not_null())
                .col(ColumnDef::new(TransactionStatus::Amount).double().not_null())
                .col(ColumnDef::new(TransactionStatus::Status).string_len(20).not_null())
                .col(ColumnDef::new(TransactionStatus::Comment).string().not_null())
                .col(ColumnDef::new(TransactionStatus::CreatedAt).timestamp().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_transaction_statuses_transaction")
                        .from(TransactionStatus::Table, TransactionStatus::TransactionUuid)
                        .to(EvmTransaction::Table, EvmTransaction::Uuid)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_transaction_statuses_transaction_uuid")
                .table(TransactionStatus::Table)
                .col(TransactionStatus::TransactionUuid)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TransactionStatus::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TransactionStatus {
    #[sea_orm(iden = "transaction_statuses")]
    Table,
    Id,
    TransactionUuid,
    Time,
    Amount,
    Status,
    Comment,
    CreatedAt,
}

#[derive(DeriveIden)]
enum EvmTransaction {
    #[sea_orm(iden = "evm_transactions")]
    Table,
    Uuid,
}
