use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(EvmTransaction::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(EvmTransaction::Uuid)
                        .uuid()
                        .not_null()
                        .primary_key()
                )
                .col(ColumnDef::new(EvmTransaction::EscrowAddress).string().null())
                .col(ColumnDef::new(EvmTransaction::RequiredAmount).double().not_null())
                .col(ColumnDef::new(EvmTransaction::ChainId).big_integer().not_null())
                .col(ColumnDef::new(EvmTransaction::CreatedAt).timestamp().not_null())
                .col(ColumnDef::new(EvmTransaction::UpdatedAt).timestamp().null())
                .to_owned()
        ).await?;

        // Fill job selects on escrow_address being unassigned
        manager.create_index(
            Index::create()
                .name("idx_evm_transactions_escrow_address")
                .table(EvmTransaction::Table)
                .col(EvmTransaction::EscrowAddress)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(EvmTransaction::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum EvmTransaction {
    #[sea_orm(iden = "evm_transactions")]
    Table,
    Uuid,
    EscrowAddress,
    RequiredAmount,
    ChainId,
    CreatedAt,
    UpdatedAt,
}
