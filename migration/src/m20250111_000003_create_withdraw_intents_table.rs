use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(WithdrawIntent::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(WithdrawIntent::Id)
                        .big_integer()
                        .not_null()
                        .auto_increment()
                        .primary_key()
                )
                .col(ColumnDef::new(WithdrawIntent::DepositUuid).uuid().not_null())
                .col(ColumnDef::new(WithdrawIntent::ToAddress).string().not_null())
                .col(ColumnDef::new(WithdrawIntent::Status).string_len(20).not_null())
                .col(ColumnDef::new(WithdrawIntent::RequestedAt).timestamp().not_null())
                .col(ColumnDef::new(WithdrawIntent::RequestedBy).string().not_null())
                .col(ColumnDef::new(WithdrawIntent::CreatedAt).timestamp().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_withdraw_intents_deposit")
                        .from(WithdrawIntent::Table, WithdrawIntent::DepositUuid)
                        .to(Deposit::Table, Deposit::Uuid)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_withdraw_intents_status")
                .table(WithdrawIntent::Table)
                .col(WithdrawIntent::Status)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(WithdrawIntent::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum WithdrawIntent {
    #[sea_orm(iden = "deposit_withdraw_intents")]
    Table,
    Id,
    DepositUuid,
    ToAddress,
    Status,
    RequestedAt,
    RequestedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Deposit {
    #[sea_orm(iden = "deposits")]
    Table,
    Uuid,
}
