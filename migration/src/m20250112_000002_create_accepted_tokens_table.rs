use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(AcceptedToken::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(AcceptedToken::Id)
                        .big_integer()
                        .not_null()
                        .auto_increment()
                        .primary_key()
                )
                .col(ColumnDef::new(AcceptedToken::ChainId).big_integer().not_null())
                .col(ColumnDef::new(AcceptedToken::Symbol).string_len(20).not_null())
                .col(ColumnDef::new(AcceptedToken::ContractAddress).string().null())
                .col(ColumnDef::new(AcceptedToken::CreatedAt).timestamp().not_null())
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_accepted_tokens_symbol")
                .table(AcceptedToken::Table)
                .col(AcceptedToken::Symbol)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AcceptedToken::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AcceptedToken {
    #[sea_orm(iden = "accepted_tokens")]
    Table,
    Id,
    ChainId,
    Symbol,
    ContractAddress,
    CreatedAt,
}
