use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Deposit::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Deposit::Uuid)
                        .uuid()
                        .not_null()
                        .primary_key()
                )
                .col(ColumnDef::new(Deposit::Crypto).string_len(20).not_null())
                .col(ColumnDef::new(Deposit::Address).string().null())
                .col(ColumnDef::new(Deposit::CryptoValue).double().not_null())
                .col(ColumnDef::new(Deposit::CreatedAt).timestamp().not_null())
                .col(ColumnDef::new(Deposit::UpdatedAt).timestamp().null())
                .col(ColumnDef::new(Deposit::DeletedAt).timestamp().null())
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_deposits_crypto")
                .table(Deposit::Table)
                .col(Deposit::Crypto)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Deposit::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Deposit {
    #[sea_orm(iden = "deposits")]
    Table,
    Uuid,
    Crypto,
    Address,
    CryptoValue,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
