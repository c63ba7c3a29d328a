pub use sea_orm_migration::prelude::*;

mod m20250110_000001_create_evm_transactions_table;
mod m20250110_000002_create_transaction_statuses_table;
mod m20250111_000001_create_deposits_table;
mod m20250111_000002_create_deposit_history_table;
mod m20250111_000003_create_withdraw_intents_table;
mod m20250112_000001_create_config_table;
mod m20250112_000002_create_accepted_tokens_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250110_000001_create_evm_transactions_table::Migration),
            Box::new(m20250110_000002_create_transaction_statuses_table::Migration),
            Box::new(m20250111_000001_create_deposits_table::Migration),
            Box::new(m20250111_000002_create_deposit_history_table::Migration),
            Box::new(m20250111_000003_create_withdraw_intents_table::Migration),
            Box::new(m20250112_000001_create_config_table::Migration),
            Box::new(m20250112_000002_create_accepted_tokens_table::Migration)
        ]
    }
}
