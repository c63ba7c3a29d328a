use std::sync::Arc;

use escrow_reconciler::broadcaster::LedgerOnlyBroadcaster;
use escrow_reconciler::chains::evm::EvmOracle;
use escrow_reconciler::engine::ReconciliationEngine;
use escrow_reconciler::{ AppError, Config, Result };
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber
        ::registry()
        .with(
            tracing_subscriber::EnvFilter
                ::try_from_default_env()
                .unwrap_or_else(|_| "escrow_reconciler=debug".into())
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; missing secrets abort here, before any tick runs
    let config = Config::from_env().map_err(|e| AppError::Config(e.to_string()))?;

    tracing::info!("Starting escrow-reconciler on network: {}", config.network);

    // Initialize database connection
    let db = sea_orm::Database
        ::connect(&config.database_url).await
        .map_err(AppError::Database)?;

    tracing::info!("Database connected successfully");

    // Run migrations
    migration::Migrator::up(&db, None).await.map_err(AppError::Database)?;

    tracing::info!("Migrations completed successfully");

    let oracle = Arc::new(EvmOracle::new(&config.alchemy_api_key, &config.network)?);
    let broadcaster = Arc::new(LedgerOnlyBroadcaster);

    let tick_interval = config.tick_interval_secs;
    let engine = ReconciliationEngine::new(db, Arc::new(config), oracle, broadcaster);

    tracing::info!("Reconciliation engine started, tick every {}s", tick_interval);

    engine.start().await;

    Ok(())
}
