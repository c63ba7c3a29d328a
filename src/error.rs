use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")] Database(#[from] sea_orm::DbErr),

    #[error("Invalid input: {0}")] InvalidInput(String),

    #[error("Chain error: {0}")] Chain(String),

    #[error("RPC error: {0}")] Rpc(String),

    #[error("Invalid address")]
    InvalidAddress,

    #[error("Invalid mnemonic")]
    InvalidMnemonic,

    #[error("Not found: {0}")] NotFound(String),

    #[error("Configuration error: {0}")] Config(String),

    #[error("Internal error: {0}")] Internal(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
