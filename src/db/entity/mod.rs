pub mod evm_transaction;
pub mod transaction_status;
pub mod deposit;
pub mod deposit_history;
pub mod withdraw_intent;
pub mod app_config;
pub mod accepted_token;

pub use evm_transaction::Entity as EvmTransaction;
pub use transaction_status::Entity as TransactionStatus;
pub use deposit::Entity as Deposit;
pub use deposit_history::Entity as DepositHistory;
pub use withdraw_intent::Entity as WithdrawIntent;
pub use app_config::Entity as AppConfig;
pub use accepted_token::Entity as AcceptedToken;
