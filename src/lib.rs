pub mod config;
pub mod enums;
pub mod error;
pub mod db;
pub mod providers;
pub mod chains;
pub mod status;
pub mod broadcaster;
pub mod engine;

pub use config::Config;
pub use enums::{ AddressNamespace, IntentStatus, TxStatus };
pub use error::{ AppError, Result };
