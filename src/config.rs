use std::env;

use bip39::{Language, Mnemonic};

/// Process configuration, resolved once at startup from environment
/// variables and handed to the engine by reference. Job logic never reads
/// the environment on its own.
#[derive(Debug, Clone)]
pub struct Config {
    /// BIP-39 mnemonic the receiving addresses are derived from.
    pub mnemonic: String,
    pub database_url: String,
    pub alchemy_api_key: String,
    /// Default network used when a chain id has no explicit mapping
    /// ("mainnet", "sepolia", "base", ...).
    pub network: String,
    /// Accepted shortfall fraction below the required amount.
    pub tolerance: f64,
    pub tick_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        let mnemonic = env::var("MNEMONIC").map_err(|_| "MNEMONIC is required")?;
        Mnemonic::parse_in(Language::English, &mnemonic)
            .map_err(|_| "MNEMONIC is not a valid BIP-39 phrase")?;

        let database_url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL is required")?;
        let alchemy_api_key =
            env::var("ALCHEMY_API_KEY").map_err(|_| "ALCHEMY_API_KEY is required")?;

        let network = env::var("ALCHEMY_NETWORK")
            .unwrap_or_else(|_| "mainnet".to_string())
            .to_lowercase();

        let tolerance = env::var("FUNDING_TOLERANCE")
            .unwrap_or_else(|_| "0.05".to_string())
            .parse::<f64>()?;
        if !(0.0..1.0).contains(&tolerance) {
            return Err("FUNDING_TOLERANCE must be in [0, 1)".into());
        }

        let tick_interval_secs = env::var("TICK_INTERVAL_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()?;

        Ok(Config {
            mnemonic,
            database_url,
            alchemy_api_key,
            network,
            tolerance,
            tick_interval_secs,
        })
    }
}
