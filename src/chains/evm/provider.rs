use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ethers::providers::{ Http, Middleware, Provider };
use ethers::types::Address;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::error::{ AppError, Result };
use crate::providers::BalanceOracle;

const PRICES_API_BASE: &str = "https://prices.g.alchemy.com/v1";
const HTTP_TIMEOUT_SECS: u64 = 10;

/// Balance oracle over Alchemy JSON-RPC endpoints. One lazily created
/// provider per chain id; unknown chain ids fall back to the configured
/// default network.
pub struct EvmOracle {
    api_key: String,
    network: String,
    client: reqwest::Client,
    providers: RwLock<HashMap<i64, Arc<Provider<Http>>>>,
}

#[derive(Deserialize)]
struct PricesResponse {
    #[serde(default)]
    data: Vec<TokenPrices>,
}

#[derive(Deserialize)]
struct TokenPrices {
    #[serde(default)]
    prices: Vec<PriceQuote>,
}

#[derive(Deserialize)]
struct PriceQuote {
    #[serde(default)]
    currency: String,
    #[serde(default)]
    price: String,
}

impl EvmOracle {
    pub fn new(api_key: &str, network: &str) -> Result<Self> {
        let client = reqwest::Client
            ::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key: api_key.to_string(),
            network: network.to_string(),
            client,
            providers: RwLock::new(HashMap::new()),
        })
    }

    fn rpc_url(&self, chain_id: i64) -> String {
        let subdomain = match chain_id {
            1 => "eth-mainnet".to_string(),
            11155111 => "eth-sepolia".to_string(),
            8453 => "base-mainnet".to_string(),
            84532 => "base-sepolia".to_string(),
            _ if self.network == "mainnet" => "eth-mainnet".to_string(),
            _ => format!("eth-{}", self.network),
        };

        format!("https://{}.g.alchemy.com/v2/{}", subdomain, self.api_key)
    }

    async fn provider_for(&self, chain_id: i64) -> Result<Arc<Provider<Http>>> {
        {
            let providers = self.providers.read().await;
            if let Some(provider) = providers.get(&chain_id) {
                return Ok(provider.clone());
            }
        }

        let provider = Provider::<Http>
            ::try_from(self.rpc_url(chain_id))
            .map_err(|e| AppError::Rpc(format!("Failed to create provider: {}", e)))?;
        let provider = Arc::new(provider);

        let mut providers = self.providers.write().await;
        providers.insert(chain_id, provider.clone());

        Ok(provider)
    }
}

#[async_trait]
impl BalanceOracle for EvmOracle {
    async fn get_balance(&self, address: &str, chain_id: i64) -> Result<f64> {
        let addr: Address = address.parse().map_err(|_| AppError::InvalidAddress)?;

        let provider = self.provider_for(chain_id).await?;

        // eth_getBalance at the latest block; an error payload from the RPC
        // surfaces as Err here and is never treated as a zero balance.
        let wei = provider
            .get_balance(addr, None).await
            .map_err(|e| AppError::Rpc(format!("Failed to get balance: {}", e)))?;

        ethers::utils
            ::format_ether(wei)
            .parse::<f64>()
            .map_err(|e| AppError::Internal(format!("Failed to parse balance: {}", e)))
    }

    async fn usd_price(&self, symbol: &str) -> f64 {
        let url = format!("{}/tokens/by-symbol?symbols={}", PRICES_API_BASE, symbol);

        let response = match
            self.client
                .get(&url)
                .bearer_auth(&self.api_key)
                .send().await
        {
            Ok(r) if r.status().is_success() => r,
            _ => {
                return 0.0;
            }
        };

        let payload: PricesResponse = match response.json().await {
            Ok(p) => p,
            Err(_) => {
                return 0.0;
            }
        };

        payload.data
            .first()
            .and_then(|token| token.prices.iter().find(|p| p.currency == "USD"))
            .and_then(|p| p.price.parse::<f64>().ok())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_url_routes_known_chain_ids() {
        let oracle = EvmOracle::new("key", "mainnet").unwrap();
        assert!(oracle.rpc_url(1).starts_with("https://eth-mainnet.g.alchemy.com/v2/"));
        assert!(oracle.rpc_url(11155111).starts_with("https://eth-sepolia.g.alchemy.com/v2/"));
        assert!(oracle.rpc_url(8453).starts_with("https://base-mainnet.g.alchemy.com/v2/"));
    }

    #[test]
    fn test_rpc_url_falls_back_to_configured_network() {
        let oracle = EvmOracle::new("key", "sepolia").unwrap();
        assert!(oracle.rpc_url(999).starts_with("https://eth-sepolia.g.alchemy.com/v2/"));

        let oracle = EvmOracle::new("key", "mainnet").unwrap();
        assert!(oracle.rpc_url(999).starts_with("https://eth-mainnet.g.alchemy.com/v2/"));
    }
}
