//! # Balances CLI
use crate::{
    config::BalancesConfig,
    fetcher::{BalanceFetcher, FetchOptions},
    provider::RpcConnection,
    types::TokenInfo,
};
use alloy::{
    primitives::{Address, map::AddressMap},
    providers::ProviderBuilder,
};
use clap::Parser;
use eyre::Context;
use std::{collections::BTreeMap, num::NonZeroUsize, path::PathBuf};
use tracing::info;
use url::Url;

/// Fetches the ERC-20 balances of an address through a multicall contract.
#[derive(Debug, Parser)]
#[command(author, version, about = "Balances", long_about = None)]
pub struct Args {
    /// The owner address or ENS name.
    #[arg(value_name = "ADDRESS_OR_NAME")]
    pub owner: String,
    /// The configuration file.
    ///
    /// Command line arguments take precedence over values from the file.
    #[arg(long, value_name = "CONFIG", env = "BALANCES_CONFIG")]
    pub config: Option<PathBuf>,
    /// The RPC endpoint of the chain to query.
    ///
    /// Must be a valid HTTP or HTTPS URL pointing to an Ethereum JSON-RPC endpoint.
    #[arg(long = "endpoint", value_name = "RPC_ENDPOINT", env = "BALANCES_RPC_URL")]
    pub endpoint: Option<Url>,
    /// A token contract to query. Extends the tokens of the configuration file.
    #[arg(long = "token", value_name = "ADDRESS")]
    pub tokens: Vec<Address>,
    /// Maximum number of `balanceOf` calls per multicall invocation.
    #[arg(long = "chunk-size", value_name = "NUM")]
    pub chunk_size: Option<NonZeroUsize>,
    /// The address of the multicall contract.
    #[arg(long = "multicall", value_name = "ADDRESS")]
    pub multicall: Option<Address>,
    /// Print raw integer balances instead of scaling them by the token decimals.
    #[arg(long, default_value_t = false)]
    pub raw: bool,
}

impl Args {
    /// Run the balance lookup and print the result as JSON.
    pub async fn run(self) -> eyre::Result<()> {
        let config = match &self.config {
            Some(path) => BalancesConfig::load_from_file(path)?,
            None => BalancesConfig::default(),
        };
        let owner = self.owner.clone();
        let config = self.merge_balances_config(config);
        if config.tokens.is_empty() {
            eyre::bail!("no token contracts to query, pass --token or list them in the config");
        }

        let provider = ProviderBuilder::new().connect_http(config.endpoint.clone());
        let fetcher =
            BalanceFetcher::new(RpcConnection::new(provider), FetchOptions::from(&config));

        let balances = fetcher
            .get_token_balances(&owner, &config.tokens)
            .await
            .wrap_err_with(|| format!("failed to fetch balances of {owner}"))?;
        info!(tokens = config.tokens.len(), held = balances.len(), "Fetched balances");

        println!("{}", render(&balances)?);
        Ok(())
    }

    /// Merges [`Args`] values into an existing [`BalancesConfig`] instance.
    pub fn merge_balances_config(self, config: BalancesConfig) -> BalancesConfig {
        let human_readable = config.human_readable && !self.raw;
        config
            .with_endpoint(self.endpoint)
            .with_multicall(self.multicall)
            .with_chunk_size(self.chunk_size)
            .with_human_readable(human_readable)
            .with_tokens(&self.tokens)
    }
}

/// Renders balances as a JSON object keyed by checksummed contract address.
fn render(balances: &AddressMap<TokenInfo>) -> eyre::Result<String> {
    let sorted: BTreeMap<String, &TokenInfo> =
        balances.iter().map(|(contract, info)| (contract.to_string(), info)).collect();
    Ok(serde_json::to_string_pretty(&sorted)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "balances",
            "vitalik.eth",
            "--token",
            "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
            "--chunk-size",
            "50",
            "--raw",
        ])
        .unwrap();

        assert_eq!(args.owner, "vitalik.eth");
        assert_eq!(args.tokens, vec![USDC]);
        assert_eq!(args.chunk_size, NonZeroUsize::new(50));
        assert!(args.raw);
    }

    #[test]
    fn test_parse_args_rejects_zero_chunk_size() {
        let args = Args::try_parse_from(["balances", "vitalik.eth", "--chunk-size", "0"]);
        assert!(args.is_err());
    }

    #[test]
    fn test_merge_config() {
        let args = Args::try_parse_from([
            "balances",
            "vitalik.eth",
            "--endpoint",
            "https://eth.example.org",
            "--token",
            "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
            "--raw",
        ])
        .unwrap();
        let file = BalancesConfig::default().with_chunk_size(NonZeroUsize::new(7));

        let config = args.merge_balances_config(file);

        assert_eq!(config.endpoint.as_str(), "https://eth.example.org/");
        assert_eq!(config.chunk_size.get(), 7);
        assert!(!config.human_readable);
        assert_eq!(config.tokens, vec![USDC]);
    }

    #[test]
    fn test_render() {
        let balances = AddressMap::from_iter([(
            USDC,
            TokenInfo {
                symbol: "USDC".into(),
                name: "USD Coin".into(),
                decimals: 6,
                balance_of: "1.5".into(),
            },
        )]);

        let json: serde_json::Value = serde_json::from_str(&render(&balances).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48": {
                    "symbol": "USDC",
                    "name": "USD Coin",
                    "decimals": 6,
                    "balanceOf": "1.5"
                }
            })
        );
    }
}
