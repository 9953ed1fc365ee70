//! Balance lookup configuration.
use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_RPC_URL, MULTICALL3_ADDRESS};
use alloy::primitives::Address;
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::{num::NonZeroUsize, path::Path};
use url::Url;

/// Balance lookup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancesConfig {
    /// The RPC endpoint of the chain to query.
    pub endpoint: Url,
    /// The multicall contract address.
    #[serde(default = "default_multicall")]
    pub multicall: Address,
    /// Maximum number of `balanceOf` calls per multicall invocation.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: NonZeroUsize,
    /// Whether balances are scaled by the token decimals.
    #[serde(default = "default_human_readable")]
    pub human_readable: bool,
    /// Token contracts to query.
    #[serde(default)]
    pub tokens: Vec<Address>,
}

impl Default for BalancesConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            multicall: MULTICALL3_ADDRESS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            human_readable: true,
            tokens: Vec::new(),
        }
    }
}

impl BalancesConfig {
    /// Sets the RPC endpoint.
    pub fn with_endpoint(mut self, endpoint: Option<Url>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        self
    }

    /// Sets the multicall contract address.
    pub fn with_multicall(mut self, multicall: Option<Address>) -> Self {
        if let Some(multicall) = multicall {
            self.multicall = multicall;
        }
        self
    }

    /// Sets the number of `balanceOf` calls per multicall invocation.
    pub fn with_chunk_size(mut self, chunk_size: Option<NonZeroUsize>) -> Self {
        if let Some(chunk_size) = chunk_size {
            self.chunk_size = chunk_size;
        }
        self
    }

    /// Sets whether balances are scaled by the token decimals.
    pub fn with_human_readable(mut self, human_readable: bool) -> Self {
        self.human_readable = human_readable;
        self
    }

    /// Extends the list of token contracts to query.
    pub fn with_tokens(mut self, tokens: &[Address]) -> Self {
        self.tokens.extend(tokens);
        self
    }

    /// Load from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("failed to read config file: {}", path.display()))?;
        let config = serde_yaml::from_reader(&file)
            .wrap_err_with(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save to a YAML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> eyre::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn default_endpoint() -> Url {
    Url::parse(DEFAULT_RPC_URL).expect("default RPC URL is valid")
}

fn default_multicall() -> Address {
    MULTICALL3_ADDRESS
}

fn default_chunk_size() -> NonZeroUsize {
    DEFAULT_CHUNK_SIZE
}

fn default_human_readable() -> bool {
    true
}
