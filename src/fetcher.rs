//! Balance lookups across many tokens.

use crate::{
    balances::{build_balance_calls, filter_non_zero, raw_balances},
    chunk::chunk,
    config::BalancesConfig,
    constants::{DEFAULT_CHUNK_SIZE, MULTICALL3_ADDRESS},
    error::BalanceError,
    metadata::{build_meta_calls, decode_meta},
    multicall::MulticallAggregator,
    normalize::normalize,
    provider::Connection,
    resolver::resolve_address,
    types::TokenInfo,
};
use alloy::primitives::{Address, map::AddressMap};
use futures_util::future::try_join_all;
use std::num::NonZeroUsize;
use tracing::{debug, instrument};

/// Options of a balance lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Maximum number of `balanceOf` calls per multicall invocation.
    pub chunk_size: NonZeroUsize,
    /// Whether balances are scaled by the token decimals.
    pub human_readable: bool,
    /// The multicall contract address.
    pub multicall_address: Address,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            human_readable: true,
            multicall_address: MULTICALL3_ADDRESS,
        }
    }
}

impl From<&BalancesConfig> for FetchOptions {
    fn from(config: &BalancesConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            human_readable: config.human_readable,
            multicall_address: config.multicall,
        }
    }
}

/// Fetches token balances and metadata of an owner through multicall batches.
#[derive(Debug, Clone)]
pub struct BalanceFetcher<C> {
    aggregator: MulticallAggregator<C>,
    options: FetchOptions,
}

impl<C> BalanceFetcher<C> {
    /// Create a new fetcher over `connection`.
    pub fn new(connection: C, options: FetchOptions) -> Self {
        Self {
            aggregator: MulticallAggregator::with_address(connection, options.multicall_address),
            options,
        }
    }

    /// The options of this fetcher.
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// The multicall aggregator the fetcher batches through.
    pub fn aggregator(&self) -> &MulticallAggregator<C> {
        &self.aggregator
    }
}

impl<C: Connection> BalanceFetcher<C> {
    /// Returns the non-zero balances of `address_or_name` across `contracts`, with metadata.
    ///
    /// `balanceOf` calls are split into chunks that are aggregated concurrently; metadata for
    /// every token with a balance is then fetched in one additional batch. Any failed batch
    /// fails the whole lookup.
    #[instrument(skip(self, contracts), fields(contracts = contracts.len()))]
    pub async fn get_token_balances(
        &self,
        address_or_name: &str,
        contracts: &[Address],
    ) -> Result<AddressMap<TokenInfo>, BalanceError> {
        let owner = resolve_address(address_or_name, self.aggregator.connection()).await?;

        let chunks = chunk(contracts, self.options.chunk_size);
        debug!(%owner, chunks = chunks.len(), "Fetching balances");

        let results: Vec<_> = try_join_all(
            chunks.iter().map(|batch| self.aggregator.aggregate(build_balance_calls(owner, batch))),
        )
        .await?
        .into_iter()
        .flatten()
        .collect();

        let non_zero = filter_non_zero(&results, contracts)?;
        debug!(tokens = non_zero.len(), "Fetching metadata of held tokens");

        let (calls, context) = build_meta_calls(&non_zero);
        let meta_results = self.aggregator.aggregate(calls).await?;
        let meta = decode_meta(&meta_results, &context)?;

        normalize(&meta, &raw_balances(&non_zero), self.options.human_readable)
    }
}

/// Returns the non-zero balances of `address_or_name` across `contracts`, with metadata.
///
/// See [`BalanceFetcher::get_token_balances`].
pub async fn get_token_balances<C: Connection>(
    connection: C,
    address_or_name: &str,
    contracts: &[Address],
    options: FetchOptions,
) -> Result<AddressMap<TokenInfo>, BalanceError> {
    BalanceFetcher::new(connection, options).get_token_balances(address_or_name, contracts).await
}
