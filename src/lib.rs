//! # Multicall Balances
//!
//! Batched ERC-20 balance and metadata lookups.
//!
//! Balances of an owner are fetched with `balanceOf` calls aggregated through a Multicall3
//! deployment. Tokens holding a non-zero balance then get their `symbol`, `decimals` and `name`
//! fetched in one more batch, tolerating tokens that return `bytes32` instead of `string`.

pub mod balances;
pub mod chunk;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetcher;
pub mod metadata;
mod metrics;
pub mod multicall;
pub mod normalize;
pub mod provider;
pub mod resolver;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use fetcher::{BalanceFetcher, FetchOptions, get_token_balances};
