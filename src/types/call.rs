//! Positional bookkeeping for batched calls.

use super::IERC20;
use alloy::{
    primitives::{Address, Bytes},
    sol_types::SolCall,
};
use std::fmt;

/// A batch result paired with the contract it was issued against.
///
/// Only produced when calls map 1:1 onto contracts, as is the case for `balanceOf` batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociatedCallResult {
    /// The contract the call targeted.
    pub contract: Address,
    /// Whether the call succeeded.
    pub success: bool,
    /// The raw return data.
    pub return_data: Bytes,
}

impl AssociatedCallResult {
    /// Create a new instance of [`Self`].
    pub fn new(contract: Address, success: bool, return_data: Bytes) -> Self {
        Self { contract, success, return_data }
    }
}

/// ERC-20 metadata getters queried for every token with a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaMethod {
    /// `symbol() returns (string)`
    Symbol,
    /// `decimals() returns (uint8)`
    Decimals,
    /// `name() returns (string)`
    Name,
}

impl MetaMethod {
    /// Every metadata method, in the order they are batched per contract.
    pub const ALL: [Self; 3] = [Self::Symbol, Self::Decimals, Self::Name];

    /// The Solidity method name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Symbol => "symbol",
            Self::Decimals => "decimals",
            Self::Name => "name",
        }
    }

    /// ABI-encoded calldata for this getter.
    pub fn call_data(&self) -> Bytes {
        match self {
            Self::Symbol => IERC20::symbolCall {}.abi_encode().into(),
            Self::Decimals => IERC20::decimalsCall {}.abi_encode().into(),
            Self::Name => IERC20::nameCall {}.abi_encode().into(),
        }
    }
}

impl fmt::Display for MetaMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a metadata call back to its contract and method.
///
/// A metadata batch carries one context entry per call, at the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// The contract the call targets.
    pub contract: Address,
    /// The getter being called.
    pub method: MetaMethod,
}
