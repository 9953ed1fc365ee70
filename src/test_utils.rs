//! In-memory chain used by unit tests.

use crate::{
    constants::MULTICALL3_ADDRESS,
    provider::Connection,
    types::{IERC20, IMulticall3},
};
use alloy::{
    primitives::{Address, B256, Bytes, ChainId, U256, map::AddressMap},
    sol_types::{SolCall, SolValue},
    transports::{TransportErrorKind, TransportResult},
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

/// A token deployed on a [`MockChain`], with the raw output of each getter.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockToken {
    balances: AddressMap<U256>,
    symbol: Bytes,
    name: Bytes,
    decimals: Bytes,
}

impl MockToken {
    /// A standard compliant token.
    pub(crate) fn new(symbol: &str, name: &str, decimals: u8) -> Self {
        Self {
            balances: AddressMap::default(),
            symbol: (symbol.to_string(),).abi_encode_params().into(),
            name: (name.to_string(),).abi_encode_params().into(),
            decimals: U256::from(decimals).abi_encode().into(),
        }
    }

    /// A token returning `bytes32` from `symbol()` and `name()`.
    pub(crate) fn bytes32(symbol: &str, name: &str, decimals: u8) -> Self {
        Self {
            symbol: B256::right_padding_from(symbol.as_bytes()).to_vec().into(),
            name: B256::right_padding_from(name.as_bytes()).to_vec().into(),
            ..Self::new("", "", decimals)
        }
    }

    /// Credit `owner` with `amount`.
    pub(crate) fn with_balance(mut self, owner: Address, amount: u64) -> Self {
        self.balances.insert(owner, U256::from(amount));
        self
    }

    fn respond(&self, input: &[u8]) -> Bytes {
        let selector = input.get(..4).unwrap_or_default();
        if selector == IERC20::balanceOfCall::SELECTOR {
            IERC20::balanceOfCall::abi_decode(input)
                .map(|call| {
                    self.balances.get(&call.owner).copied().unwrap_or_default().abi_encode().into()
                })
                .unwrap_or_default()
        } else if selector == IERC20::symbolCall::SELECTOR {
            self.symbol.clone()
        } else if selector == IERC20::nameCall::SELECTOR {
            self.name.clone()
        } else if selector == IERC20::decimalsCall::SELECTOR {
            self.decimals.clone()
        } else {
            Bytes::new()
        }
    }
}

/// A chain with a multicall deployment at [`MULTICALL3_ADDRESS`] and a set of tokens.
///
/// Calls to addresses without code return empty data, like `eth_call` does.
#[derive(Debug, Default)]
pub(crate) struct MockChain {
    chain_id: ChainId,
    tokens: AddressMap<MockToken>,
    names: HashMap<String, Address>,
    failing: bool,
    requests: AtomicUsize,
    batches: Mutex<Vec<usize>>,
}

impl MockChain {
    pub(crate) fn new(chain_id: ChainId) -> Self {
        Self { chain_id, ..Default::default() }
    }

    pub(crate) fn with_token(mut self, address: Address, token: MockToken) -> Self {
        self.tokens.insert(address, token);
        self
    }

    pub(crate) fn with_name(mut self, name: &str, address: Address) -> Self {
        self.names.insert(name.to_string(), address);
        self
    }

    /// Make every request fail at the transport level.
    pub(crate) fn with_failing_transport(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Number of requests served.
    pub(crate) fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    /// Number of calls in each multicall batch, in execution order.
    pub(crate) fn batches(&self) -> Vec<usize> {
        self.batches.lock().unwrap().clone()
    }

    fn request(&self) -> TransportResult<()> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if self.failing {
            return Err(TransportErrorKind::custom_str("connection refused"));
        }
        Ok(())
    }

    fn execute(&self, to: Address, input: &[u8]) -> Bytes {
        self.tokens.get(&to).map(|token| token.respond(input)).unwrap_or_default()
    }

    fn aggregate(&self, input: &[u8]) -> TransportResult<Bytes> {
        let batch = IMulticall3::tryBlockAndAggregateCall::abi_decode(input)
            .map_err(TransportErrorKind::custom)?;
        self.batches.lock().unwrap().push(batch.calls.len());

        let results: Vec<_> = batch
            .calls
            .iter()
            .map(|call| {
                let success = self.tokens.contains_key(&call.target);
                IMulticall3::Result { success, returnData: self.execute(call.target, &call.callData) }
            })
            .collect();

        Ok((U256::from(1), B256::ZERO, results).abi_encode_params().into())
    }
}

#[async_trait]
impl Connection for MockChain {
    async fn call(&self, to: Address, input: Bytes) -> TransportResult<Bytes> {
        self.request()?;
        if to == MULTICALL3_ADDRESS {
            return self.aggregate(&input);
        }
        Ok(self.execute(to, &input))
    }

    async fn chain_id(&self) -> TransportResult<ChainId> {
        self.request()?;
        Ok(self.chain_id)
    }

    async fn resolve_name(&self, name: &str) -> TransportResult<Option<Address>> {
        self.request()?;
        Ok(self.names.get(name).copied())
    }
}
