//! # Multicall Batching
//!
//! Executes batches of read calls through a single `tryBlockAndAggregate` invocation on a
//! Multicall3 deployment. Calls are executed best-effort: an individual failure is reported in
//! its [`IMulticall3::Result`] instead of reverting the batch.
//!
//! Only the per-call results are returned. The block number and hash the batch executed in are
//! discarded, so results of separate batches are not guaranteed to come from the same block.

use crate::{
    constants::MULTICALL3_ADDRESS, error::BalanceError, metrics, provider::Connection,
    types::IMulticall3,
};
use alloy::{primitives::Address, sol_types::SolCall};
use tracing::{debug, instrument, warn};

/// Multicall3 batch coordinator.
#[derive(Debug, Clone)]
pub struct MulticallAggregator<C> {
    connection: C,
    multicall_address: Address,
}

impl<C> MulticallAggregator<C> {
    /// Create a new aggregator using the standard Multicall3 deployment.
    pub fn new(connection: C) -> Self {
        Self::with_address(connection, MULTICALL3_ADDRESS)
    }

    /// Create a new aggregator with a custom multicall address.
    pub fn with_address(connection: C, multicall_address: Address) -> Self {
        Self { connection, multicall_address }
    }

    /// The multicall contract address.
    pub fn multicall_address(&self) -> Address {
        self.multicall_address
    }

    /// The underlying connection.
    pub fn connection(&self) -> &C {
        &self.connection
    }
}

impl<C: Connection> MulticallAggregator<C> {
    /// Executes `calls` in one multicall invocation and returns their results in input order.
    ///
    /// Transport failures are propagated as is, with no retry. A missing multicall contract
    /// results in empty return data, which fails to decode.
    #[instrument(skip_all, fields(multicall = %self.multicall_address, calls = calls.len()))]
    pub async fn aggregate(
        &self,
        calls: Vec<IMulticall3::Call>,
    ) -> Result<Vec<IMulticall3::Result>, BalanceError> {
        if calls.is_empty() {
            return Ok(Vec::new());
        }

        let expected = calls.len();
        metrics::record_batch(expected);

        let input = IMulticall3::tryBlockAndAggregateCall { requireSuccess: false, calls };
        let output = self.connection.call(self.multicall_address, input.abi_encode().into()).await?;

        let ret = IMulticall3::tryBlockAndAggregateCall::abi_decode_returns(&output)?;
        debug!(block = %ret.blockNumber, results = ret.returnData.len(), "Executed batch");

        BalanceError::ensure_same_len("multicall results", expected, ret.returnData.len())?;

        Ok(ret.returnData)
    }

    /// Check if a multicall contract is deployed at the configured address.
    ///
    /// Probes with an empty batch, which any deployment answers without touching other
    /// contracts.
    #[instrument(skip(self))]
    pub async fn is_available(&self) -> bool {
        let input = IMulticall3::tryBlockAndAggregateCall { requireSuccess: false, calls: vec![] };
        match self.connection.call(self.multicall_address, input.abi_encode().into()).await {
            Ok(output) => {
                let available =
                    IMulticall3::tryBlockAndAggregateCall::abi_decode_returns(&output).is_ok();
                debug!(
                    multicall_address = ?self.multicall_address,
                    available,
                    "Multicall availability check"
                );
                available
            }
            Err(err) => {
                warn!(
                    error = ?err,
                    multicall_address = ?self.multicall_address,
                    "Failed to check multicall availability"
                );
                false
            }
        }
    }
}
