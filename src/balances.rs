//! `balanceOf` batches and their filtering.

use crate::{
    error::BalanceError,
    metrics,
    types::{AssociatedCallResult, IERC20, IMulticall3},
};
use alloy::{
    primitives::{Address, Bytes, map::AddressMap},
    sol_types::SolCall,
};
use tracing::trace;

/// Size of an ABI-encoded `uint256`.
const WORD_LEN: usize = 32;

/// Builds one `balanceOf(owner)` call per contract, in order.
pub fn build_balance_calls(owner: Address, contracts: &[Address]) -> Vec<IMulticall3::Call> {
    let call_data: Bytes = IERC20::balanceOfCall { owner }.abi_encode().into();
    contracts
        .iter()
        .map(|&target| IMulticall3::Call { target, callData: call_data.clone() })
        .collect()
}

/// Pairs balance results with their contracts, keeping only non-zero balances.
///
/// A result is kept iff its return data is exactly one 32-byte word that is not zero. Zero
/// balances are indistinguishable from non-compliant or missing contracts, so both are dropped
/// without error.
///
/// `results[i]` must belong to `contracts[i]`.
pub fn filter_non_zero(
    results: &[IMulticall3::Result],
    contracts: &[Address],
) -> Result<Vec<AssociatedCallResult>, BalanceError> {
    BalanceError::ensure_same_len("balance results", contracts.len(), results.len())?;

    let kept = results
        .iter()
        .zip(contracts)
        .filter_map(|(result, &contract)| {
            let data = &result.returnData;
            if data.len() != WORD_LEN {
                trace!(%contract, len = data.len(), "Dropping malformed balance");
                metrics::record_dropped("malformed");
                return None;
            }
            if data.iter().all(|byte| *byte == 0) {
                metrics::record_dropped("zero");
                return None;
            }
            Some(AssociatedCallResult::new(contract, result.success, data.clone()))
        })
        .collect();

    Ok(kept)
}

/// Indexes the raw balance words by contract.
pub fn raw_balances(results: &[AssociatedCallResult]) -> AddressMap<Bytes> {
    results.iter().map(|result| (result.contract, result.return_data.clone())).collect()
}
