//! ERC-20 metadata batches and their decoding.
//!
//! Metadata is fetched with three calls per contract. Many older tokens return `bytes32`
//! instead of `string` from `symbol()` and `name()`, so every value goes through a two-step
//! decode: the standard ABI output type first, then a null-padded `bytes32` reading of the raw
//! word.

use crate::{
    error::BalanceError,
    metrics,
    types::{AssociatedCallResult, CallContext, IERC20, IMulticall3, MetaMethod, TokenMeta},
};
use alloy::{
    primitives::{
        Address, U256,
        map::{AddressMap, HashSet},
    },
    sol_types::{SolCall, SolValue},
};
use tracing::{info, warn};

/// Size of a single ABI word.
const WORD_LEN: usize = 32;

/// Outcome of decoding one metadata value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    /// The value decoded as the method's standard output type.
    Abi(T),
    /// Standard decoding failed; the value was read from a null-padded `bytes32`.
    Fallback(T),
    /// Neither decoding applies.
    Undecodable,
}

impl<T> Decoded<T> {
    /// Returns the decoded value, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Abi(value) | Self::Fallback(value) => Some(value),
            Self::Undecodable => None,
        }
    }
}

/// Builds the `symbol`, `decimals` and `name` calls for every distinct contract in `results`.
///
/// Contracts keep their order of first appearance. The returned call and context lists are
/// parallel: `calls[i]` is described by `context[i]`.
pub fn build_meta_calls(
    results: &[AssociatedCallResult],
) -> (Vec<IMulticall3::Call>, Vec<CallContext>) {
    let mut seen = HashSet::<Address>::default();
    let mut calls = Vec::with_capacity(results.len() * MetaMethod::ALL.len());
    let mut context = Vec::with_capacity(calls.capacity());

    for contract in results.iter().map(|result| result.contract) {
        if !seen.insert(contract) {
            continue;
        }
        for method in MetaMethod::ALL {
            calls.push(IMulticall3::Call { target: contract, callData: method.call_data() });
            context.push(CallContext { contract, method });
        }
    }

    (calls, context)
}

/// Decodes a metadata batch into per-contract [`TokenMeta`].
///
/// Every contract named in `context` gets an entry; fields that cannot be decoded keep their
/// default. `results[i]` must be the result of the call described by `context[i]`.
pub fn decode_meta(
    results: &[IMulticall3::Result],
    context: &[CallContext],
) -> Result<AddressMap<TokenMeta>, BalanceError> {
    BalanceError::ensure_same_len("metadata results", context.len(), results.len())?;

    let mut meta = AddressMap::<TokenMeta>::default();
    for (result, ctx) in results.iter().zip(context) {
        let entry = meta.entry(ctx.contract).or_default();
        // revert data is never metadata
        let data: &[u8] = if result.success { &result.returnData } else { &[] };

        match ctx.method {
            MetaMethod::Symbol => {
                if let Some(symbol) = settle(ctx, decode_text::<IERC20::symbolCall>(data)) {
                    entry.symbol = symbol;
                }
            }
            MetaMethod::Name => {
                if let Some(name) = settle(ctx, decode_text::<IERC20::nameCall>(data)) {
                    entry.name = name;
                }
            }
            MetaMethod::Decimals => {
                if let Some(decimals) = settle(ctx, decode_decimals(data)) {
                    entry.decimals = decimals;
                }
            }
        }
    }

    Ok(meta)
}

/// Decodes the output of a `string` getter such as `symbol` or `name`.
pub fn decode_text<C: SolCall<Return = String>>(data: &[u8]) -> Decoded<String> {
    match C::abi_decode_returns(data) {
        Ok(text) => Decoded::Abi(text),
        Err(_) => bytes32_text(data).map_or(Decoded::Undecodable, Decoded::Fallback),
    }
}

/// Decodes the output of `decimals()`.
///
/// The standard output is a `uint8`; a word that does not fit is treated as non-standard.
pub fn decode_decimals(data: &[u8]) -> Decoded<u8> {
    if let Some(decimals) = U256::abi_decode(data).ok().and_then(|word| u8::try_from(word).ok()) {
        return Decoded::Abi(decimals);
    }

    bytes32_text(data)
        .and_then(|text| text.trim().parse().ok())
        .map_or(Decoded::Undecodable, Decoded::Fallback)
}

/// Reads a single word as a null-padded UTF-8 string.
fn bytes32_text(data: &[u8]) -> Option<String> {
    if data.len() != WORD_LEN {
        return None;
    }
    let end = data.iter().position(|byte| *byte == 0).unwrap_or(WORD_LEN);
    String::from_utf8(data[..end].to_vec()).ok()
}

/// Unwraps a decoded value, reporting the non-standard paths.
fn settle<T>(ctx: &CallContext, decoded: Decoded<T>) -> Option<T> {
    match decoded {
        Decoded::Abi(value) => Some(value),
        Decoded::Fallback(value) => {
            info!(
                contract = %ctx.contract,
                method = %ctx.method,
                "Standard decoding failed, using bytes32 fallback"
            );
            metrics::record_fallback(ctx.method);
            Some(value)
        }
        Decoded::Undecodable => {
            warn!(contract = %ctx.contract, method = %ctx.method, "Undecodable metadata");
            metrics::record_undecodable(ctx.method);
            None
        }
    }
}
