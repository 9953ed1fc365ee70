//! Balance decoding and formatting.

use crate::{
    error::BalanceError,
    types::{TokenInfo, TokenMeta},
};
use alloy::{
    primitives::{Bytes, U256, map::AddressMap, utils::format_units},
    sol_types::SolValue,
};
use tracing::warn;

/// Merges decoded metadata with raw balance words into [`TokenInfo`] records.
///
/// One record is produced per entry of `meta`. Balances of contracts without metadata are
/// ignored, while metadata without a balance is an error. With `human_readable` set balances
/// are scaled by the token's decimals, otherwise they are the raw integer.
pub fn normalize(
    meta: &AddressMap<TokenMeta>,
    raw_balances: &AddressMap<Bytes>,
    human_readable: bool,
) -> Result<AddressMap<TokenInfo>, BalanceError> {
    for contract in raw_balances.keys().filter(|contract| !meta.contains_key(*contract)) {
        warn!(%contract, "Ignoring balance of token without metadata");
    }

    meta.iter()
        .map(|(&contract, meta)| {
            let raw = raw_balances.get(&contract).ok_or(BalanceError::MissingBalance(contract))?;
            let balance = U256::abi_decode(raw)?;
            let balance_of = if human_readable {
                format_balance(balance, meta.decimals)
            } else {
                balance.to_string()
            };
            Ok((contract, TokenInfo::new(meta.clone(), balance_of)))
        })
        .collect()
}

/// Formats `balance` as a decimal string scaled by `10^-decimals`.
///
/// Trailing fractional zeros are removed, so whole amounts carry no decimal point. Decimals
/// beyond what a `U256` can scale by leave the balance unscaled.
pub fn format_balance(balance: U256, decimals: u8) -> String {
    match format_units(balance, decimals) {
        Ok(formatted) if formatted.contains('.') => {
            formatted.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        Ok(formatted) => formatted,
        Err(err) => {
            warn!(%err, decimals, "Cannot scale balance, using raw value");
            balance.to_string()
        }
    }
}
