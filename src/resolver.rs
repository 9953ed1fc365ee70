//! Owner address resolution.

use crate::{
    constants::ENS_CHAIN_ID,
    error::{BalanceError, ResolveError},
    provider::Connection,
};
use alloy::primitives::{Address, B256, keccak256};
use tracing::{debug, instrument};

/// Resolves `input` to an address.
///
/// A well-formed hex address is returned as is, without touching the network. Anything else is
/// treated as an ENS name, which can only be resolved on Ethereum mainnet.
#[instrument(skip(connection))]
pub async fn resolve_address<C: Connection + ?Sized>(
    input: &str,
    connection: &C,
) -> Result<Address, BalanceError> {
    if let Ok(address) = input.parse::<Address>() {
        return Ok(address);
    }

    let chain_id = connection.chain_id().await?;
    if chain_id != ENS_CHAIN_ID {
        return Err(ResolveError::UnsupportedNetwork(chain_id).into());
    }

    let address = connection
        .resolve_name(input)
        .await?
        .ok_or_else(|| ResolveError::InvalidName(input.to_string()))?;
    debug!(%address, "Resolved owner name");

    Ok(address)
}

/// Computes the EIP-137 namehash of `name`.
///
/// Labels are lowercased; no further normalization is applied.
pub fn namehash(name: &str) -> B256 {
    if name.is_empty() {
        return B256::ZERO;
    }

    name.to_lowercase().rsplit('.').fold(B256::ZERO, |node, label| {
        keccak256([node.as_slice(), keccak256(label.as_bytes()).as_slice()].concat())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockChain;
    use alloy::primitives::{address, b256};

    const VITALIK: Address = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");

    #[test]
    fn test_namehash() {
        assert_eq!(namehash(""), B256::ZERO);
        assert_eq!(
            namehash("eth"),
            b256!("93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae")
        );
        assert_eq!(
            namehash("foo.eth"),
            b256!("de9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f")
        );
        assert_eq!(namehash("Foo.ETH"), namehash("foo.eth"));
    }

    #[tokio::test]
    async fn test_address_passthrough() {
        // a chain that does not support names must not be consulted for plain addresses
        let chain = MockChain::new(137);

        let resolved = resolve_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045", &chain)
            .await
            .unwrap();
        assert_eq!(resolved, VITALIK);

        let lowercase = resolve_address("0xd8da6bf26964af9d7eed9e03e53415d37aa96045", &chain)
            .await
            .unwrap();
        assert_eq!(lowercase, VITALIK);
        assert_eq!(chain.requests(), 0);
    }

    #[tokio::test]
    async fn test_resolve_name() {
        let chain = MockChain::new(1).with_name("vitalik.eth", VITALIK);

        assert_eq!(resolve_address("vitalik.eth", &chain).await.unwrap(), VITALIK);
    }

    #[tokio::test]
    async fn test_unsupported_network() {
        let chain = MockChain::new(10).with_name("vitalik.eth", VITALIK);

        let err = resolve_address("vitalik.eth", &chain).await.unwrap_err();
        assert!(matches!(err, BalanceError::Resolve(ResolveError::UnsupportedNetwork(10))));
    }

    #[tokio::test]
    async fn test_invalid_name() {
        let chain = MockChain::new(1);

        let err = resolve_address("nobody.eth", &chain).await.unwrap_err();
        assert!(
            matches!(err, BalanceError::Resolve(ResolveError::InvalidName(ref name)) if name == "nobody.eth")
        );
    }
}
