use alloy::primitives::ChainId;

/// Errors returned while turning a name into an owner address.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Name resolution is only available on Ethereum mainnet.
    #[error("name resolution is not supported on chain {0}")]
    UnsupportedNetwork(ChainId),
    /// The name did not resolve to an address.
    #[error("{0} is neither an address nor a resolvable name")]
    InvalidName(String),
}
