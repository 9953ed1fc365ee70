//! Balance lookup constants.

use alloy::primitives::{Address, ChainId, address};
use std::num::NonZeroUsize;

/// Standard Multicall3 deployment address (same across most chains).
///
/// See <https://github.com/mds1/multicall#multicall3-contract-addresses>
pub const MULTICALL3_ADDRESS: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

/// The ENS registry address on Ethereum mainnet.
pub const ENS_REGISTRY_ADDRESS: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

/// The only chain name resolution is supported on.
pub const ENS_CHAIN_ID: ChainId = 1;

/// Default number of `balanceOf` calls per multicall invocation.
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = NonZeroUsize::new(500).unwrap();

/// Default RPC endpoint of the CLI.
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";
