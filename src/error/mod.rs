//! Balance lookup error types.
use alloy::{
    primitives::Address,
    transports::{RpcError, TransportErrorKind},
};
use thiserror::Error;

mod resolve;
pub use resolve::ResolveError;

/// The overarching error type returned by a balance lookup.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// Errors related to resolving the owner address.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// Two sequences that must correspond index by index differ in length.
    #[error("{kind}: expected {expected} entries, got {actual}")]
    LengthMismatch {
        /// The sequences being paired.
        kind: &'static str,
        /// The length of the reference sequence.
        expected: usize,
        /// The length of the sequence paired with it.
        actual: usize,
    },
    /// A token has decoded metadata but no balance.
    #[error("no balance for token {0}")]
    MissingBalance(Address),
    /// An error occurred during ABI encoding/decoding.
    #[error(transparent)]
    AbiError(#[from] alloy::sol_types::Error),
    /// An error occurred talking to RPC.
    #[error(transparent)]
    RpcError(#[from] RpcError<TransportErrorKind>),
    /// An internal error occurred.
    #[error(transparent)]
    InternalError(#[from] eyre::Error),
}

impl BalanceError {
    /// Fails with [`BalanceError::LengthMismatch`] unless both lengths are equal.
    pub(crate) fn ensure_same_len(
        kind: &'static str,
        expected: usize,
        actual: usize,
    ) -> Result<(), Self> {
        if expected != actual {
            return Err(Self::LengthMismatch { kind, expected, actual });
        }
        Ok(())
    }
}
