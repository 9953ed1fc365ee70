//! Multicall contract interface for batching multiple read calls.

use alloy::sol;

sol! {
    /// Multicall3 interface. Deployed at the same address on most EVM chains.
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    interface IMulticall3 {
        /// A single call in a multicall batch.
        struct Call {
            /// Target contract address.
            address target;
            /// Encoded function call data.
            bytes callData;
        }

        /// Result of a single call in a batch.
        struct Result {
            /// Whether the call was successful.
            bool success;
            /// The return data from the call, or the revert data on failure.
            bytes returnData;
        }

        /// Executes every call and returns the block the batch was executed in.
        ///
        /// With `requireSuccess` unset a failing call does not revert the batch.
        function tryBlockAndAggregate(bool requireSuccess, Call[] calldata calls)
            external
            payable
            returns (uint256 blockNumber, bytes32 blockHash, Result[] memory returnData);
    }
}
