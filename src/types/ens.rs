//! ENS registry and resolver interfaces used for name resolution.

use alloy::sol;

sol! {
    /// The ENS registry, mapping name nodes to their resolvers.
    #[sol(rpc)]
    #[derive(Debug)]
    interface IEnsRegistry {
        /// Returns the resolver contract of `node`, or the zero address if none is set.
        function resolver(bytes32 node) external view returns (address);
    }

    /// A public ENS resolver.
    #[sol(rpc)]
    #[derive(Debug)]
    interface IEnsResolver {
        /// Returns the address `node` resolves to, or the zero address.
        function addr(bytes32 node) external view returns (address);
    }
}
