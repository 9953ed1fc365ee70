//! Chain access consumed by the balance pipeline.

use crate::{
    constants::ENS_REGISTRY_ADDRESS,
    resolver::namehash,
    types::{IEnsRegistry, IEnsResolver},
};
use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, ChainId},
    providers::Provider,
    rpc::types::TransactionRequest,
    sol_types::SolCall,
    transports::{TransportErrorKind, TransportResult},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Read-only access to a chain.
///
/// Retries, timeouts and rate limiting are the implementor's concern.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Executes a read-only call of `input` against `to` and returns the raw output.
    async fn call(&self, to: Address, input: Bytes) -> TransportResult<Bytes>;

    /// Returns the chain id of the network.
    async fn chain_id(&self) -> TransportResult<ChainId>;

    /// Resolves a human-readable name, returning `None` if it has no address.
    async fn resolve_name(&self, name: &str) -> TransportResult<Option<Address>>;
}

#[async_trait]
impl<C: Connection + ?Sized> Connection for Arc<C> {
    async fn call(&self, to: Address, input: Bytes) -> TransportResult<Bytes> {
        (**self).call(to, input).await
    }

    async fn chain_id(&self) -> TransportResult<ChainId> {
        (**self).chain_id().await
    }

    async fn resolve_name(&self, name: &str) -> TransportResult<Option<Address>> {
        (**self).resolve_name(name).await
    }
}

/// A [`Connection`] backed by an Alloy provider.
///
/// Names are resolved through the ENS registry.
#[derive(Debug, Clone)]
pub struct RpcConnection<P> {
    /// The underlying provider
    inner: P,
}

impl<P> RpcConnection<P> {
    /// Create a new connection wrapping `provider`.
    pub fn new(provider: P) -> Self {
        Self { inner: provider }
    }

    /// Returns the wrapped provider.
    pub fn as_provider(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: Provider> Connection for RpcConnection<P> {
    async fn call(&self, to: Address, input: Bytes) -> TransportResult<Bytes> {
        self.inner.call(TransactionRequest::default().with_to(to).with_input(input)).await
    }

    async fn chain_id(&self) -> TransportResult<ChainId> {
        self.inner.get_chain_id().await
    }

    async fn resolve_name(&self, name: &str) -> TransportResult<Option<Address>> {
        let node = namehash(name);

        let ret = self
            .call(ENS_REGISTRY_ADDRESS, IEnsRegistry::resolverCall { node }.abi_encode().into())
            .await?;
        let resolver = IEnsRegistry::resolverCall::abi_decode_returns(&ret)
            .map_err(TransportErrorKind::custom)?;
        if resolver.is_zero() {
            debug!(name, %node, "Name has no resolver");
            return Ok(None);
        }

        let ret = self.call(resolver, IEnsResolver::addrCall { node }.abi_encode().into()).await?;
        let resolved =
            IEnsResolver::addrCall::abi_decode_returns(&ret).map_err(TransportErrorKind::custom)?;
        debug!(name, %resolver, %resolved, "Resolved name");

        Ok((!resolved.is_zero()).then_some(resolved))
    }
}
