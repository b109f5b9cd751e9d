//! Chain provider abstraction
//!
//! The sweep controller talks to the chain through `ChainProvider`, the
//! injected capability surface of the wallet gateway: account access,
//! balance queries, gas price queries, and transaction submission. The
//! controller never constructs transports itself.

mod mock;
mod rpc;

pub use mock::MockChainProvider;
pub use rpc::RpcChainProvider;

use crate::error::Result;
use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use serde::Serialize;

/// A plain value transfer ready for submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRequest {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    /// Gas limit offered to the node (buffered)
    pub gas: u64,
    /// Legacy gas price, smallest unit per gas
    pub gas_price: u128,
}

/// Wallet/RPC gateway capability surface
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Request access to the provider's accounts.
    ///
    /// Fails with `Error::ProviderRejected` when access is declined or the
    /// provider manages no accounts.
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// Native balance of an address, in smallest units
    async fn get_balance(&self, address: Address) -> Result<U256>;

    /// Current gas price, in smallest units per gas
    async fn gas_price(&self) -> Result<u128>;

    /// Submit a value transfer, returning its transaction hash
    async fn send_transaction(&self, request: TransferRequest) -> Result<TxHash>;
}
