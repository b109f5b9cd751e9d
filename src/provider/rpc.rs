//! JSON-RPC chain provider
//!
//! Talks to a node that manages its own accounts (a dev node or a wallet
//! gateway exposing `eth_accounts`/`eth_sendTransaction`), which is the CLI
//! stand-in for an injected browser wallet. Signing stays on the node side;
//! this module never sees a private key.

use crate::error::{Error, Result};
use crate::provider::{ChainProvider, TransferRequest};
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;

/// Chain provider backed by an HTTP JSON-RPC endpoint
pub struct RpcChainProvider {
    rpc_url: String,
}

impl RpcChainProvider {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
        }
    }

    fn connect(&self) -> Result<impl Provider> {
        let url: url::Url = self
            .rpc_url
            .parse()
            .map_err(|e| Error::Config(format!("invalid RPC URL: {}", e)))?;
        Ok(ProviderBuilder::new().connect_http(url))
    }
}

#[async_trait]
impl ChainProvider for RpcChainProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        let provider = self.connect()?;
        let accounts = provider
            .get_accounts()
            .await
            .map_err(|e| Error::ProviderRejected(e.to_string()))?;
        if accounts.is_empty() {
            return Err(Error::ProviderRejected(
                "provider returned no accounts".to_string(),
            ));
        }
        Ok(accounts)
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        let provider = self.connect()?;
        provider
            .get_balance(address)
            .await
            .map_err(|e| Error::Provider(format!("failed to get balance: {}", e)))
    }

    async fn gas_price(&self) -> Result<u128> {
        let provider = self.connect()?;
        provider
            .get_gas_price()
            .await
            .map_err(|e| Error::Provider(format!("failed to get gas price: {}", e)))
    }

    async fn send_transaction(&self, request: TransferRequest) -> Result<TxHash> {
        let provider = self.connect()?;

        let tx = TransactionRequest::default()
            .with_from(request.from)
            .with_to(request.to)
            .with_value(request.value)
            .with_gas_limit(request.gas)
            .with_gas_price(request.gas_price);

        let pending = provider
            .send_transaction(tx)
            .await
            .map_err(|e| Error::Provider(format!("transaction rejected: {}", e)))?;

        Ok(*pending.tx_hash())
    }
}
